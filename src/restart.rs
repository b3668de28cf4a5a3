//! Restart controller (C5, §4.5).
//!
//! Scans the cluster registry for shift-worthy clusters: computes a
//! super-centre and super-radius, verifies Newton-isolation from every
//! other root, locates a zero of the derived polynomial by bounded local
//! Newton iteration, shifts the sub-problem's variable by Horner
//! deflation, and rewrites the cluster's approximations relative to the
//! new origin. Every abort/skip path is a `continue` in the cluster loop
//! (§9's "deep goto" design note), never an error return (§7).

use crate::cluster_registry::ClusterRegistry;
use crate::collab::NewtonStep;
use crate::complex::Cplx;
use crate::config::{DataType, EngineConfig, Goal};
use crate::number::{Scalar, Tier};
use crate::placer::place_cluster;
use crate::polynomial::Polynomial;
use crate::root::{Isolation, RootVector, Status};
use crate::scheduler::Scheduler;
use num_complex::Complex64;

const ISOLATION_K: f64 = 5.0;
const MP_ISOLATION_BOUND: f64 = 0.3;
const MP_IMPROVEMENT_FACTOR: f64 = 0.25;

/// What happened to one cluster during a Restart pass, surfaced for
/// logging/testing; the engine itself never inspects this beyond
/// diagnostics (§7: "nothing in this core raises").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterOutcome {
    Shifted,
    NotEligible,
    StraddlesOrigin,
    NotIsolated,
    NewtonExhausted,
    GravityOutsideDisk,
    OverflowPredicted,
    InsufficientImprovement,
}

fn root_tier_coeffs<S: Scalar>(poly: &Polynomial<S>) -> Vec<Cplx<S>> {
    poly.exact_coeffs()
        .iter()
        .map(|c| Cplx::new(S::from_f64(c.re.to_f64()), S::from_f64(c.im.to_f64())))
        .collect()
}

/// Coefficients of `p'(x)` given `p`'s coefficients (constant term first).
fn derivative<S: Scalar>(coeffs: &[Cplx<S>]) -> Vec<Cplx<S>> {
    let n = coeffs.len() - 1;
    (0..n)
        .map(|i| coeffs[i + 1].mul(&Cplx::from_real(S::from_usize(i + 1))))
        .collect()
}

/// The `(m-1)`-th derivative, applied by repeated index-weighted shifts
/// (§4.5 step 5).
fn nth_derivative<S: Scalar>(coeffs: &[Cplx<S>], times: usize) -> Vec<Cplx<S>> {
    let mut cur = coeffs.to_vec();
    for _ in 0..times {
        if cur.len() <= 1 {
            break;
        }
        cur = derivative(&cur);
    }
    cur
}

fn moduli_of<S: Scalar>(coeffs: &[Cplx<S>]) -> Vec<S> {
    coeffs.iter().map(Cplx::modulus).collect()
}

/// Runs one Restart pass over every cluster of size > 1 in `registry`.
/// Returns the outcome recorded for each cluster, in registry order
/// (singletons are skipped entirely and do not appear).
///
/// `wp_max_so_far` is the running peak multiprecision working precision
/// reached by any Shift call so far this solve (§4.6's `wp_max_so_far`
/// cap); it is a no-op at the double/DPE tiers, where
/// [`Scalar::shift_coeffs`]'s default implementation ignores it.
#[allow(clippy::too_many_arguments)]
pub fn restart_pass<S: Scalar, N: NewtonStep<S>>(
    poly: &Polynomial<S>,
    registry: &ClusterRegistry,
    roots: &mut RootVector<S>,
    scheduler: &mut Scheduler,
    config: &EngineConfig,
    tier: Tier,
    newton: &N,
    wp_max_so_far: &mut usize,
) -> Vec<(usize, ClusterOutcome)> {
    let mut outcomes = Vec::new();
    for k in 0..registry.nclust() {
        if registry.cluster_size(k) <= 1 {
            continue;
        }
        let outcome = restart_cluster(poly, registry, k, roots, scheduler, config, tier, newton, wp_max_so_far);
        outcomes.push((k, outcome));
    }
    outcomes
}

#[allow(clippy::too_many_arguments)]
fn restart_cluster<S: Scalar, N: NewtonStep<S>>(
    poly: &Polynomial<S>,
    registry: &ClusterRegistry,
    k: usize,
    roots: &mut RootVector<S>,
    scheduler: &mut Scheduler,
    config: &EngineConfig,
    tier: Tier,
    newton: &N,
    wp_max_so_far: &mut usize,
) -> ClusterOutcome {
    let members = registry.cluster_members(k).to_vec();
    let m = members.len();

    // Step 1: eligibility.
    let all_again = members.iter().all(|&l| roots.get(l).again);
    let any_qualifies = members.iter().any(|&l| {
        let r = roots.get(l);
        r.status == Status::Iterating
            && match config.goal() {
                Goal::Count => r.isolation == Isolation::Unexamined,
                Goal::IsolateOrApproximate => {
                    r.isolation == Isolation::Unexamined || r.isolation == Isolation::Isolated
                }
            }
    });
    if !all_again || !any_qualifies {
        return ClusterOutcome::NotEligible;
    }

    // Step 2: super-centre and super-radius.
    let mut weight_sum = S::zero();
    let mut weighted = Cplx::zero();
    for &l in &members {
        let r = roots.get(l);
        weight_sum = weight_sum.add(&r.rad);
        let w = Cplx::from_real(r.rad.clone());
        weighted = weighted.add(&w.mul(&r.approx));
    }
    if weight_sum.is_zero() {
        weight_sum = S::from_usize(m);
    }
    let sc = weighted.div(&Cplx::from_real(weight_sum));

    let mut sr = S::zero();
    for &l in &members {
        let r = roots.get(l);
        let d = sc.sub(&r.approx).modulus().add(&r.rad);
        if d > sr {
            sr = d;
        }
    }

    // Step 3: relative-width gate.
    if sr > sc.modulus() {
        mark_iterating(roots, &members);
        return ClusterOutcome::StraddlesOrigin;
    }

    // Step 4: Newton-isolation.
    let is_multi = tier == Tier::Multi;
    let isolated = if is_multi {
        let mut acc = 0.0_f64;
        for i in 0..roots.len() {
            if members.contains(&i) {
                continue;
            }
            let p = roots.get(i);
            let dist = sc.sub(&p.approx).modulus().to_f64();
            let denom = dist - sr.to_f64() - p.rad.to_f64();
            if denom > 0.0 {
                acc += sr.to_f64() / denom;
            } else {
                acc = f64::INFINITY;
                break;
            }
        }
        acc <= MP_ISOLATION_BOUND
    } else {
        (0..roots.len()).filter(|i| !members.contains(i)).all(|i| {
            let p = roots.get(i);
            let dist = sc.sub(&p.approx).modulus().to_f64();
            dist >= (sr.to_f64() + p.rad.to_f64()) * ISOLATION_K * (roots.len() as f64)
        })
    };
    if !isolated {
        mark_iterating(roots, &members);
        return ClusterOutcome::NotIsolated;
    }

    // Step 5: derived-polynomial coefficients.
    let full_coeffs = root_tier_coeffs(poly);
    let deriv_coeffs = nth_derivative(&full_coeffs, m.saturating_sub(1));
    let deriv_moduli = moduli_of(&deriv_coeffs);

    // Step 6: local Newton on the derived polynomial.
    let mut g = sc.clone();
    let mut rad_estimate = sr.clone();
    let mut converged = false;
    for _ in 0..config.max_newt_it() {
        let outcome = newton.step(&g, &rad_estimate, &deriv_coeffs, &deriv_moduli);
        let corr_mod = outcome.correction.modulus().to_f64();
        g = g.sub(&outcome.correction);
        let tiny = corr_mod <= config.eps() * (1.0 + g.modulus().to_f64());
        rad_estimate = outcome.correction.modulus();
        if tiny || !outcome.keep_going {
            converged = true;
            break;
        }
    }
    if !converged {
        mark_iterating(roots, &members);
        return ClusterOutcome::NewtonExhausted;
    }

    // Step 7: gravity-bound check.
    if sc.sub(&g).modulus() > sr {
        mark_iterating(roots, &members);
        return ClusterOutcome::GravityOutsideDisk;
    }

    // Step 8: overflow guard (double tier only).
    if tier == Tier::Double {
        let sum_abs: f64 = full_coeffs.iter().map(|c| c.modulus().to_f64()).sum();
        let predicted = (poly.degree() as f64) * g.modulus().to_f64().ln() + sum_abs.ln();
        if predicted > S::max_value().ln().to_f64() {
            mark_iterating(roots, &members);
            return ClusterOutcome::OverflowPredicted;
        }
    }

    // Step 9: Shift, dispatched through the tier's `shift_coeffs` so the
    // multiprecision tier's adaptive-precision pass (§4.6) is actually
    // reached, rather than always running the plain double/DPE Horner form.
    let (shifted, degenerate) =
        S::shift_coeffs(&full_coeffs, &g, m, config.mpwp(), config.prec_out(), *wp_max_so_far);
    *wp_max_so_far = (*wp_max_so_far).max(shifted.first().map(|c| c.re.working_precision()).unwrap_or(0));
    let sr_pre = sr.clone();

    // Build the local sub-polynomial for Radii/Placer on the shifted
    // sub-problem.
    let shifted_c64: Vec<Complex64> = shifted
        .iter()
        .map(|c| Complex64::new(c.re.to_f64(), c.im.to_f64()))
        .collect();
    let mut sub_poly = match Polynomial::<S>::new(m, shifted_c64, DataType::Known) {
        Ok(p) => p,
        Err(_) => {
            mark_iterating(roots, &members);
            return ClusterOutcome::OverflowPredicted;
        }
    };
    if degenerate {
        // §7: precision exhaustion in Shift — flag the moduli Placer will
        // see as uniformly `|c[0]|` rather than the (untrustworthy) exact
        // per-index values.
        let uniform = sub_poly.modulus(0).clone();
        sub_poly.flatten_moduli(uniform);
    }

    let sub_registry = ClusterRegistry::from_parts((0..m).collect(), vec![0, m]);
    let mut local_roots: RootVector<S> = RootVector::new(m);
    place_cluster(
        &sub_poly,
        &sub_registry,
        0,
        &S::zero(),
        &sr_pre,
        &mut local_roots,
        scheduler,
        config,
        tier,
        false,
    );

    // Step 10: relative-improvement guard (multiprecision tier only).
    let sr_new = (0..m)
        .map(|i| local_roots.get(i).approx.modulus())
        .fold(S::zero(), |acc, r| if r > acc { r } else { acc });
    if is_multi && !(sr_new.to_f64() < MP_IMPROVEMENT_FACTOR * sr_pre.to_f64()) {
        mark_iterating(roots, &members);
        return ClusterOutcome::InsufficientImprovement;
    }

    // Step 11: rewrite.
    for (j, &l) in members.iter().enumerate() {
        let local = local_roots.get(j);
        let new_rad_floor = g.modulus().mul(&S::from_f64(2.0)).mul(&epsilon_of::<S>());
        let mut new_rad = local.approx.modulus().mul(&S::from_usize(2 * m));
        if new_rad < new_rad_floor {
            new_rad = new_rad_floor;
        }
        let root = roots.get_mut(l);
        root.approx = local.approx.add(&g);
        root.rad = new_rad;
        root.status = Status::Iterating;
        root.isolation = Isolation::Unexamined;
    }

    ClusterOutcome::Shifted
}

fn epsilon_of<S: Scalar>() -> S {
    S::from_f64(f64::EPSILON)
}

fn mark_iterating<S: Scalar>(roots: &mut RootVector<S>, members: &[usize]) {
    for &l in members {
        roots.get_mut(l).status = Status::Iterating;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collab::ReferenceNewton;
    use num_complex::Complex64;

    fn triple_root_poly() -> Polynomial<f64> {
        // (x - 2)^3 = x^3 - 6x^2 + 12x - 8.
        let c = vec![
            Complex64::new(-8.0, 0.0),
            Complex64::new(12.0, 0.0),
            Complex64::new(-6.0, 0.0),
            Complex64::new(1.0, 0.0),
        ];
        Polynomial::new(3, c, DataType::Known).unwrap()
    }

    fn roots_near(points: &[(f64, f64)], rad: f64) -> RootVector<f64> {
        let mut rv = RootVector::new(points.len());
        for (i, &(re, im)) in points.iter().enumerate() {
            let root = rv.get_mut(i);
            root.approx = Cplx::new(re, im);
            root.rad = rad;
            root.status = Status::Iterating;
            root.isolation = Isolation::Unexamined;
            root.again = true;
        }
        rv
    }

    #[test]
    fn test_shift_succeeds_on_tight_cluster() {
        let poly = triple_root_poly();
        let registry = ClusterRegistry::from_parts(vec![0, 1, 2], vec![0, 3]);
        let mut roots = roots_near(&[(1.9, 0.0), (2.0, 0.05), (2.1, -0.05)], 0.2);
        let mut scheduler = Scheduler::new();
        let config = EngineConfig::new();
        let newton = ReferenceNewton;
        let mut wp = config.mpwp();

        let outcomes = restart_pass(&poly, &registry, &mut roots, &mut scheduler, &config, Tier::Double, &newton, &mut wp);
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].1, ClusterOutcome::Shifted);
        for i in 0..3 {
            assert!((roots.get(i).approx.re - 2.0).abs() < 0.5);
        }
    }

    #[test]
    fn test_not_eligible_when_again_false() {
        let poly = triple_root_poly();
        let registry = ClusterRegistry::from_parts(vec![0, 1, 2], vec![0, 3]);
        let mut roots = roots_near(&[(1.9, 0.0), (2.0, 0.05), (2.1, -0.05)], 0.2);
        roots.get_mut(0).again = false;
        let mut scheduler = Scheduler::new();
        let config = EngineConfig::new();
        let newton = ReferenceNewton;
        let mut wp = config.mpwp();

        let outcomes = restart_pass(&poly, &registry, &mut roots, &mut scheduler, &config, Tier::Double, &newton, &mut wp);
        assert_eq!(outcomes[0].1, ClusterOutcome::NotEligible);
    }

    #[test]
    fn test_straddles_origin() {
        let poly = triple_root_poly();
        let registry = ClusterRegistry::from_parts(vec![0, 1], vec![0, 2]);
        // Super-centre near 0 with radii larger than |sc|: straddles.
        let mut roots = roots_near(&[(0.1, 0.0), (-0.1, 0.0)], 1.0);
        let mut scheduler = Scheduler::new();
        let config = EngineConfig::new();
        let newton = ReferenceNewton;
        let mut wp = config.mpwp();

        let outcomes = restart_pass(&poly, &registry, &mut roots, &mut scheduler, &config, Tier::Double, &newton, &mut wp);
        assert_eq!(outcomes[0].1, ClusterOutcome::StraddlesOrigin);
    }

    #[test]
    fn test_singletons_produce_no_outcomes() {
        let poly = triple_root_poly();
        let registry = ClusterRegistry::singletons(3);
        let mut roots = roots_near(&[(1.0, 0.0), (2.0, 0.0), (3.0, 0.0)], 0.01);
        let mut scheduler = Scheduler::new();
        let config = EngineConfig::new();
        let newton = ReferenceNewton;
        let mut wp = config.mpwp();

        let outcomes = restart_pass(&poly, &registry, &mut roots, &mut scheduler, &config, Tier::Double, &newton, &mut wp);
        assert!(outcomes.is_empty());
    }

    #[test]
    fn test_multi_tier_dispatches_adaptive_shift() {
        // Same cluster as `test_shift_succeeds_on_tight_cluster`, but run
        // at the multiprecision tier so Restart's Shift call must route
        // through `MpFloat::shift_coeffs` (the adaptive-precision pass)
        // rather than the plain double/DPE Horner form.
        use crate::number::MpFloat;

        let c = vec![
            Complex64::new(-8.0, 0.0),
            Complex64::new(12.0, 0.0),
            Complex64::new(-6.0, 0.0),
            Complex64::new(1.0, 0.0),
        ];
        let poly = Polynomial::<MpFloat>::new(3, c, DataType::Known).unwrap();
        let registry = ClusterRegistry::from_parts(vec![0, 1, 2], vec![0, 3]);

        let mut rv: RootVector<MpFloat> = RootVector::new(3);
        for (i, &(re, im)) in [(1.9, 0.0), (2.0, 0.05), (2.1, -0.05)].iter().enumerate() {
            let root = rv.get_mut(i);
            root.approx = Cplx::new(MpFloat::from_f64(re), MpFloat::from_f64(im));
            root.rad = MpFloat::from_f64(0.2);
            root.status = Status::Iterating;
            root.isolation = Isolation::Unexamined;
            root.again = true;
        }

        let mut scheduler = Scheduler::new();
        let config = EngineConfig::new();
        let newton = ReferenceNewton;
        let mut wp = config.mpwp();

        let outcomes =
            restart_pass(&poly, &registry, &mut rv, &mut scheduler, &config, Tier::Multi, &newton, &mut wp);
        assert_eq!(outcomes[0].1, ClusterOutcome::Shifted);
        assert!(wp >= config.mpwp());
        for i in 0..3 {
            assert!((rv.get(i).approx.re.to_f64() - 2.0).abs() < 0.5);
        }
    }

    #[test]
    fn test_not_isolated_when_foreign_root_too_close() {
        let poly = triple_root_poly();
        let registry = ClusterRegistry::from_parts(vec![0, 1, 2], vec![0, 2, 3]);
        // Cluster {0,1} near 2.0; root 2 sits just barely outside the
        // super-disk so the isolation margin fails.
        let mut roots = roots_near(&[(1.95, 0.0), (2.05, 0.0), (2.2, 0.0)], 0.05);
        let mut scheduler = Scheduler::new();
        let config = EngineConfig::new();
        let newton = ReferenceNewton;
        let mut wp = config.mpwp();

        let outcomes = restart_pass(&poly, &registry, &mut roots, &mut scheduler, &config, Tier::Double, &newton, &mut wp);
        assert_eq!(outcomes[0].1, ClusterOutcome::NotIsolated);
    }
}
