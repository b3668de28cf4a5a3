//! Placer (C4, §4.4).
//!
//! Distributes the `n_cluster` starting approximations of one cluster onto
//! the annuli Radii produced, tags out-of-range approximations per tier,
//! and marks negligible clusters as output-ready. Written once, generic
//! over [`Scalar`], instantiated at all three tiers by the caller picking
//! the concrete `S`.

use crate::cluster_registry::ClusterRegistry;
use crate::complex::Cplx;
use crate::config::{DataType, EngineConfig};
use crate::number::{Scalar, Tier};
use crate::polynomial::Polynomial;
use crate::radii::build_radii_for;
use crate::root::{Isolation, RootVector, Status};
use crate::scheduler::Scheduler;
use std::f64::consts::TAU;

/// Places a single cluster's approximations in-place on `roots`.
///
/// `g` is the shift origin of the sub-problem this cluster lives in (zero
/// for a fresh top-level placement). `cluster_rad` is the clamp Radii
/// should respect (the super-radius `sr` on a restart, zero otherwise).
/// `dpe_after_float` is true only for the very first DPE-tier placement
/// immediately following a double-tier one, when entries tagged `'x'` at
/// the double tier must be revisited rather than replaced wholesale.
#[allow(clippy::too_many_arguments)]
pub fn place_cluster<S: Scalar>(
    poly: &Polynomial<S>,
    registry: &ClusterRegistry,
    i_cluster: usize,
    g: &S,
    cluster_rad: &S,
    roots: &mut RootVector<S>,
    scheduler: &mut Scheduler,
    config: &EngineConfig,
    tier: Tier,
    dpe_after_float: bool,
) {
    let n_cluster = registry.cluster_size(i_cluster);
    if n_cluster == 0 {
        return;
    }

    let m_prev = if i_cluster == 0 {
        0
    } else {
        registry.cluster_size(i_cluster - 1)
    };
    let sigma = scheduler.next_sigma(config.random_seed(), i_cluster, n_cluster, m_prev);

    let root_index = |j: usize| -> usize {
        if g.is_zero() {
            j
        } else {
            registry.slot(i_cluster, j)
        }
    };

    if poly.data_type() == DataType::UserDefined {
        for j in 0..n_cluster {
            let l = root_index(j);
            let angle = TAU * (j as f64) / (n_cluster as f64) + sigma;
            roots.get_mut(l).approx = Cplx::from_polar(S::one(), angle);
        }
        return;
    }

    // Supplemented fast path (SPEC_FULL.md §2.2): closed-form placement for
    // the smallest sub-problems a restart can produce, when the polynomial
    // handed to us *is* the local degree-(n_cluster) sub-polynomial (the
    // common case once Shift has deflated down to the cluster's own
    // coefficients).
    if poly.degree() == n_cluster && (n_cluster == 1 || n_cluster == 2) {
        if let Some(pts) = closed_form_roots(poly) {
            for (j, z) in pts.into_iter().enumerate() {
                let l = root_index(j);
                roots.get_mut(l).approx = Cplx::new(S::from_f64(z.0), S::from_f64(z.1));
            }
            return;
        }
    }

    let part = build_radii_for(poly, cluster_rad, g, config.eps(), config.circle_relative_distance());
    let th = TAU / (n_cluster as f64);

    for i in 0..part.n_radii() {
        let range = part.slot_range(i);
        let n_i = range.len();
        if n_i == 0 {
            continue;
        }
        let r = part.radii[i].clone();
        let ang = TAU / (n_i as f64);
        let p_upper = range.end as f64;

        for j in range.clone() {
            let jj = (j - range.start) as f64;
            let l = root_index(j);
            let angle = ang * jj + th * p_upper + sigma;
            roots.get_mut(l).approx = Cplx::from_polar(r.clone(), angle);

            tag_extremal(roots.get_mut(l), &r, tier, dpe_after_float);
        }

        if !g.is_zero() {
            let width = r.mul(&S::from_usize(n_i));
            if width <= config.eps().into_scalar::<S>().mul(&g.abs()) {
                for &l in registry.cluster_members(i_cluster) {
                    roots.get_mut(l).status = Status::OutputReady;
                    roots.get_mut(l).rad = width.clone();
                }
            }
        }
    }
}

/// Tags a root's status after placement, per the tier-specific rules in
/// §4.4 step 3.
fn tag_extremal<S: Scalar>(
    root: &mut crate::root::Root<S>,
    r: &S,
    tier: Tier,
    dpe_after_float: bool,
) {
    let extremal = *r == S::min_positive() || *r == S::max_value();
    match tier {
        Tier::Double => {
            if extremal {
                root.status = Status::UnrepresentableAtDouble;
            }
        }
        Tier::Dpe => {
            if dpe_after_float {
                if root.status == Status::UnrepresentableAtDouble {
                    root.status = if extremal {
                        Status::Unrepresentable
                    } else {
                        Status::Iterating
                    };
                }
            } else if extremal {
                root.status = Status::Unrepresentable;
            }
        }
        Tier::Multi => {
            if extremal {
                root.status = Status::Unrepresentable;
            }
        }
    }
    root.isolation = Isolation::Unexamined;
}

/// Closed-form roots of a degree-1 or degree-2 polynomial from its exact
/// coefficients, as plain `(re, im)` pairs in solving order. Grounded in
/// the classic `complex_quadratic_roots`/`real_quadratic_roots` pattern
/// (see `other_examples`), specialised to fully complex coefficients.
fn closed_form_roots<S: Scalar>(poly: &Polynomial<S>) -> Option<Vec<(f64, f64)>> {
    use num_complex::Complex64;
    let c = poly.exact_coeffs();
    match c.len() {
        2 => {
            let a0 = Complex64::new(c[0].re.to_f64(), c[0].im.to_f64());
            let a1 = Complex64::new(c[1].re.to_f64(), c[1].im.to_f64());
            if a1.norm() == 0.0 {
                return None;
            }
            let root = -a0 / a1;
            Some(vec![(root.re, root.im)])
        }
        3 => {
            let a0 = Complex64::new(c[0].re.to_f64(), c[0].im.to_f64());
            let a1 = Complex64::new(c[1].re.to_f64(), c[1].im.to_f64());
            let a2 = Complex64::new(c[2].re.to_f64(), c[2].im.to_f64());
            if a2.norm() == 0.0 {
                return None;
            }
            let b = a1 / a2;
            let cc = a0 / a2;
            let disc = (b * b - 4.0 * cc).sqrt();
            let r1 = (-b + disc) / 2.0;
            let r2 = (-b - disc) / 2.0;
            Some(vec![(r1.re, r1.im), (r2.re, r2.im)])
        }
        _ => None,
    }
}

/// Small helper so the cluster-output test (§4.4 step 4) can compare an
/// `f64` tolerance against a tier scalar without every caller having to
/// spell `S::from_f64` at the call site.
trait IntoScalar {
    fn into_scalar<S: Scalar>(self) -> S;
}

impl IntoScalar for f64 {
    fn into_scalar<S: Scalar>(self) -> S {
        S::from_f64(self)
    }
}
