//! External collaborators (§6).
//!
//! Two responsibilities sit outside this core and are modelled as traits so
//! Restart can be unit-tested without the full surrounding polisher:
//! `NewtonStep` (the Newton correction used only by Restart's local
//! iteration, §4.5 step 6) and `ClusterAnalysis` (produces `clust`/`punt`
//! before each Restart pass, §6). The crate ships exactly one concrete
//! `NewtonStep`, [`ReferenceNewton`], for testing and the benchmark;
//! production callers supply their own.

use crate::cluster_registry::ClusterRegistry;
use crate::complex::Cplx;
use crate::number::Scalar;
use crate::root::RootVector;

/// One Newton step's result: a correction to apply, and whether stepping
/// further would still reduce the inclusion radius.
#[derive(Debug, Clone)]
pub struct NewtonOutcome<S: Scalar> {
    pub correction: Cplx<S>,
    pub keep_going: bool,
}

/// The §6 Newton collaborator contract: `newton(n', x, &rad, &corr, coeffs,
/// moduli, &continue_flag)`.
pub trait NewtonStep<S: Scalar> {
    fn step(&self, x: &Cplx<S>, rad: &S, coeffs: &[Cplx<S>], moduli: &[S]) -> NewtonOutcome<S>;
}

/// Produces the cluster partition consumed by each Restart pass. Not
/// implemented in this crate — the partition is the outer polisher's
/// responsibility (§1: "out of scope").
pub trait ClusterAnalysis<S: Scalar> {
    fn analyze(&self, roots: &RootVector<S>, eps: f64) -> ClusterRegistry;
}

/// Plain Newton-Raphson on a polynomial evaluated by Horner, used only by
/// the test suite and the synthetic benchmark to exercise Restart's
/// collaborator contract end to end.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceNewton;

/// Evaluates `p` and `p'` at `x` simultaneously via Horner's method.
pub fn horner_eval<S: Scalar>(coeffs: &[Cplx<S>], x: &Cplx<S>) -> (Cplx<S>, Cplx<S>) {
    let n = coeffs.len() - 1;
    let mut p = coeffs[n].clone();
    let mut dp = Cplx::zero();
    for i in (0..n).rev() {
        dp = dp.mul(x).add(&p);
        p = p.mul(x).add(&coeffs[i]);
    }
    (p, dp)
}

impl<S: Scalar> NewtonStep<S> for ReferenceNewton {
    fn step(&self, x: &Cplx<S>, rad: &S, coeffs: &[Cplx<S>], _moduli: &[S]) -> NewtonOutcome<S> {
        let (p, dp) = horner_eval(coeffs, x);
        if dp.modulus().is_zero() || !dp.is_finite() {
            return NewtonOutcome {
                correction: Cplx::zero(),
                keep_going: false,
            };
        }
        let correction = p.div(&dp);
        let keep_going = correction.modulus() < *rad || rad.is_zero();
        NewtonOutcome { correction, keep_going }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    fn poly_from(coeffs: &[Complex64]) -> Vec<Cplx<f64>> {
        coeffs.iter().map(|c| Cplx::new(c.re, c.im)).collect()
    }

    #[test]
    fn test_horner_eval_matches_direct_evaluation() {
        // p(x) = x^2 - 5x + 6, p(2) = 0, p'(2) = -1.
        let coeffs = poly_from(&[
            Complex64::new(6.0, 0.0),
            Complex64::new(-5.0, 0.0),
            Complex64::new(1.0, 0.0),
        ]);
        let (p, dp) = horner_eval(&coeffs, &Cplx::new(2.0_f64, 0.0));
        assert!(p.modulus().abs() < 1e-10);
        assert!((dp.re - (-1.0)).abs() < 1e-10);
    }

    #[test]
    fn test_reference_newton_converges_toward_root() {
        let coeffs = poly_from(&[
            Complex64::new(6.0, 0.0),
            Complex64::new(-5.0, 0.0),
            Complex64::new(1.0, 0.0),
        ]);
        let newton = ReferenceNewton;
        let mut x = Cplx::new(1.5_f64, 0.0);
        for _ in 0..10 {
            let outcome = newton.step(&x, &0.0, &coeffs, &[]);
            x = x.sub(&outcome.correction);
            if !outcome.keep_going {
                break;
            }
        }
        assert!((x.re - 2.0).abs() < 1e-8);
    }
}
