//! Arbitrary precision tier, backed by `astro_float::BigFloat`.
//!
//! This is the tier Restart escalates to when even the DPE tier's extended
//! exponent range can no longer separate a cluster: working precision can be
//! raised arbitrarily (§4.6, the adaptive-precision Shift pass) rather than
//! being fixed at compile time.

use super::Scalar;
use astro_float::{BigFloat, Consts, RoundingMode};
use std::cell::RefCell;
use std::cmp::Ordering;

const DEFAULT_PRECISION: usize = 128;
const ROUNDING: RoundingMode = RoundingMode::ToEven;

thread_local! {
    /// `ln`/`exp` need a shared cache of precomputed constants (pi, ln(2));
    /// building it is too expensive to redo on every call.
    static CONSTS: RefCell<Consts> =
        RefCell::new(Consts::new().expect("failed to initialize astro-float constant cache"));
}

#[derive(Debug, Clone)]
pub struct MpFloat {
    value: BigFloat,
    precision: usize,
}

impl MpFloat {
    pub fn with_precision(v: f64, precision: usize) -> Self {
        MpFloat {
            value: BigFloat::from_f64(v, precision),
            precision,
        }
    }

    pub fn inner(&self) -> &BigFloat {
        &self.value
    }

    pub fn precision_bits(&self) -> usize {
        self.precision
    }

    fn common_precision(&self, other: &Self) -> usize {
        self.precision.max(other.precision)
    }
}

impl PartialEq for MpFloat {
    fn eq(&self, other: &Self) -> bool {
        self.value
            .cmp(&other.value)
            .map(|o| o == Ordering::Equal)
            .unwrap_or(false)
    }
}

impl PartialOrd for MpFloat {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.value.cmp(&other.value)
    }
}

impl Scalar for MpFloat {
    fn zero() -> Self {
        MpFloat::with_precision(0.0, DEFAULT_PRECISION)
    }

    fn one() -> Self {
        MpFloat::with_precision(1.0, DEFAULT_PRECISION)
    }

    fn from_f64(v: f64) -> Self {
        MpFloat::with_precision(v, DEFAULT_PRECISION)
    }

    fn to_f64(&self) -> f64 {
        self.value.to_f64()
    }

    fn add(&self, rhs: &Self) -> Self {
        let p = self.common_precision(rhs);
        MpFloat {
            value: self.value.add(&rhs.value, p, ROUNDING),
            precision: p,
        }
    }

    fn sub(&self, rhs: &Self) -> Self {
        let p = self.common_precision(rhs);
        MpFloat {
            value: self.value.sub(&rhs.value, p, ROUNDING),
            precision: p,
        }
    }

    fn mul(&self, rhs: &Self) -> Self {
        let p = self.common_precision(rhs);
        MpFloat {
            value: self.value.mul(&rhs.value, p, ROUNDING),
            precision: p,
        }
    }

    fn div(&self, rhs: &Self) -> Self {
        let p = self.common_precision(rhs);
        MpFloat {
            value: self.value.div(&rhs.value, p, ROUNDING),
            precision: p,
        }
    }

    fn neg(&self) -> Self {
        MpFloat {
            value: self.value.neg(),
            precision: self.precision,
        }
    }

    fn abs(&self) -> Self {
        MpFloat {
            value: self.value.abs(),
            precision: self.precision,
        }
    }

    fn ln(&self) -> Self {
        CONSTS.with(|cc| MpFloat {
            value: self.value.ln(self.precision, ROUNDING, &mut cc.borrow_mut()),
            precision: self.precision,
        })
    }

    fn exp(&self) -> Self {
        CONSTS.with(|cc| MpFloat {
            value: self.value.exp(self.precision, ROUNDING, &mut cc.borrow_mut()),
            precision: self.precision,
        })
    }

    fn sqrt(&self) -> Self {
        MpFloat {
            value: self.value.sqrt(self.precision, ROUNDING),
            precision: self.precision,
        }
    }

    fn is_finite(&self) -> bool {
        !self.value.is_inf() && !self.value.is_nan()
    }

    fn min_positive() -> Self {
        MpFloat::with_precision(f64::MIN_POSITIVE, DEFAULT_PRECISION)
    }

    fn max_value() -> Self {
        MpFloat::with_precision(f64::MAX, DEFAULT_PRECISION)
    }

    /// The only tier where this is not a no-op: recomputes `value` at the
    /// new precision (rounding, never truncating silently) and remembers it
    /// for subsequent operations.
    fn raise_precision(&mut self, working_precision: usize) {
        if working_precision <= self.precision {
            return;
        }
        self.value = self.value.add(&BigFloat::from_f64(0.0, working_precision), working_precision, ROUNDING);
        self.precision = working_precision;
    }

    fn working_precision(&self) -> usize {
        self.precision
    }

    /// The adaptive-precision pass (§4.6): re-tries the first Horner step
    /// at successively higher working precision until `c[0]` clears its
    /// own forward-error bound.
    fn shift_coeffs(
        coeffs: &[crate::complex::Cplx<Self>],
        g: &crate::complex::Cplx<Self>,
        m: usize,
        base_wp: usize,
        prec_out: usize,
        wp_max_so_far: usize,
    ) -> (Vec<crate::complex::Cplx<Self>>, bool) {
        let result = crate::shift::horner_shift_adaptive(coeffs, g, m, base_wp, prec_out, wp_max_so_far);
        (result.coeffs, result.degenerate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let v = MpFloat::from_f64(3.25);
        assert!((v.to_f64() - 3.25).abs() < 1e-9);
    }

    #[test]
    fn test_arithmetic() {
        let a = MpFloat::from_f64(2.0);
        let b = MpFloat::from_f64(3.0);
        assert!((Scalar::mul(&a, &b).to_f64() - 6.0).abs() < 1e-9);
        assert!((Scalar::add(&a, &b).to_f64() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_raise_precision() {
        let mut v = MpFloat::from_f64(1.0);
        assert_eq!(v.precision_bits(), DEFAULT_PRECISION);
        v.raise_precision(256);
        assert_eq!(v.precision_bits(), 256);
        v.raise_precision(64);
        assert_eq!(v.precision_bits(), 256);
    }

    #[test]
    fn test_ln_exp_roundtrip() {
        let v = MpFloat::from_f64(4.0);
        let back = v.ln().exp();
        assert!((back.to_f64() - 4.0).abs() < 1e-6);
    }
}
