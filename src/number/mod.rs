//! The numeric-kind abstraction (§4.8, §9 of the specification).
//!
//! `Scalar` is the small capability set the specification calls for: the
//! four arithmetic operations, `ln`/`exp`/`sqrt`/`abs`, per-tier
//! representability sentinels, and a precision-raising hook that only does
//! anything at the multiprecision tier. Every other component in this crate
//! (`hull`, `radii`, `placer`, `restart`, `shift`) is written once, generic
//! over `S: Scalar`, and instantiated at the three concrete tiers below —
//! this is the "implement each component once per kind" design note, not an
//! ad hoc convenience.

mod dpe;
mod mp;

pub use dpe::Dpe;
pub use mp::MpFloat;

use std::fmt::Debug;

/// Capability set shared by the three arithmetic tiers.
///
/// Implementors: [`f64`] (hardware double), [`Dpe`] (double with extended
/// exponent) and [`MpFloat`] (arbitrary precision, backed by
/// `astro_float::BigFloat`).
pub trait Scalar: Clone + Debug + PartialOrd + PartialEq {
    fn zero() -> Self;
    fn one() -> Self;
    fn from_f64(v: f64) -> Self;
    fn from_usize(n: usize) -> Self {
        Self::from_f64(n as f64)
    }
    fn to_f64(&self) -> f64;

    fn add(&self, rhs: &Self) -> Self;
    fn sub(&self, rhs: &Self) -> Self;
    fn mul(&self, rhs: &Self) -> Self;
    fn div(&self, rhs: &Self) -> Self;
    fn neg(&self) -> Self;

    fn abs(&self) -> Self;
    fn ln(&self) -> Self;
    fn exp(&self) -> Self;
    fn sqrt(&self) -> Self;

    fn is_finite(&self) -> bool;

    fn is_zero(&self) -> bool {
        *self == Self::zero()
    }

    /// Smallest positive representable value at this tier.
    fn min_positive() -> Self;
    /// Largest finite representable value at this tier.
    fn max_value() -> Self;

    /// Reallocates the scalar's working storage at (at least) the given
    /// precision, in bits. A no-op for the fixed-width tiers; only
    /// [`MpFloat`] overrides this.
    fn raise_precision(&mut self, _working_precision: usize) {}

    /// Current working precision in bits, or 0 for fixed-width tiers.
    fn working_precision(&self) -> usize {
        0
    }

    /// Shift (C6, §4.6): the first `m+1` coefficients of `p(x+g)`. Every
    /// tier shares the plain Horner recurrence; only [`MpFloat`] overrides
    /// this with the adaptive-precision pass, so this is the one point
    /// where "implement each component once per kind" (§9) means the
    /// kinds genuinely differ rather than merely their representable
    /// range. Returns the coefficients and whether the result should be
    /// treated as degenerate (§7: precision exhaustion).
    fn shift_coeffs(
        coeffs: &[crate::complex::Cplx<Self>],
        g: &crate::complex::Cplx<Self>,
        m: usize,
        _base_wp: usize,
        _prec_out: usize,
        _wp_max_so_far: usize,
    ) -> (Vec<crate::complex::Cplx<Self>>, bool) {
        (crate::shift::horner_shift(coeffs, g, m), false)
    }
}

impl Scalar for f64 {
    fn zero() -> Self {
        0.0
    }
    fn one() -> Self {
        1.0
    }
    fn from_f64(v: f64) -> Self {
        v
    }
    fn to_f64(&self) -> f64 {
        *self
    }

    fn add(&self, rhs: &Self) -> Self {
        self + rhs
    }
    fn sub(&self, rhs: &Self) -> Self {
        self - rhs
    }
    fn mul(&self, rhs: &Self) -> Self {
        self * rhs
    }
    fn div(&self, rhs: &Self) -> Self {
        self / rhs
    }
    fn neg(&self) -> Self {
        -self
    }

    fn abs(&self) -> Self {
        f64::abs(*self)
    }
    fn ln(&self) -> Self {
        f64::ln(*self)
    }
    fn exp(&self) -> Self {
        f64::exp(*self)
    }
    fn sqrt(&self) -> Self {
        f64::sqrt(*self)
    }

    fn is_finite(&self) -> bool {
        f64::is_finite(*self)
    }

    fn min_positive() -> Self {
        f64::MIN_POSITIVE
    }
    fn max_value() -> Self {
        f64::MAX
    }
}

/// Which of the three tiers a [`crate::context::SolveContext`] is currently
/// operating at. Carried as plain data (a sum type) rather than encoded via
/// inheritance, per the design note in §9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Tier {
    Double,
    Dpe,
    Multi,
}

impl Tier {
    /// The tier this one is promoted to when the outer polisher decides the
    /// current tier can no longer represent the problem. `Multi` has no
    /// further promotion.
    pub fn promote(self) -> Option<Self> {
        match self {
            Tier::Double => Some(Tier::Dpe),
            Tier::Dpe => Some(Tier::Multi),
            Tier::Multi => None,
        }
    }
}
