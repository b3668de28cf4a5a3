//! Double with extended exponent.
//!
//! A `Dpe` represents `mantissa * 2^exponent` with `mantissa` kept in
//! `[0.5, 1.0)` (the same normal form `libm::frexp`/`libm::ldexp` use), so it
//! can hold magnitudes far outside `f64`'s exponent range while keeping
//! `f64`'s native precision in the mantissa. This is the middle of the three
//! arithmetic tiers: cheaper than full multiprecision, but immune to the
//! overflow/underflow that clamps the double tier's radii at the edges of
//! the polygon.

use super::Scalar;
use std::cmp::Ordering;
use std::ops::{Add, Div, Mul, Neg, Sub};

const LN2: f64 = std::f64::consts::LN_2;

#[derive(Debug, Clone, Copy)]
pub struct Dpe {
    mantissa: f64,
    exponent: i64,
}

impl Dpe {
    /// Normalizes `mantissa * 2^exponent` so the mantissa sits in
    /// `[0.5, 1.0)` (or is exactly zero).
    fn normalize(mantissa: f64, exponent: i64) -> Self {
        if mantissa == 0.0 || !mantissa.is_finite() {
            return Self {
                mantissa,
                exponent: 0,
            };
        }
        let (m, e) = libm::frexp(mantissa);
        Self {
            mantissa: m,
            exponent: exponent + e as i64,
        }
    }

    pub fn from_parts(mantissa: f64, exponent: i64) -> Self {
        Self::normalize(mantissa, exponent)
    }

    pub fn mantissa(&self) -> f64 {
        self.mantissa
    }

    pub fn exponent(&self) -> i64 {
        self.exponent
    }

    pub fn is_zero_value(&self) -> bool {
        self.mantissa == 0.0
    }

    /// Collapses back to `f64`, saturating to `+/-infinity` if the
    /// exponent no longer fits. Used at tier boundaries and for the
    /// `exp`/`ln` round trip below.
    pub fn collapse(&self) -> f64 {
        if self.mantissa == 0.0 {
            return 0.0;
        }
        libm::ldexp(self.mantissa, self.exponent.clamp(i32::MIN as i64, i32::MAX as i64) as i32)
    }
}

impl PartialEq for Dpe {
    fn eq(&self, other: &Self) -> bool {
        self.mantissa == other.mantissa && self.exponent == other.exponent
    }
}

impl PartialOrd for Dpe {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        let sign = self.mantissa.signum().partial_cmp(&other.mantissa.signum())?;
        if sign != Ordering::Equal {
            return Some(sign);
        }
        if self.mantissa.signum() >= 0.0 {
            Some(
                self.exponent
                    .cmp(&other.exponent)
                    .then(self.mantissa.partial_cmp(&other.mantissa)?),
            )
        } else {
            Some(
                other
                    .exponent
                    .cmp(&self.exponent)
                    .then(other.mantissa.partial_cmp(&self.mantissa)?),
            )
        }
    }
}

impl Add for Dpe {
    type Output = Dpe;
    fn add(self, rhs: Dpe) -> Dpe {
        if self.mantissa == 0.0 {
            return rhs;
        }
        if rhs.mantissa == 0.0 {
            return self;
        }
        let shift = self.exponent - rhs.exponent;
        if shift.unsigned_abs() > 64 {
            return if shift > 0 { self } else { rhs };
        }
        if shift >= 0 {
            let m = self.mantissa + libm::ldexp(rhs.mantissa, (-shift) as i32);
            Dpe::normalize(m, self.exponent)
        } else {
            let m = rhs.mantissa + libm::ldexp(self.mantissa, shift as i32);
            Dpe::normalize(m, rhs.exponent)
        }
    }
}

impl Sub for Dpe {
    type Output = Dpe;
    fn sub(self, rhs: Dpe) -> Dpe {
        self + (-rhs)
    }
}

impl Mul for Dpe {
    type Output = Dpe;
    fn mul(self, rhs: Dpe) -> Dpe {
        Dpe::normalize(self.mantissa * rhs.mantissa, self.exponent + rhs.exponent)
    }
}

impl Div for Dpe {
    type Output = Dpe;
    fn div(self, rhs: Dpe) -> Dpe {
        Dpe::normalize(self.mantissa / rhs.mantissa, self.exponent - rhs.exponent)
    }
}

impl Neg for Dpe {
    type Output = Dpe;
    fn neg(self) -> Dpe {
        Dpe {
            mantissa: -self.mantissa,
            exponent: self.exponent,
        }
    }
}

impl Scalar for Dpe {
    fn zero() -> Self {
        Dpe {
            mantissa: 0.0,
            exponent: 0,
        }
    }
    fn one() -> Self {
        Dpe::from_f64(1.0)
    }
    fn from_f64(v: f64) -> Self {
        Dpe::normalize(v, 0)
    }
    fn to_f64(&self) -> f64 {
        self.collapse()
    }

    fn add(&self, rhs: &Self) -> Self {
        (*self) + (*rhs)
    }
    fn sub(&self, rhs: &Self) -> Self {
        (*self) - (*rhs)
    }
    fn mul(&self, rhs: &Self) -> Self {
        (*self) * (*rhs)
    }
    fn div(&self, rhs: &Self) -> Self {
        (*self) / (*rhs)
    }
    fn neg(&self) -> Self {
        -(*self)
    }

    fn abs(&self) -> Self {
        Dpe {
            mantissa: self.mantissa.abs(),
            exponent: self.exponent,
        }
    }

    /// Exact: `ln(m * 2^e) = ln(m) + e*ln(2)`, and `m` is always in
    /// `[0.5, 1.0)` so `ln(m)` never leaves plain `f64` range.
    fn ln(&self) -> Self {
        Dpe::from_f64(self.mantissa.ln() + (self.exponent as f64) * LN2)
    }

    /// `exp` on the values this crate actually feeds it (differences of
    /// log-moduli, always plain-double-sized) round-trips cleanly through
    /// `f64`; values too large to survive the round trip saturate to the
    /// tier's sentinel rather than silently wrapping.
    fn exp(&self) -> Self {
        let x = self.to_f64();
        if x.is_finite() {
            Dpe::from_f64(x.exp())
        } else if x > 0.0 {
            Dpe::max_value()
        } else {
            Dpe::min_positive()
        }
    }

    /// Exact: halve the exponent, absorbing the odd bit into the mantissa
    /// before taking its square root so the exponent division stays exact.
    fn sqrt(&self) -> Self {
        if self.mantissa <= 0.0 {
            return Dpe::zero();
        }
        let (m, e) = if self.exponent % 2 != 0 {
            (self.mantissa * 2.0, self.exponent - 1)
        } else {
            (self.mantissa, self.exponent)
        };
        Dpe::normalize(m.sqrt(), e / 2)
    }

    fn is_finite(&self) -> bool {
        self.mantissa.is_finite()
    }

    fn min_positive() -> Self {
        Dpe {
            mantissa: 0.5,
            exponent: i64::MIN + 1,
        }
    }

    fn max_value() -> Self {
        Dpe {
            mantissa: 1.0 - f64::EPSILON,
            exponent: i64::MAX - 1,
        }
    }
}
