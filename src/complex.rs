//! A complex number generic over [`Scalar`].
//!
//! `num_complex::Complex<T>` requires `T: Clone + Num`, and `Num` in turn
//! requires `Rem`, which neither [`Dpe`](crate::number::Dpe) nor
//! [`MpFloat`](crate::number::MpFloat) can sensibly implement. `Cplx<S>`
//! carries only the operations the placement and restart code actually
//! need. At the double tier, where `num_complex::Complex<f64>` is exactly
//! the right type and already the corpus convention, conversions are
//! provided at the boundary instead of threading `Cplx<f64>` through public
//! signatures.

use crate::number::Scalar;
use num_complex::Complex64;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Cplx<S: Scalar> {
    pub re: S,
    pub im: S,
}

impl<S: Scalar> Cplx<S> {
    pub fn new(re: S, im: S) -> Self {
        Cplx { re, im }
    }

    pub fn zero() -> Self {
        Cplx::new(S::zero(), S::zero())
    }

    pub fn from_real(re: S) -> Self {
        Cplx::new(re, S::zero())
    }

    pub fn from_polar(modulus: S, phase_radians: f64) -> Self {
        Cplx::new(
            modulus.mul(&S::from_f64(phase_radians.cos())),
            modulus.mul(&S::from_f64(phase_radians.sin())),
        )
    }

    pub fn add(&self, rhs: &Self) -> Self {
        Cplx::new(self.re.add(&rhs.re), self.im.add(&rhs.im))
    }

    pub fn sub(&self, rhs: &Self) -> Self {
        Cplx::new(self.re.sub(&rhs.re), self.im.sub(&rhs.im))
    }

    pub fn mul(&self, rhs: &Self) -> Self {
        let re = self.re.mul(&rhs.re).sub(&self.im.mul(&rhs.im));
        let im = self.re.mul(&rhs.im).add(&self.im.mul(&rhs.re));
        Cplx::new(re, im)
    }

    pub fn div(&self, rhs: &Self) -> Self {
        let denom = rhs.re.mul(&rhs.re).add(&rhs.im.mul(&rhs.im));
        let re = self.re.mul(&rhs.re).add(&self.im.mul(&rhs.im)).div(&denom);
        let im = self.im.mul(&rhs.re).sub(&self.re.mul(&rhs.im)).div(&denom);
        Cplx::new(re, im)
    }

    pub fn neg(&self) -> Self {
        Cplx::new(self.re.neg(), self.im.neg())
    }

    pub fn conj(&self) -> Self {
        Cplx::new(self.re.clone(), self.im.neg())
    }

    pub fn norm_sqr(&self) -> S {
        self.re.mul(&self.re).add(&self.im.mul(&self.im))
    }

    pub fn modulus(&self) -> S {
        self.norm_sqr().sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.re.is_finite() && self.im.is_finite()
    }

    pub fn raise_precision(&mut self, working_precision: usize) {
        self.re.raise_precision(working_precision);
        self.im.raise_precision(working_precision);
    }
}

impl<S: Scalar> fmt::Display for Cplx<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?} + {:?}i)", self.re, self.im)
    }
}

impl Cplx<f64> {
    pub fn to_complex64(&self) -> Complex64 {
        Complex64::new(self.re, self.im)
    }

    pub fn from_complex64(z: Complex64) -> Self {
        Cplx::new(z.re, z.im)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_ops_double() {
        let a = Cplx::new(1.0_f64, 2.0);
        let b = Cplx::new(3.0_f64, -1.0);
        assert_eq!(a.add(&b), Cplx::new(4.0, 1.0));
        assert_eq!(a.mul(&b), Cplx::new(5.0, 5.0));
    }

    #[test]
    fn test_modulus() {
        let z = Cplx::new(3.0_f64, 4.0);
        assert!((z.modulus() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_from_polar() {
        let z: Cplx<f64> = Cplx::from_polar(2.0, 0.0);
        assert!((z.re - 2.0).abs() < 1e-12);
        assert!(z.im.abs() < 1e-12);
    }

    #[test]
    fn test_complex64_roundtrip() {
        let z = Cplx::new(1.5_f64, -2.5);
        let c = z.to_complex64();
        let back = Cplx::from_complex64(c);
        assert_eq!(z, back);
    }
}
