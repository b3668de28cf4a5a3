//! The polynomial data model (§3 of the specification).
//!
//! A `Polynomial<S>` carries coefficient moduli at one arithmetic tier (for
//! Radii and Placer, which only ever look at magnitudes) alongside the
//! exact complex coefficients at full multiprecision (for Shift, which
//! needs to re-derive a child polynomial's coefficients by Horner deflation
//! regardless of which tier the parent was solved at).

use crate::complex::Cplx;
use crate::config::DataType;
use crate::error::{CoreError, Result};
use crate::number::{MpFloat, Scalar};
use num_complex::Complex64;

#[derive(Debug, Clone)]
pub struct Polynomial<S: Scalar> {
    degree: usize,
    moduli: Vec<S>,
    exact: Vec<Cplx<MpFloat>>,
    data_type: DataType,
    sparse: bool,
}

impl<S: Scalar> Polynomial<S> {
    /// Builds a polynomial from its complex coefficients, ordered from the
    /// constant term (`coeffs[0]`) to the leading term (`coeffs[degree]`).
    pub fn new(degree: usize, coeffs: Vec<Complex64>, data_type: DataType) -> Result<Self> {
        if coeffs.len() != degree + 1 {
            return Err(CoreError::DegreeMismatch {
                expected: degree + 1,
                got: coeffs.len(),
            });
        }
        let moduli: Vec<S> = coeffs.iter().map(|c| S::from_f64(c.norm())).collect();
        if data_type == DataType::Known && moduli.iter().all(Scalar::is_zero) {
            return Err(CoreError::NoRepresentableLeadingCoefficient);
        }
        let sparse = moduli.iter().any(Scalar::is_zero);
        let exact = coeffs
            .iter()
            .map(|c| Cplx::new(MpFloat::from_f64(c.re), MpFloat::from_f64(c.im)))
            .collect();
        Ok(Polynomial {
            degree,
            moduli,
            exact,
            data_type,
            sparse,
        })
    }

    /// Re-derives the moduli at a different tier without re-parsing the
    /// original coefficients, used when Restart promotes a sub-problem to
    /// a higher tier (§9, tier promotion).
    pub fn retier<T: Scalar>(&self) -> Polynomial<T> {
        Polynomial {
            degree: self.degree,
            moduli: self.exact.iter().map(|c| T::from_f64(c.re.to_f64().hypot(c.im.to_f64()))).collect(),
            exact: self.exact.clone(),
            data_type: self.data_type,
            sparse: self.sparse,
        }
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn moduli(&self) -> &[S] {
        &self.moduli
    }

    pub fn modulus(&self, i: usize) -> &S {
        &self.moduli[i]
    }

    pub fn exact_coeff(&self, i: usize) -> &Cplx<MpFloat> {
        &self.exact[i]
    }

    pub fn exact_coeffs(&self) -> &[Cplx<MpFloat>] {
        &self.exact
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    pub fn is_sparse(&self) -> bool {
        self.sparse
    }

    /// The largest index with a representable (nonzero) modulus at or
    /// below `upto`. Used by Radii's leading-zero fill-in step.
    pub fn last_nonzero_at_or_below(&self, upto: usize) -> Option<usize> {
        self.moduli[..=upto].iter().rposition(|m| !m.is_zero())
    }

    /// Overrides every coefficient modulus to `value`. Used on the
    /// precision-exhaustion path of Shift (§7): when the multiprecision
    /// adaptive pass never clears its own error bound, the resulting
    /// coefficients are untrustworthy, so Radii/Placer are handed a
    /// uniform-modulus polynomial instead of the per-index values.
    pub fn flatten_moduli(&mut self, value: S) {
        for m in self.moduli.iter_mut() {
            *m = value.clone();
        }
    }
}
