//! Shift / Horner deflation (C6, §4.6).
//!
//! Computes the first `m+1` coefficients of `p(x+g)` by iterated Horner
//! division. The generic form is used at the double and DPE tiers; the
//! multiprecision tier additionally adapts its working precision until the
//! constant term carries at least one correct bit, per §4.6's adaptive
//! precision pass.

use crate::complex::Cplx;
use crate::number::{MpFloat, Scalar};

/// Computes `c[0..=m]`, the first `m+1` coefficients of `p(x+g)`, via
/// repeated synthetic division (§4.6's `b`/`c` recurrence). `a` holds the
/// full `n+1` coefficients of `p`, constant term first.
pub fn horner_shift<S: Scalar>(a: &[Cplx<S>], g: &Cplx<S>, m: usize) -> Vec<Cplx<S>> {
    let n = a.len() - 1;
    let mut b: Vec<Cplx<S>> = a.to_vec();
    let mut c: Vec<Cplx<S>> = Vec::with_capacity(m + 1);

    for i in 0..=m.min(n) {
        for j in (i..n).rev() {
            b[j] = if i == 0 {
                b[j + 1].mul(g).add(&a[j])
            } else {
                b[j + 1].mul(g).add(&b[j])
            };
        }
        c.push(b[i].clone());
    }
    c
}

/// Result of the multiprecision adaptive-precision shift.
pub struct MpShiftResult {
    pub coeffs: Vec<Cplx<MpFloat>>,
    /// True if the final first-pass attempt still failed the correct-bit
    /// test, so Placer should treat `coeffs` moduli as degenerate (§7:
    /// "flag its moduli for Placer as uniformly `|c[0]|`").
    pub degenerate: bool,
}

/// §4.6, multiprecision variant: re-tries the first Horner pass at
/// successively higher working precision until `|c[0]|` clears its own
/// forward-error bound, then lets later passes relax back down.
pub fn horner_shift_adaptive(
    a: &[Cplx<MpFloat>],
    g: &Cplx<MpFloat>,
    m: usize,
    base_wp: usize,
    prec_out: usize,
    wp_max_so_far: usize,
) -> MpShiftResult {
    let n = a.len() - 1;
    let wp_cap = wp_max_so_far.max(prec_out * m.max(1) * 2);
    let mut wp = base_wp;

    let mut a_wp: Vec<Cplx<MpFloat>> = a.to_vec();
    let mut b: Vec<Cplx<MpFloat>>;
    let mut c0: Cplx<MpFloat>;
    let mut converged;

    loop {
        for c in a_wp.iter_mut() {
            c.raise_precision(wp);
        }
        b = a_wp.clone();
        for j in (0..n).rev() {
            b[j] = b[j + 1].mul(g).add(&a_wp[j]);
        }
        c0 = b[0].clone();

        let bound = error_bound(&a_wp, g, n, wp);
        converged = c0.modulus().to_f64() > bound;

        if converged || wp >= wp_cap {
            break;
        }
        wp = (wp + base_wp).min(wp_cap);
    }

    let mut c = vec![c0.clone()];
    let mut wp_i = wp;
    for i in 1..=m.min(n) {
        wp_i = wp_i.saturating_sub(base_wp).max(base_wp);
        for j in (i..n).rev() {
            b[j] = b[j + 1].mul(g).add(&b[j]);
        }
        let mut c_i = b[i].clone();
        c_i.raise_precision(wp_i);
        c.push(c_i);
    }

    for v in c.iter_mut() {
        v.raise_precision(base_wp);
    }

    MpShiftResult {
        degenerate: !converged,
        coeffs: c,
    }
}

/// `4(n+1) * eps_wp * sum_j j*|g|^(n-j)*|a_j|`, the forward-error bound on
/// `c[0]` from §4.6.
fn error_bound(a: &[Cplx<MpFloat>], g: &Cplx<MpFloat>, n: usize, wp: usize) -> f64 {
    let eps_wp = 2f64.powi(-(wp as i32));
    let g_mod = g.modulus().to_f64();
    let mut sum = 0.0;
    for (j, coeff) in a.iter().enumerate().take(n + 1) {
        sum += (j as f64) * g_mod.powi((n - j) as i32) * coeff.modulus().to_f64();
    }
    4.0 * ((n + 1) as f64) * eps_wp * sum
}
