//! Gram matrices and the Moore–Penrose pseudo-inverse
//!
//! The normal equations of an ALS update involve the Hadamard product of
//! Gram matrices, which becomes singular as soon as two components coincide
//! or a rank exceeds a mode size. The pseudo-inverse keeps those updates
//! well defined: singular directions are dropped instead of reported.
//!
//! # SciRS2 Integration
//!
//! The SVD comes from `scirs2_linalg`.

use crate::error::{KernelError, KernelResult};
use crate::utils::frobenius_norm;
use scirs2_core::ndarray_ext::{Array2, ArrayView2, ScalarOperand};
use scirs2_core::numeric::{Float, NumAssign};
use scirs2_linalg::{inv, svd};
use std::iter::Sum;

/// Default relative cutoff for small singular values in [`pinv`]
pub const DEFAULT_PINV_RCOND: f64 = 1e-15;

/// Gram matrix `AᵀA`
///
/// For an (m × n) matrix the result is the symmetric (n × n) matrix of column
/// inner products.
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::array;
/// use parafac_kernels::gram;
///
/// let a = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
/// let g = gram(&a.view());
/// assert_eq!(g, array![[35.0, 44.0], [44.0, 56.0]]);
/// ```
pub fn gram<T>(a: &ArrayView2<T>) -> Array2<T>
where
    T: Float + 'static,
{
    a.t().dot(a)
}

/// Iteration cap of the Newton–Schulz fallback in [`pinv`]
const NEWTON_SCHULZ_MAX_ITERS: usize = 100;

/// Moore–Penrose pseudo-inverse
///
/// For `A = U Σ Vᵀ` returns `V Σ⁺ Uᵀ`, where singular values at or below
/// `rcond * σ_max` are treated as zero. An (m × n) input gives an (n × m)
/// result. Singular, rank-deficient and all-zero inputs are valid; the
/// all-zero matrix maps to zeros.
///
/// Every candidate is checked against the Penrose conditions `A A⁺ A = A`
/// and `A⁺ A A⁺ = A⁺` before it is returned. The candidates, in order:
///
/// 1. diagonal input is inverted entry by entry
/// 2. truncated SVD from `scirs2_linalg::svd`
/// 3. `scirs2_linalg::inv` for square input
/// 4. Newton–Schulz iteration `X ← 2X − X A X` from `X₀ = Aᵀ / ‖A‖²_F`
///
/// The SVD is computed from an eigendecomposition of `AᵀA`, which can
/// return a non-orthogonal basis when singular values coincide (the identity
/// is the simplest case), hence the check. Paths 3 and 4 do not apply the
/// `rcond` cutoff. If no candidate passes, the one with the smallest Penrose
/// residual is returned.
///
/// # Errors
///
/// [`KernelError::OperationError`] if the input holds non-finite values.
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::{array, Array2};
/// use parafac_kernels::{pinv, DEFAULT_PINV_RCOND};
///
/// // Singular matrix: rank 1
/// let a = array![[1.0, 1.0], [1.0, 1.0]];
/// let p = pinv(&a.view(), DEFAULT_PINV_RCOND).unwrap();
/// for &x in p.iter() {
///     assert!((x - 0.25_f64).abs() < 1e-12);
/// }
///
/// // Repeated singular values
/// let eye = Array2::<f64>::eye(2);
/// assert_eq!(pinv(&eye.view(), DEFAULT_PINV_RCOND).unwrap(), eye);
/// ```
pub fn pinv<T>(a: &ArrayView2<T>, rcond: f64) -> KernelResult<Array2<T>>
where
    T: Float
        + NumAssign
        + Sum
        + ScalarOperand
        + Send
        + Sync
        + std::fmt::Debug
        + std::fmt::Display
        + 'static,
{
    let (m, n) = a.dim();

    if a.iter().any(|x| !x.is_finite()) {
        return Err(KernelError::operation_error(
            "pinv",
            "input contains non-finite values",
        ));
    }
    // rcond >= 1 cuts every singular value
    if m == 0 || n == 0 || rcond >= 1.0 || a.iter().all(|x| x.is_zero()) {
        return Ok(Array2::<T>::zeros((n, m)));
    }

    let rcond = T::from(rcond).unwrap_or_else(T::epsilon);
    if is_diagonal(a) {
        return Ok(diagonal_pinv(a, rcond));
    }

    let k = T::from(m.min(n)).unwrap_or_else(T::one);
    let two = T::one() + T::one();
    let tol = T::epsilon().sqrt().max(two * k.sqrt() * rcond);

    let mut best: Option<(T, Array2<T>)> = None;
    let mut consider = |candidate: Array2<T>| -> Option<Array2<T>> {
        let residual = penrose_residual(a, &candidate.view());
        let residual = if residual.is_finite() { residual } else { T::infinity() };
        if residual <= tol {
            return Some(candidate);
        }
        if best.as_ref().map_or(true, |(r, _)| residual < *r) {
            best = Some((residual, candidate));
        }
        None
    };

    if let Some(p) = svd_pinv(a, rcond).and_then(&mut consider) {
        return Ok(p);
    }
    if m == n {
        if let Some(p) = inv(a, None).ok().and_then(&mut consider) {
            return Ok(p);
        }
    }
    if let Some(p) = consider(newton_schulz_pinv(a, tol)) {
        return Ok(p);
    }

    best.map(|(_, p)| p).ok_or_else(|| {
        KernelError::operation_error("pinv", "no pseudo-inverse candidate could be computed")
    })
}

fn is_diagonal<T: Float>(a: &ArrayView2<T>) -> bool {
    a.indexed_iter().all(|((i, j), x)| i == j || x.is_zero())
}

/// Pseudo-inverse of a (possibly rectangular) diagonal matrix
fn diagonal_pinv<T: Float>(a: &ArrayView2<T>, rcond: T) -> Array2<T> {
    let (m, n) = a.dim();
    let k = m.min(n);
    let sigma_max = (0..k).fold(T::zero(), |acc, i| acc.max(a[[i, i]].abs()));
    let cutoff = rcond * sigma_max;

    let mut result = Array2::<T>::zeros((n, m));
    for i in 0..k {
        let d = a[[i, i]];
        if d.abs() > cutoff {
            result[[i, i]] = T::one() / d;
        }
    }
    result
}

/// Truncated SVD pseudo-inverse; `None` when the SVD fails
fn svd_pinv<T>(a: &ArrayView2<T>, rcond: T) -> Option<Array2<T>>
where
    T: Float + NumAssign + Sum + ScalarOperand + Send + Sync + 'static,
{
    let (m, n) = a.dim();
    let (u, s, vt) = svd(a, false, None).ok()?;

    let sigma_max = s.iter().fold(T::zero(), |acc, &x| acc.max(x));
    let cutoff = rcond * sigma_max;

    let mut result = Array2::<T>::zeros((n, m));
    let k = s.len().min(u.ncols()).min(vt.nrows());
    for idx in 0..k {
        if s[idx] <= cutoff {
            continue;
        }
        let inv = T::one() / s[idx];
        let v_col = vt.row(idx);
        let u_col = u.column(idx);
        for i in 0..n {
            let scaled = v_col[i] * inv;
            for j in 0..m {
                result[[i, j]] += scaled * u_col[j];
            }
        }
    }
    Some(result)
}

/// Newton–Schulz iteration, stopped as soon as the Penrose residual is
/// within `tol`; otherwise the last iterate
///
/// `X₀ = Aᵀ / ‖A‖²_F` keeps every nonzero singular value of `X₀ A` in
/// `(0, 1]`, which is sufficient for convergence to `A⁺`.
fn newton_schulz_pinv<T>(a: &ArrayView2<T>, tol: T) -> Array2<T>
where
    T: Float + ScalarOperand + 'static,
{
    let norm = frobenius_norm(a);
    let two = T::one() + T::one();
    let mut x = a.t().mapv(|v| v / (norm * norm));

    for _ in 0..NEWTON_SCHULZ_MAX_ITERS {
        let xax = x.dot(a).dot(&x);
        x = &x * two - &xax;
        if penrose_residual(a, &x.view()) <= tol {
            break;
        }
    }
    x
}

/// Larger of the relative residuals of `A P A = A` and `P A P = P`
fn penrose_residual<T>(a: &ArrayView2<T>, p: &ArrayView2<T>) -> T
where
    T: Float + 'static,
{
    let apa = a.dot(p).dot(a);
    let pap = p.dot(a).dot(p);
    let r1 = frobenius_norm(&(&apa - a).view()) / frobenius_norm(a);
    let p_norm = frobenius_norm(p);
    let r2 = if p_norm > T::zero() {
        frobenius_norm(&(&pap - p).view()) / p_norm
    } else {
        T::zero()
    };
    r1.max(r2)
}
