//! linalg::vec — the column-major `vec` operator and its inverse.
//!
//! `vec(B)` stacks the columns of a `k×n` matrix end-to-end into a vector of
//! length `k·n`, so that entry `(i, j)` lands at position `j·k + i`. This is
//! the ordering under which `Cov(vec B) = Σ ⊗ Ω` for a matrix-variate normal
//! with row covariance `Ω` and column covariance `Σ`.
use crate::bvar::errors::{BVARError, BVARResult};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

/// Stack the columns of `m` into a single vector (column-major `vec`).
pub fn vec_col_major(m: &ArrayView2<f64>) -> Array1<f64> {
    m.t().iter().copied().collect()
}

/// Inverse of [`vec_col_major`]: rebuild a `rows×cols` matrix from a stacked
/// column vector.
///
/// Errors
/// ------
/// - `BVARError::DimensionMismatch` when `v.len() != rows · cols`.
pub fn unvec_col_major(v: &ArrayView1<f64>, rows: usize, cols: usize) -> BVARResult<Array2<f64>> {
    if v.len() != rows * cols {
        return Err(BVARError::DimensionMismatch {
            matrix: "vec",
            expected: (rows * cols, 1),
            found: (v.len(), 1),
            reason: "Stacked vector length must equal rows * cols.",
        });
    }
    Ok(Array2::from_shape_fn((rows, cols), |(i, j)| v[j * rows + i]))
}
