//! linalg::spd — Cholesky-based solves and inverses for SPD matrices.
//!
//! Purpose
//! -------
//! Wrap `nalgebra`'s Cholesky factorisation behind an `ndarray`-facing type
//! so that every symmetric positive-definite solve and inverse in the BVAR
//! update and sampler goes through one guarded code path.
//!
//! Key behaviors
//! -------------
//! - Copy `ndarray` matrices into `nalgebra::DMatrix` ([`to_dmatrix`]) and
//!   back ([`to_array2`]).
//! - Symmetrise inputs before factorising ([`symmetrize`]), so tiny
//!   floating-point asymmetry never decides whether a factorisation succeeds.
//! - Reject factorisations whose pivots are non-finite or whose
//!   equilibrated pivots `L_ii² / A_ii` drop below [`SPD_RCOND_EPS`].
//!   Diagonal scaling alone never triggers a rejection.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs to [`SpdFactor::new`] are square; the factor records the name of
//!   the matrix it came from so that failures can be reported precisely.
//! - Inverses returned by [`SpdFactor::inverse`] are symmetrised.
//!
//! Conventions
//! -----------
//! - `L` denotes the lower-triangular Cholesky factor with `A = L Lᵀ`.
//! - No explicit general-purpose inverse is ever formed; everything is a
//!   triangular solve against the factor.
use crate::bvar::errors::{BVARError, BVARResult};
use nalgebra::{Cholesky, DMatrix, Dyn};
use ndarray::{Array2, ArrayView2};
use tracing::warn;

/// Lower bound on the equilibrated pivots `L_ii² / A_ii` of a Cholesky
/// factor.
///
/// `L_ii² / A_ii` equals `1 − R²_i`, where `R²_i` is the squared multiple
/// correlation of variable `i` on variables `0..i`. The ratio is unchanged
/// when `A` is rescaled to `D A D` for a positive diagonal `D`, so variables
/// measured in very different units are not rejected. Below machine epsilon,
/// variable `i` is a linear combination of the earlier ones to working
/// precision.
pub const SPD_RCOND_EPS: f64 = f64::EPSILON;

pub(crate) const ILL_CONDITIONED: &str =
    "Matrix is numerically singular: a pivot vanishes relative to its diagonal entry.";

/// SpdFactor — Cholesky factor of a symmetric positive-definite matrix.
///
/// Purpose
/// -------
/// Factor `A = L Lᵀ` once and reuse it for solves, inverses and as a square
/// root in random-variate generation.
///
/// Fields
/// ------
/// - `chol`: `Cholesky<f64, Dyn>`
///   `nalgebra` factorisation of the symmetrised input.
/// - `source`: `Array2<f64>`
///   The symmetrised matrix that was factored.
/// - `name`: `&'static str`
///   Matrix label used in error messages.
///
/// Invariants
/// ----------
/// - All pivots `L_ii` are finite and strictly positive.
/// - `min_i L_ii² / A_ii ≥ SPD_RCOND_EPS`.
#[derive(Debug, Clone)]
pub struct SpdFactor {
    chol: Cholesky<f64, Dyn>,
    source: Array2<f64>,
    name: &'static str,
}

impl SpdFactor {
    /// Factor a symmetric positive-definite matrix.
    ///
    /// Parameters
    /// ----------
    /// - `a`: `&Array2<f64>`
    ///   Square matrix expected to be SPD. It is symmetrised before
    ///   factorisation.
    /// - `name`: `&'static str`
    ///   Label reported in errors (e.g. `"xprime_x"`).
    ///
    /// Returns
    /// -------
    /// `BVARResult<SpdFactor>`
    ///
    /// Errors
    /// ------
    /// - `BVARError::DimensionMismatch`
    ///   `a` is not square.
    /// - `BVARError::NumericalInstability`
    ///   The factorisation fails, produces non-finite pivots, or an
    ///   equilibrated pivot `L_ii² / A_ii` falls below [`SPD_RCOND_EPS`].
    pub fn new(a: &Array2<f64>, name: &'static str) -> BVARResult<Self> {
        let (rows, cols) = a.dim();
        if rows != cols {
            return Err(BVARError::DimensionMismatch {
                matrix: name,
                expected: (rows, rows),
                found: (rows, cols),
                reason: "Cholesky factorisation requires a square matrix.",
            });
        }

        let mut source = a.to_owned();
        symmetrize(&mut source);

        let chol = match Cholesky::new(to_dmatrix(&source.view())) {
            Some(chol) => chol,
            None => {
                warn!(matrix = name, dim = rows, "Cholesky factorisation failed");
                return Err(BVARError::NumericalInstability {
                    matrix: name,
                    reason: "Cholesky factorisation failed; matrix is not positive-definite.",
                });
            }
        };

        let pivots = chol.l_dirty().diagonal();
        if pivots.iter().any(|v| !v.is_finite()) {
            warn!(matrix = name, dim = rows, "Cholesky factor has non-finite pivots");
            return Err(BVARError::NumericalInstability {
                matrix: name,
                reason: "Cholesky factor has non-finite pivots.",
            });
        }
        // L_ii² / A_ii is the share of variable i left unexplained by
        // variables 0..i; it does not change under diagonal rescaling.
        let min_ratio = pivots
            .iter()
            .zip(source.diag().iter())
            .map(|(l, a)| l * l / a)
            .fold(f64::INFINITY, f64::min);
        if min_ratio < SPD_RCOND_EPS {
            warn!(matrix = name, min_ratio, "Cholesky factor is numerically singular");
            return Err(BVARError::NumericalInstability { matrix: name, reason: ILL_CONDITIONED });
        }

        Ok(SpdFactor { chol, source, name })
    }

    /// Dimension of the factored matrix.
    pub fn dim(&self) -> usize {
        self.source.nrows()
    }

    /// Label of the factored matrix.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The symmetrised matrix that was factored.
    pub fn matrix(&self) -> &Array2<f64> {
        &self.source
    }

    /// Solve `A X = B` for `X`.
    ///
    /// Errors
    /// ------
    /// - `BVARError::DimensionMismatch` when `b.nrows() != self.dim()`.
    pub fn solve(&self, b: &Array2<f64>) -> BVARResult<Array2<f64>> {
        if b.nrows() != self.dim() {
            return Err(BVARError::DimensionMismatch {
                matrix: self.name,
                expected: (self.dim(), b.ncols()),
                found: b.dim(),
                reason: "Right-hand side must have as many rows as the factored matrix.",
            });
        }
        let x = self.chol.solve(&to_dmatrix(&b.view()));
        Ok(to_array2(&x))
    }

    /// Symmetrised inverse `A⁻¹`.
    pub fn inverse(&self) -> Array2<f64> {
        let mut inv = to_array2(&self.chol.inverse());
        symmetrize(&mut inv);
        inv
    }

    /// Lower-triangular factor `L` as an `ndarray` matrix.
    pub fn lower(&self) -> Array2<f64> {
        to_array2(&self.chol.l())
    }

    /// Lower-triangular factor `L` as a `nalgebra` matrix.
    pub fn lower_dmatrix(&self) -> DMatrix<f64> {
        self.chol.l()
    }

    /// `ln |A|`, computed as `2 Σ ln L_ii`.
    pub fn ln_det(&self) -> f64 {
        2.0 * self.chol.l_dirty().diagonal().iter().map(|v| v.ln()).sum::<f64>()
    }
}

/// Average a square matrix with its transpose in place.
///
/// Off-diagonal pairs `(i, j)` and `(j, i)` are both replaced by their mean;
/// the diagonal is left untouched.
pub fn symmetrize(a: &mut Array2<f64>) {
    let n = a.nrows().min(a.ncols());
    for i in 0..n {
        for j in (i + 1)..n {
            let avg = 0.5 * (a[[i, j]] + a[[j, i]]);
            a[[i, j]] = avg;
            a[[j, i]] = avg;
        }
    }
}

/// Copy an `ndarray` view into a column-major `nalgebra::DMatrix`.
pub fn to_dmatrix(a: &ArrayView2<f64>) -> DMatrix<f64> {
    DMatrix::from_fn(a.nrows(), a.ncols(), |i, j| a[[i, j]])
}

/// Copy a `nalgebra::DMatrix` into a standard-layout `Array2`.
pub fn to_array2(m: &DMatrix<f64>) -> Array2<f64> {
    Array2::from_shape_fn((m.nrows(), m.ncols()), |(i, j)| m[(i, j)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{Array2, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Round trips through the ndarray <-> nalgebra bridge.
    // - Solves, inverses and factors for small SPD matrices with known
    //   answers.
    // - Rejection of indefinite, non-square and ill-conditioned inputs.
    //
    // They intentionally DO NOT cover:
    // - BVAR-specific matrices; those are exercised in the update tests.
    // -------------------------------------------------------------------------

    fn assert_matrices_close(a: &Array2<f64>, b: &Array2<f64>, tol: f64) {
        assert_eq!(a.shape(), b.shape(), "shape mismatch: {:?} vs {:?}", a.shape(), b.shape());
        for ((i, j), v) in a.indexed_iter() {
            assert_relative_eq!(*v, b[[i, j]], epsilon = tol, max_relative = tol);
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that the bridge helpers preserve every entry and the shape of
    // a non-square matrix.
    //
    // Given
    // -----
    // - A 2x3 matrix with distinct entries.
    //
    // Expect
    // ------
    // - `to_array2(to_dmatrix(a)) == a` exactly.
    fn bridge_round_trip_preserves_entries() {
        // Arrange
        let a = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];

        // Act
        let m = to_dmatrix(&a.view());
        let back = to_array2(&m);

        // Assert
        assert_eq!(m[(1, 2)], 6.0);
        assert_eq!(back, a);
    }

    #[test]
    // Purpose
    // -------
    // Check solve, inverse, lower factor and log-determinant on a 2x2 SPD
    // matrix with closed-form answers.
    //
    // Given
    // -----
    // - A = [[4, 2], [2, 3]], det(A) = 8.
    //
    // Expect
    // ------
    // - A⁻¹ = [[3, -2], [-2, 4]] / 8.
    // - solve(A, A) = I.
    // - L Lᵀ = A and ln|A| = ln 8.
    fn spd_factor_matches_closed_form_two_by_two() {
        // Arrange
        let a = array![[4.0, 2.0], [2.0, 3.0]];

        // Act
        let factor = SpdFactor::new(&a, "a").unwrap();
        let inv = factor.inverse();
        let solved = factor.solve(&a).unwrap();
        let l = factor.lower();

        // Assert
        assert_matrices_close(&inv, &(array![[3.0, -2.0], [-2.0, 4.0]] / 8.0), 1e-12);
        assert_matrices_close(&solved, &Array2::eye(2), 1e-12);
        assert_matrices_close(&l.dot(&l.t()), &a, 1e-12);
        assert_eq!(l[[0, 1]], 0.0);
        assert_relative_eq!(factor.ln_det(), 8.0_f64.ln(), epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Ensure that slight asymmetry is averaged away before factorising.
    //
    // Given
    // -----
    // - A matrix whose off-diagonals differ by 1e-12.
    //
    // Expect
    // ------
    // - Factorisation succeeds and the stored source is exactly symmetric.
    fn spd_factor_symmetrizes_near_symmetric_input() {
        // Arrange
        let a = array![[2.0, 0.5 + 1e-12], [0.5, 1.0]];

        // Act
        let factor = SpdFactor::new(&a, "a").unwrap();

        // Assert
        assert_eq!(factor.matrix()[[0, 1]], factor.matrix()[[1, 0]]);
    }

    #[test]
    // Purpose
    // -------
    // Verify that indefinite matrices are reported as numerical
    // instability naming the matrix.
    //
    // Given
    // -----
    // - A symmetric matrix with eigenvalues 3 and -1.
    //
    // Expect
    // ------
    // - `NumericalInstability { matrix: "xprime_x", .. }`.
    fn spd_factor_rejects_indefinite_matrix() {
        // Arrange
        let a = array![[1.0, 2.0], [2.0, 1.0]];

        // Act
        let err = SpdFactor::new(&a, "xprime_x").unwrap_err();

        // Assert
        assert!(
            matches!(err, BVARError::NumericalInstability { matrix: "xprime_x", .. }),
            "Got: {err:?}"
        );
    }

    #[test]
    // Purpose
    // -------
    // Verify that a numerically singular matrix is rejected even when its
    // variables are on very different scales.
    //
    // Given
    // -----
    // - D [[1, 1], [1, 1 + 2⁻⁵²]] D with D = diag(2¹³, 2⁻¹³). Every step of
    //   the factorisation is exact in binary floating point and the second
    //   equilibrated pivot is 2⁻⁵² / (1 + 2⁻⁵²) < ε.
    //
    // Expect
    // ------
    // - `NumericalInstability` naming the matrix.
    fn spd_factor_rejects_numerically_singular_matrix() {
        // Arrange
        let d0 = 2f64.powi(13);
        let d1 = 2f64.powi(-13);
        let a = array![[d0 * d0, d0 * d1], [d0 * d1, d1 * d1 * (1.0 + f64::EPSILON)]];

        // Act
        let res = SpdFactor::new(&a, "a");

        // Assert
        assert!(matches!(res, Err(BVARError::NumericalInstability { matrix: "a", .. })));
    }

    #[test]
    // Purpose
    // -------
    // Ensure the conditioning check ignores diagonal scaling: a solve
    // against diag(d) is exact whatever the spread of d.
    //
    // Given
    // -----
    // - diag(1e8, 1e-8), and [[4, 2], [2, 3]] rescaled by diag(1e6, 1e-6).
    //
    // Expect
    // ------
    // - Both factor; the inverse of the diagonal matrix is diag(1e-8, 1e8)
    //   and L Lᵀ reproduces every entry of the rescaled matrix to relative
    //   precision.
    fn spd_factor_accepts_widely_scaled_matrices() {
        // Arrange
        let diag = array![[1e8, 0.0], [0.0, 1e-8]];
        let d = array![1e6, 1e-6];
        let base = array![[4.0, 2.0], [2.0, 3.0]];
        let scaled = Array2::from_shape_fn((2, 2), |(i, j)| d[i] * base[[i, j]] * d[j]);

        // Act
        let diag_factor = SpdFactor::new(&diag, "psi_prior").unwrap();
        let scaled_factor = SpdFactor::new(&scaled, "xprime_x").unwrap();

        // Assert
        let inv = diag_factor.inverse();
        assert_relative_eq!(inv[[0, 0]], 1e-8, max_relative = 1e-12);
        assert_relative_eq!(inv[[1, 1]], 1e8, max_relative = 1e-12);
        assert_eq!(inv[[0, 1]], 0.0);
        let l = scaled_factor.lower();
        for ((i, j), v) in l.dot(&l.t()).indexed_iter() {
            assert_relative_eq!(*v, scaled[[i, j]], epsilon = 0.0, max_relative = 1e-12);
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure non-square inputs and mismatched right-hand sides are reported
    // as dimension errors.
    //
    // Given
    // -----
    // - A 2x3 matrix, and a valid 2x2 factor solved against a 3x1 rhs.
    //
    // Expect
    // ------
    // - `DimensionMismatch` in both cases.
    fn spd_factor_reports_dimension_errors() {
        // Arrange
        let rect = Array2::<f64>::zeros((2, 3));
        let factor = SpdFactor::new(&Array2::eye(2), "eye").unwrap();
        let rhs = Array2::<f64>::ones((3, 1));

        // Act
        let err_rect = SpdFactor::new(&rect, "rect").unwrap_err();
        let err_rhs = factor.solve(&rhs).unwrap_err();

        // Assert
        assert!(matches!(err_rect, BVARError::DimensionMismatch { .. }));
        assert!(matches!(err_rhs, BVARError::DimensionMismatch { .. }));
    }
}
