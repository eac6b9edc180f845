//! bvar::core::validation — shared input guards.
//!
//! Purpose
//! -------
//! Centralise the shape, finiteness, degrees-of-freedom and positive
//! definiteness checks used by the prior, posterior, updater and sampler, so
//! that every entry point fails fast with the same error semantics.
//!
//! Conventions
//! -----------
//! - Each guard takes the public name of the matrix or scalar it checks and
//!   reports it in the returned [`BVARError`].
//! - Guards never allocate beyond the error value, except
//!   [`ensure_spd_hyperparameter`], which factors the matrix.
use crate::{
    bvar::errors::{BVARError, BVARResult},
    linalg::{SpdFactor, spd::ILL_CONDITIONED},
};
use ndarray::Array2;

/// Require `m` to have shape `expected`.
///
/// Errors
/// ------
/// - `BVARError::DimensionMismatch` carrying `reason`.
pub fn ensure_shape(
    name: &'static str, m: &Array2<f64>, expected: (usize, usize), reason: &'static str,
) -> BVARResult<()> {
    if m.dim() != expected {
        return Err(BVARError::DimensionMismatch {
            matrix: name,
            expected,
            found: m.dim(),
            reason,
        });
    }
    Ok(())
}

/// Require every entry of `m` to be finite.
///
/// Errors
/// ------
/// - `BVARError::NonFiniteInput` pointing at the first offending entry in
///   row-major order.
pub fn ensure_finite(name: &'static str, m: &Array2<f64>) -> BVARResult<()> {
    match m.indexed_iter().find(|(_, v)| !v.is_finite()) {
        Some(((row, col), &value)) => {
            Err(BVARError::NonFiniteInput { matrix: name, row, col, value })
        }
        None => Ok(()),
    }
}

/// Require `df > n − 1` (and finite), the properness condition of an
/// `n`-dimensional (Inverse-)Wishart.
///
/// Errors
/// ------
/// - `BVARError::InvalidHyperparameter` with the offending value.
pub fn ensure_wishart_df(name: &'static str, df: f64, n: usize) -> BVARResult<()> {
    if !df.is_finite() {
        return Err(BVARError::InvalidHyperparameter {
            name,
            value: Some(df),
            reason: "Degrees of freedom must be finite.",
        });
    }
    if df <= n as f64 - 1.0 {
        return Err(BVARError::InvalidHyperparameter {
            name,
            value: Some(df),
            reason: "Degrees of freedom must be strictly greater than n - 1.",
        });
    }
    Ok(())
}

/// Require a hyperparameter scale matrix to be symmetric positive-definite.
///
/// Returns the factor so callers that go on to solve against the matrix do
/// not factor it twice.
///
/// Errors
/// ------
/// - `BVARError::InvalidHyperparameter` when the Cholesky factorisation
///   fails (not SPD) or leaves a vanishing equilibrated pivot (numerically
///   singular). Widely different diagonal scales are accepted.
/// - `BVARError::DimensionMismatch` if `m` is not square.
pub fn ensure_spd_hyperparameter(name: &'static str, m: &Array2<f64>) -> BVARResult<SpdFactor> {
    SpdFactor::new(m, name).map_err(|err| match err {
        BVARError::NumericalInstability { reason, .. } if reason == ILL_CONDITIONED => {
            BVARError::InvalidHyperparameter {
                name,
                value: None,
                reason: "Scale matrix is numerically singular.",
            }
        }
        BVARError::NumericalInstability { .. } => BVARError::InvalidHyperparameter {
            name,
            value: None,
            reason: "Scale matrix must be symmetric positive-definite.",
        },
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover every error branch of the guards plus a success
    // path for each.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that `ensure_shape` accepts matching shapes and reports both
    // shapes on mismatch.
    //
    // Given
    // -----
    // - A 2x3 matrix checked against (2, 3) and (3, 3).
    //
    // Expect
    // ------
    // - Ok for (2, 3); DimensionMismatch with found = (2, 3) otherwise.
    fn ensure_shape_reports_found_and_expected() {
        // Arrange
        let m = Array2::<f64>::zeros((2, 3));

        // Act
        let ok = ensure_shape("omega_prior", &m, (2, 3), "k x k");
        let err = ensure_shape("omega_prior", &m, (3, 3), "k x k").unwrap_err();

        // Assert
        assert!(ok.is_ok());
        assert_eq!(
            err,
            BVARError::DimensionMismatch {
                matrix: "omega_prior",
                expected: (3, 3),
                found: (2, 3),
                reason: "k x k",
            }
        );
    }

    #[test]
    // Purpose
    // -------
    // Ensure `ensure_finite` points at the first non-finite entry.
    //
    // Given
    // -----
    // - A matrix with +inf at (1, 0) and NaN at (1, 1).
    //
    // Expect
    // ------
    // - `NonFiniteInput { row: 1, col: 0, .. }`.
    fn ensure_finite_points_at_first_offender() {
        // Arrange
        let m = array![[1.0, 2.0], [f64::INFINITY, f64::NAN]];

        // Act
        let err = ensure_finite("y", &m).unwrap_err();

        // Assert
        assert!(
            matches!(err, BVARError::NonFiniteInput { matrix: "y", row: 1, col: 0, .. }),
            "Got: {err:?}"
        );
        assert!(ensure_finite("y", &array![[1.0]]).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Check the strict `df > n - 1` boundary and the finiteness check.
    //
    // Given
    // -----
    // - n = 2 and df in {1.0, 1.0 + 1e-9, NaN}.
    //
    // Expect
    // ------
    // - df = 1.0 (= n - 1) is rejected, df just above it is accepted, NaN is
    //   rejected.
    fn ensure_wishart_df_enforces_strict_boundary() {
        // Act / Assert
        assert!(matches!(
            ensure_wishart_df("df_prior", 1.0, 2),
            Err(BVARError::InvalidHyperparameter { name: "df_prior", .. })
        ));
        assert!(ensure_wishart_df("df_prior", 1.0 + 1e-9, 2).is_ok());
        assert!(ensure_wishart_df("df_prior", f64::NAN, 2).is_err());
    }

    #[test]
    // Purpose
    // -------
    // Verify that non-SPD scale matrices are reported as invalid
    // hyperparameters rather than numerical failures.
    //
    // Given
    // -----
    // - An indefinite 2x2 matrix and the identity.
    //
    // Expect
    // ------
    // - InvalidHyperparameter for the indefinite matrix, Ok for identity.
    fn ensure_spd_hyperparameter_maps_failures() {
        // Arrange
        let bad = array![[1.0, 3.0], [3.0, 1.0]];

        // Act
        let err = ensure_spd_hyperparameter("psi_prior", &bad).unwrap_err();

        // Assert
        assert!(matches!(err, BVARError::InvalidHyperparameter { name: "psi_prior", .. }));
        assert!(ensure_spd_hyperparameter("psi_prior", &Array2::eye(2)).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Ensure a well-posed scale matrix with widely spread diagonal entries
    // is accepted, and a singular one is reported as singular rather than
    // as indefinite.
    //
    // Given
    // -----
    // - diag(1e8, 1e-8) and the rank-one matrix [[1, 1], [1, 1]].
    //
    // Expect
    // ------
    // - Ok for the diagonal matrix.
    // - InvalidHyperparameter for the rank-one matrix.
    fn ensure_spd_hyperparameter_ignores_diagonal_scale() {
        // Arrange
        let spread = array![[1e8, 0.0], [0.0, 1e-8]];
        let rank_one = array![[1.0, 1.0], [1.0, 1.0]];

        // Act
        let ok = ensure_spd_hyperparameter("psi_prior", &spread);
        let err = ensure_spd_hyperparameter("omega_prior", &rank_one).unwrap_err();

        // Assert
        assert!(ok.is_ok(), "Got: {ok:?}");
        assert!(matches!(err, BVARError::InvalidHyperparameter { name: "omega_prior", .. }));
    }
}
