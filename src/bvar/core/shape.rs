//! Model order (n, p) and regressor count k for VAR models.
//!
//! - `n`: number of variables (columns of `Y`).
//! - `p`: lag order.
//! - `k = n·p + 1`: regressors per equation (intercept plus `p` lag blocks).
//!
//! The lag order is never passed explicitly to the posterior update; it is
//! recovered from the number of rows of the prior coefficient mean.
use crate::bvar::errors::{BVARError, BVARResult};

/// Order of a VAR(p) in n variables.
///
/// Invariant: `k == n·p + 1` and `n ≥ 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VARShape {
    pub n: usize,
    pub p: usize,
    pub k: usize,
}

impl VARShape {
    /// Construct a [`VARShape`] from an explicit `(n, p)`.
    ///
    /// # Errors
    /// - [`BVARError::DimensionMismatch`] if `n == 0`.
    pub fn new(n: usize, p: usize) -> BVARResult<Self> {
        if n == 0 {
            return Err(BVARError::DimensionMismatch {
                matrix: "y",
                expected: (p + 1, 1),
                found: (p + 1, 0),
                reason: "A VAR needs at least one variable.",
            });
        }
        Ok(VARShape { n, p, k: n * p + 1 })
    }

    /// Infer the lag order from `k = rows(B_prior)` and check it against the
    /// sample size.
    ///
    /// `p` is the nearest integer to `(k − 1)/n`; the shape is accepted only
    /// when `n·p + 1 == k` holds exactly.
    ///
    /// # Arguments
    /// - `t`: number of observations (rows of `Y`).
    /// - `n`: number of variables (columns of `Y`).
    /// - `k`: rows of the prior coefficient mean.
    ///
    /// # Errors
    /// - [`BVARError::DimensionMismatch`] on `y` if `n == 0`.
    /// - [`BVARError::DimensionMismatch`] on `b_prior` if `k` does not
    ///   decompose as `n·p + 1` (including `k == 0`).
    /// - [`BVARError::DimensionMismatch`] on `y` if `t ≤ p`, which leaves no
    ///   rows once the first `p` observations are used as lags.
    pub fn infer(t: usize, n: usize, k: usize) -> BVARResult<Self> {
        if n == 0 {
            return Err(BVARError::DimensionMismatch {
                matrix: "y",
                expected: (t, 1),
                found: (t, 0),
                reason: "Y must have at least one variable (column).",
            });
        }

        let p = (k.saturating_sub(1) as f64 / n as f64).round() as usize;
        if k == 0 || n * p + 1 != k {
            return Err(BVARError::DimensionMismatch {
                matrix: "b_prior",
                expected: (n * p + 1, n),
                found: (k, n),
                reason: "Rows of B_prior must equal n * p + 1 for an integer lag order p.",
            });
        }

        if t <= p {
            return Err(BVARError::DimensionMismatch {
                matrix: "y",
                expected: (p + 1, n),
                found: (t, n),
                reason: "Y needs more than p observations to leave usable rows after lagging.",
            });
        }

        Ok(VARShape { n, p, k })
    }

    /// Rows of the regression once the first `p` observations are consumed
    /// as lags.
    pub fn usable_rows(&self, t: usize) -> usize {
        t.saturating_sub(self.p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Verify lag-order recovery for admissible (t, n, k).
    //
    // Given
    // -----
    // - (t, n, k) = (50, 2, 3), (50, 3, 7), (10, 4, 1).
    //
    // Expect
    // ------
    // - p = 1, 2 and 0 respectively, with k preserved.
    fn infer_recovers_lag_order() {
        assert_eq!(VARShape::infer(50, 2, 3).unwrap(), VARShape { n: 2, p: 1, k: 3 });
        assert_eq!(VARShape::infer(50, 3, 7).unwrap(), VARShape { n: 3, p: 2, k: 7 });
        assert_eq!(VARShape::infer(10, 4, 1).unwrap(), VARShape { n: 4, p: 0, k: 1 });
    }

    #[test]
    // Purpose
    // -------
    // Ensure k values that are not n·p + 1 are rejected on `b_prior`.
    //
    // Given
    // -----
    // - n = 2 with k = 4 ((k − 1) odd) and k = 0.
    //
    // Expect
    // ------
    // - `DimensionMismatch { matrix: "b_prior", .. }` for both.
    fn infer_rejects_non_decomposable_k() {
        for k in [0, 4] {
            let err = VARShape::infer(50, 2, k).unwrap_err();
            assert!(
                matches!(err, BVARError::DimensionMismatch { matrix: "b_prior", .. }),
                "k = {k}: {err:?}"
            );
        }
    }

    #[test]
    // Purpose
    // -------
    // Check the strict T > p requirement and the n ≥ 1 requirement.
    //
    // Given
    // -----
    // - t = p = 2 with n = 1, k = 3; and n = 0.
    //
    // Expect
    // ------
    // - `DimensionMismatch { matrix: "y", .. }` in both cases; t = 3 passes.
    fn infer_requires_enough_observations_and_variables() {
        assert!(matches!(
            VARShape::infer(2, 1, 3),
            Err(BVARError::DimensionMismatch { matrix: "y", .. })
        ));
        assert!(VARShape::infer(3, 1, 3).is_ok());
        assert!(matches!(
            VARShape::infer(10, 0, 1),
            Err(BVARError::DimensionMismatch { matrix: "y", .. })
        ));
    }

    #[test]
    fn new_builds_k_from_n_and_p() {
        let shape = VARShape::new(3, 4).unwrap();
        assert_eq!(shape.k, 13);
        assert_eq!(shape.usable_rows(20), 16);
        assert!(VARShape::new(0, 1).is_err());
    }
}
