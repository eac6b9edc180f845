//! Normal-Inverse-Wishart prior hyperparameters.
//!
//! Purpose
//! -------
//! Represent the conjugate prior
//! `Σ ~ IW(Ψ_prior, ν_prior)`, `vec(B) | Σ ~ N(vec(B_prior), Σ ⊗ Ω_prior)`
//! as a validated, immutable value.
//!
//! Key behaviors
//! -------------
//! - [`NIWPrior::new`] checks shapes, finiteness, `ν_prior > n − 1`, and
//!   positive-definiteness of `Ω_prior` and `Ψ_prior`.
//! - [`NIWPrior::diffuse`] builds the common zero-mean prior with
//!   `Ω_prior = scale · I_k` and `Ψ_prior = I_n`.
//!
//! Invariants & assumptions
//! ------------------------
//! - `B_prior` is `k×n`, `Ω_prior` is `k×k`, `Ψ_prior` is `n×n`.
//! - `ν_prior > n − 1` makes the prior proper; `ν_prior > n + 1` is further
//!   required for `E[Σ]` to exist but is not enforced.
//! - Whether `k` decomposes as `n·p + 1` depends on the data and is checked
//!   when the prior meets the data in the posterior update.
use crate::bvar::{
    core::{
        shape::VARShape,
        validation::{ensure_finite, ensure_shape, ensure_spd_hyperparameter, ensure_wishart_df},
    },
    errors::{BVARError, BVARResult},
};
use ndarray::Array2;

/// `NIWPrior` — validated NIW prior hyperparameters.
///
/// Fields
/// ------
/// - `b_prior`: `k×n` prior mean of the coefficient matrix.
/// - `omega_prior`: `k×k` SPD prior row covariance of `B`.
/// - `psi_prior`: `n×n` SPD Inverse-Wishart scale.
/// - `df_prior`: Inverse-Wishart degrees of freedom, `> n − 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct NIWPrior {
    b_prior: Array2<f64>,
    omega_prior: Array2<f64>,
    psi_prior: Array2<f64>,
    df_prior: f64,
}

impl NIWPrior {
    /// Validate and bundle prior hyperparameters.
    ///
    /// Parameters
    /// ----------
    /// - `b_prior`: `Array2<f64>`, `k×n`.
    /// - `omega_prior`: `Array2<f64>`, `k×k`, SPD.
    /// - `psi_prior`: `Array2<f64>`, `n×n`, SPD.
    /// - `df_prior`: `f64`, finite and `> n − 1`.
    ///
    /// Errors
    /// ------
    /// - `BVARError::DimensionMismatch` for any shape violation, checked in
    ///   the order `b_prior`, `omega_prior`, `psi_prior`.
    /// - `BVARError::InvalidHyperparameter` if `df_prior ≤ n − 1` or is not
    ///   finite, or if `omega_prior` / `psi_prior` is not SPD.
    /// - `BVARError::NonFiniteInput` for NaN/±∞ entries.
    pub fn new(
        b_prior: Array2<f64>, omega_prior: Array2<f64>, psi_prior: Array2<f64>, df_prior: f64,
    ) -> BVARResult<Self> {
        let (k, n) = b_prior.dim();
        if k == 0 || n == 0 {
            return Err(BVARError::DimensionMismatch {
                matrix: "b_prior",
                expected: (k.max(1), n.max(1)),
                found: (k, n),
                reason: "B_prior must have at least one row and one column.",
            });
        }
        ensure_shape("omega_prior", &omega_prior, (k, k), "Omega_prior must be k x k.")?;
        ensure_shape("psi_prior", &psi_prior, (n, n), "Psi_prior must be n x n.")?;
        ensure_wishart_df("df_prior", df_prior, n)?;

        ensure_finite("b_prior", &b_prior)?;
        ensure_finite("omega_prior", &omega_prior)?;
        ensure_finite("psi_prior", &psi_prior)?;

        ensure_spd_hyperparameter("omega_prior", &omega_prior)?;
        ensure_spd_hyperparameter("psi_prior", &psi_prior)?;

        Ok(NIWPrior { b_prior, omega_prior, psi_prior, df_prior })
    }

    /// Zero-mean prior with `Ω_prior = scale · I_k` and `Ψ_prior = I_n`.
    ///
    /// Large `scale` makes the coefficient prior diffuse, so the posterior
    /// mean approaches the least-squares estimate.
    ///
    /// Errors
    /// ------
    /// - `BVARError::InvalidHyperparameter` if `scale` is not finite and
    ///   strictly positive, or if `df_prior ≤ n − 1`.
    /// - `BVARError::DimensionMismatch` if `n == 0`.
    pub fn diffuse(n: usize, p: usize, scale: f64, df_prior: f64) -> BVARResult<Self> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(BVARError::InvalidHyperparameter {
                name: "scale",
                value: Some(scale),
                reason: "Prior scale must be finite and strictly positive.",
            });
        }
        let VARShape { k, .. } = VARShape::new(n, p)?;
        NIWPrior::new(
            Array2::zeros((k, n)),
            Array2::eye(k) * scale,
            Array2::eye(n),
            df_prior,
        )
    }

    pub fn b_prior(&self) -> &Array2<f64> {
        &self.b_prior
    }

    pub fn omega_prior(&self) -> &Array2<f64> {
        &self.omega_prior
    }

    pub fn psi_prior(&self) -> &Array2<f64> {
        &self.psi_prior
    }

    pub fn df_prior(&self) -> f64 {
        self.df_prior
    }

    /// Regressor count `k` (rows of `B_prior`).
    pub fn k(&self) -> usize {
        self.b_prior.nrows()
    }

    /// Variable count `n` (columns of `B_prior`).
    pub fn n(&self) -> usize {
        self.b_prior.ncols()
    }
}
