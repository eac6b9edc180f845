//! Normal-Inverse-Wishart posterior hyperparameters.
//!
//! Purpose
//! -------
//! Hold the output of the conjugate update,
//! `Σ | Y ~ IW(Ψ_post, ν_post)` and
//! `vec(B) | Σ, Y ~ N(vec(B_post), Σ ⊗ Ω_post)`,
//! as an immutable value consumed (possibly many times) by the sampler.
//!
//! Key behaviors
//! -------------
//! - Built by [`crate::bvar::models::update`]; never mutated afterwards.
//! - [`NIWPosterior::new`] lets callers rebuild a posterior from stored
//!   hyperparameters, checking shapes and finiteness only. Definiteness and
//!   degrees of freedom are checked when sampling.
//! - [`NIWPosterior::sigma_mean`] gives the analytic posterior mean of `Σ`.
use crate::bvar::{
    core::validation::{ensure_finite, ensure_shape},
    errors::{BVARError, BVARResult},
};
use ndarray::Array2;

/// `NIWPosterior` — posterior hyperparameters of a BVAR under an NIW prior.
///
/// Fields
/// ------
/// - `b_post`: `k×n` posterior mean of `B`.
/// - `omega_post`: `k×k` posterior row covariance of `B` (symmetric).
/// - `psi_post`: `n×n` posterior Inverse-Wishart scale (symmetric).
/// - `df_post`: posterior degrees of freedom.
///
/// Invariants
/// ----------
/// - Shapes are mutually consistent and all entries finite.
/// - When produced by the update: `omega_post` and `psi_post` are symmetric
///   positive-definite and `df_post = df_prior + T`.
#[derive(Debug, Clone, PartialEq)]
pub struct NIWPosterior {
    b_post: Array2<f64>,
    omega_post: Array2<f64>,
    psi_post: Array2<f64>,
    df_post: f64,
}

impl NIWPosterior {
    /// Rebuild a posterior from stored hyperparameters.
    ///
    /// Errors
    /// ------
    /// - `BVARError::DimensionMismatch` if shapes are inconsistent.
    /// - `BVARError::NonFiniteInput` for NaN/±∞ entries.
    /// - `BVARError::InvalidHyperparameter` if `df_post` is not finite.
    pub fn new(
        b_post: Array2<f64>, omega_post: Array2<f64>, psi_post: Array2<f64>, df_post: f64,
    ) -> BVARResult<Self> {
        let (k, n) = b_post.dim();
        ensure_shape("omega_post", &omega_post, (k, k), "Omega_post must be k x k.")?;
        ensure_shape("psi_post", &psi_post, (n, n), "Psi_post must be n x n.")?;
        ensure_finite("b_post", &b_post)?;
        ensure_finite("omega_post", &omega_post)?;
        ensure_finite("psi_post", &psi_post)?;
        if !df_post.is_finite() {
            return Err(BVARError::InvalidHyperparameter {
                name: "df_post",
                value: Some(df_post),
                reason: "Degrees of freedom must be finite.",
            });
        }
        Ok(NIWPosterior { b_post, omega_post, psi_post, df_post })
    }

    pub(crate) fn from_parts(
        b_post: Array2<f64>, omega_post: Array2<f64>, psi_post: Array2<f64>, df_post: f64,
    ) -> Self {
        NIWPosterior { b_post, omega_post, psi_post, df_post }
    }

    pub fn b_post(&self) -> &Array2<f64> {
        &self.b_post
    }

    pub fn omega_post(&self) -> &Array2<f64> {
        &self.omega_post
    }

    pub fn psi_post(&self) -> &Array2<f64> {
        &self.psi_post
    }

    pub fn df_post(&self) -> f64 {
        self.df_post
    }

    /// `(k, n)`: shape of each coefficient draw.
    pub fn shape(&self) -> (usize, usize) {
        self.b_post.dim()
    }

    /// Posterior mean of `Σ`, `Ψ_post / (ν_post − n − 1)`.
    ///
    /// Errors
    /// ------
    /// - `BVARError::InvalidHyperparameter` if `ν_post ≤ n + 1`, where the
    ///   mean does not exist.
    pub fn sigma_mean(&self) -> BVARResult<Array2<f64>> {
        let n = self.psi_post.nrows() as f64;
        if self.df_post <= n + 1.0 {
            return Err(BVARError::InvalidHyperparameter {
                name: "df_post",
                value: Some(self.df_post),
                reason: "Posterior mean of Sigma requires df_post > n + 1.",
            });
        }
        Ok(&self.psi_post / (self.df_post - n - 1.0))
    }
}
