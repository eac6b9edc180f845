//! random::inverse_wishart — Inverse-Wishart draws via Bartlett's
//! decomposition.
//!
//! Purpose
//! -------
//! Draw `Σ ~ IW(Ψ, ν)` for an `n×n` SPD scale `Ψ` and `ν > n − 1` degrees of
//! freedom, returning both `Σ` and its Cholesky factor so the conditional
//! coefficient draw can reuse it.
//!
//! Key behaviors
//! -------------
//! - Factor `Ψ = L_Ψ L_Ψᵀ` once at construction and pre-build the `n`
//!   chi-squared distributions of the Bartlett diagonal.
//! - Per draw, build the Bartlett matrix `A` (lower triangular) with
//!   `A_ii = √χ²(ν − i)` and `A_ij ~ N(0, 1)` for `i > j`, so that
//!   `A Aᵀ ~ W(ν, I)`.
//! - Return `Σ = L_Ψ (A Aᵀ)⁻¹ L_Ψᵀ = (L_Ψ A⁻ᵀ)(L_Ψ A⁻ᵀ)ᵀ`, which is
//!   `IW(Ψ, ν)`; only the triangular `A` is ever inverted.
//!
//! Invariants & assumptions
//! ------------------------
//! - `E[Σ] = Ψ / (ν − n − 1)` when `ν > n + 1`.
//! - Random numbers are consumed row by row: for row `i`, first the
//!   chi-squared diagonal, then the `i` below-diagonal normals.
//!
//! Conventions
//! -----------
//! - The scale is validated as a hyperparameter: a non-SPD `Ψ` or a too-small
//!   `ν` yields `InvalidHyperparameter`, not `NumericalInstability`.
use crate::{
    bvar::{
        core::validation::{ensure_spd_hyperparameter, ensure_wishart_df},
        errors::{BVARError, BVARResult},
    },
    linalg::{SpdFactor, symmetrize, to_array2},
};
use nalgebra::DMatrix;
use ndarray::Array2;
use rand::{Rng, distributions::Distribution};
use rand_distr::StandardNormal;
use statrs::distribution::ChiSquared;

/// InverseWishart — reusable `IW(Ψ, ν)` sampler.
///
/// Fields
/// ------
/// - `df`: `f64`
///   Degrees of freedom `ν > n − 1`.
/// - `scale_lower`: `DMatrix<f64>`
///   Lower Cholesky factor `L_Ψ` of the scale matrix.
/// - `chi_squared`: `Vec<ChiSquared>`
///   `χ²(ν − i)` for `i = 0..n`, the Bartlett diagonal distributions.
#[derive(Debug, Clone)]
pub struct InverseWishart {
    df: f64,
    scale_lower: DMatrix<f64>,
    chi_squared: Vec<ChiSquared>,
}

impl InverseWishart {
    /// Build a sampler for `IW(scale, df)`.
    ///
    /// Parameters
    /// ----------
    /// - `scale`: `&Array2<f64>`
    ///   `n×n` symmetric positive-definite scale `Ψ`.
    /// - `df`: `f64`
    ///   Degrees of freedom; must be finite and `> n − 1`.
    /// - `scale_name`, `df_name`: `&'static str`
    ///   Labels reported in errors (e.g. `"psi_post"`, `"df_post"`).
    ///
    /// Errors
    /// ------
    /// - `BVARError::DimensionMismatch` if `scale` is not square or is empty.
    /// - `BVARError::InvalidHyperparameter` if `df ≤ n − 1`, `df` is not
    ///   finite, or `scale` is not SPD.
    /// - `BVARError::SamplingFailed` if a chi-squared distribution cannot be
    ///   constructed.
    pub fn new(
        scale: &Array2<f64>, df: f64, scale_name: &'static str, df_name: &'static str,
    ) -> BVARResult<Self> {
        let (rows, cols) = scale.dim();
        if rows != cols || rows == 0 {
            return Err(BVARError::DimensionMismatch {
                matrix: scale_name,
                expected: (rows.max(1), rows.max(1)),
                found: (rows, cols),
                reason: "Inverse-Wishart scale must be a non-empty square matrix.",
            });
        }
        ensure_wishart_df(df_name, df, rows)?;
        let scale_factor = ensure_spd_hyperparameter(scale_name, scale)?;

        let chi_squared = (0..rows)
            .map(|i| {
                ChiSquared::new(df - i as f64)
                    .map_err(|err| BVARError::SamplingFailed { reason: err.to_string() })
            })
            .collect::<BVARResult<Vec<_>>>()?;

        Ok(InverseWishart { df, scale_lower: scale_factor.lower_dmatrix(), chi_squared })
    }

    /// Matrix dimension `n`.
    pub fn dim(&self) -> usize {
        self.scale_lower.nrows()
    }

    /// Degrees of freedom `ν`.
    pub fn df(&self) -> f64 {
        self.df
    }

    /// Draw `Σ ~ IW(Ψ, ν)`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> BVARResult<Array2<f64>> {
        Ok(self.sample_with_factor(rng)?.matrix().clone())
    }

    /// Draw `Σ ~ IW(Ψ, ν)` and return it as an [`SpdFactor`], giving access
    /// to both `Σ` (`matrix()`) and its lower Cholesky factor.
    ///
    /// Errors
    /// ------
    /// - `BVARError::NumericalInstability` if the Bartlett factor is singular
    ///   or the draw cannot be factored. Neither happens with probability
    ///   one in exact arithmetic; in floating point it signals an extreme
    ///   scale or degrees-of-freedom setting.
    pub fn sample_with_factor<R: Rng + ?Sized>(&self, rng: &mut R) -> BVARResult<SpdFactor> {
        let n = self.dim();
        let bartlett = self.bartlett(rng);

        let bartlett_inv = bartlett
            .solve_lower_triangular(&DMatrix::identity(n, n))
            .ok_or(BVARError::NumericalInstability {
                matrix: "bartlett_factor",
                reason: "Bartlett factor has a zero pivot.",
            })?;

        // Σ = F Fᵀ with F = L_Ψ A⁻ᵀ.
        let f = &self.scale_lower * bartlett_inv.transpose();
        let mut sigma = to_array2(&(&f * f.transpose()));
        symmetrize(&mut sigma);
        SpdFactor::new(&sigma, "sigma_draw")
    }

    fn bartlett<R: Rng + ?Sized>(&self, rng: &mut R) -> DMatrix<f64> {
        let n = self.dim();
        let mut a = DMatrix::<f64>::zeros(n, n);
        for i in 0..n {
            a[(i, i)] = self.chi_squared[i].sample(rng).sqrt();
            for j in 0..i {
                a[(i, j)] = rng.sample(StandardNormal);
            }
        }
        a
    }
}
