//! Conjugate Normal-Inverse-Wishart posterior update for a VAR(p).
//!
//! Purpose
//! -------
//! Map observed data and NIW prior hyperparameters to posterior
//! hyperparameters in closed form. The lag order is never passed in: it is
//! read off the prior coefficient mean through `k = n·p + 1`.
//!
//! Key behaviors
//! -------------
//! - [`update`] is the flat entry point taking raw matrices; it validates
//!   everything and delegates to [`update_with_prior`].
//! - [`update_with_prior`] works on a validated [`VARData`] / [`NIWPrior`]
//!   pair and computes, with `D = B_prior − B_MLE`,
//!   - `Ω_post = (XᵀX + Ω_prior⁻¹)⁻¹`
//!   - `B_post = Ω_post (XᵀY + Ω_prior⁻¹ B_prior)`
//!   - `Ψ_post = Ψ_prior + S_MLE + Dᵀ (Ω_prior + (XᵀX)⁻¹)⁻¹ D`
//!   - `ν_post = ν_prior + T`
//!
//! Invariants & assumptions
//! ------------------------
//! - Every inverse is taken through a Cholesky factor. The posterior
//!   precision `XᵀX + Ω_prior⁻¹` is factored once and reused for both
//!   `Ω_post` and `B_post`.
//! - `Ω_post` and `Ψ_post` are symmetrized before they are returned.
//! - `ν_post` adds the full sample length `T`, not the `T − p` rows that
//!   enter the regression.
//!
//! Testing notes
//! -------------
//! - Unit tests check determinism, symmetry and definiteness of the
//!   outputs, the limiting behavior under very tight and very diffuse
//!   coefficient priors, and the error surface.
use crate::{
    bvar::{
        core::{
            data::VARData, design::LaggedDesign, posterior::NIWPosterior, prior::NIWPrior,
            shape::VARShape,
        },
        errors::{BVARError, BVARResult},
    },
    linalg::{SpdFactor, symmetrize},
};
use ndarray::Array2;
use tracing::debug;

/// Compute NIW posterior hyperparameters from raw matrices.
///
/// Parameters
/// ----------
/// - `y`: `&Array2<f64>`
///   `T×n` observations, oldest first.
/// - `b_prior`: `&Array2<f64>`
///   `k×n` prior mean of `B`; `k = n·p + 1` fixes the lag order.
/// - `omega_prior`: `&Array2<f64>`
///   `k×k` SPD prior row covariance.
/// - `psi_prior`: `&Array2<f64>`
///   `n×n` SPD Inverse-Wishart scale.
/// - `df_prior`: `f64`
///   Inverse-Wishart degrees of freedom, `> n − 1`.
///
/// Returns
/// -------
/// `BVARResult<NIWPosterior>`
///
/// Errors
/// ------
/// - `BVARError::NonFiniteInput` for NaN/±∞ in `y`.
/// - `BVARError::DimensionMismatch` if `B_prior` does not have `n` columns,
///   if `k` is not `n·p + 1`, if `T ≤ p`, or if any prior matrix has the
///   wrong shape. Shape errors are reported before any hyperparameter check.
/// - `BVARError::InvalidHyperparameter` if `df_prior ≤ n − 1` or a prior
///   scale matrix is not SPD.
/// - `BVARError::NumericalInstability` if `XᵀX` or a derived matrix cannot be
///   factored.
///
/// Examples
/// --------
/// ```rust
/// # use ndarray::Array2;
/// # use rust_bvar::bvar::models::update::update;
/// let y = Array2::from_shape_fn((40, 2), |(t, j)| {
///     let t = t as f64;
///     if j == 0 { (0.7 * t).sin() } else { (0.3 * t).cos() + 0.1 * t.sqrt() }
/// });
/// let post = update(
///     &y,
///     &Array2::zeros((3, 2)),
///     &(Array2::eye(3) * 10.0),
///     &Array2::eye(2),
///     4.0,
/// )
/// .unwrap();
/// assert_eq!(post.shape(), (3, 2));
/// assert_eq!(post.df_post(), 44.0);
/// ```
pub fn update(
    y: &Array2<f64>, b_prior: &Array2<f64>, omega_prior: &Array2<f64>, psi_prior: &Array2<f64>,
    df_prior: f64,
) -> BVARResult<NIWPosterior> {
    let data = VARData::new(y.clone())?;
    if b_prior.ncols() != data.nvars() {
        return Err(BVARError::DimensionMismatch {
            matrix: "b_prior",
            expected: (b_prior.nrows(), data.nvars()),
            found: b_prior.dim(),
            reason: "Columns of B_prior must equal the number of variables in Y.",
        });
    }
    VARShape::infer(data.nobs(), data.nvars(), b_prior.nrows())?;
    let prior =
        NIWPrior::new(b_prior.clone(), omega_prior.clone(), psi_prior.clone(), df_prior)?;
    update_with_prior(&data, &prior)
}

/// Compute NIW posterior hyperparameters from validated data and prior.
///
/// Errors
/// ------
/// - `BVARError::DimensionMismatch` if the prior's `n` differs from the
///   data's, if `k` is not `n·p + 1`, or if `T ≤ p`.
/// - `BVARError::NumericalInstability` if `XᵀX`, the posterior precision or
///   `Ω_prior + (XᵀX)⁻¹` cannot be factored.
pub fn update_with_prior(data: &VARData, prior: &NIWPrior) -> BVARResult<NIWPosterior> {
    let t = data.nobs();
    let n = data.nvars();
    if prior.n() != n {
        return Err(BVARError::DimensionMismatch {
            matrix: "b_prior",
            expected: (prior.k(), n),
            found: (prior.k(), prior.n()),
            reason: "Columns of B_prior must equal the number of variables in Y.",
        });
    }
    let shape = VARShape::infer(t, n, prior.k())?;
    debug!(t, n = shape.n, p = shape.p, k = shape.k, "starting NIW posterior update");

    let design = LaggedDesign::new(data, shape);
    let ols = design.ols()?;

    let omega_factor = SpdFactor::new(prior.omega_prior(), "omega_prior")?;
    let omega_prior_inv = omega_factor.inverse();
    let omega_inv_b_prior = omega_factor.solve(prior.b_prior())?;

    let precision = &ols.xprime_x + &omega_prior_inv;
    let precision_factor = SpdFactor::new(&precision, "posterior_precision")?;
    let omega_post = precision_factor.inverse();
    let b_post = precision_factor.solve(&(&ols.xprime_y + &omega_inv_b_prior))?;

    let gap = prior.b_prior() - &ols.b_mle;
    let shrink = prior.omega_prior() + &ols.xprime_x_inv;
    let shrink_factor = SpdFactor::new(&shrink, "omega_prior_plus_inv_xprime_x")?;
    let mut psi_post: Array2<f64> =
        prior.psi_prior() + &ols.sigma_mle + &gap.t().dot(&shrink_factor.solve(&gap)?);
    symmetrize(&mut psi_post);

    let df_post = prior.df_prior() + t as f64;
    debug!(df_post, "NIW posterior update complete");

    Ok(NIWPosterior::from_parts(b_post, omega_post, psi_post, df_post))
}
