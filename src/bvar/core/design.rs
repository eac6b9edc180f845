//! Lagged regression design for VAR(p) models and its least-squares fit.
//!
//! Purpose
//! -------
//! Turn a `T×n` observation matrix into the stacked regression
//! `Y_trim = X B + E` used by the NIW posterior update, and compute the
//! cross-products and OLS/MLE quantities the update needs.
//!
//! Key behaviors
//! -------------
//! - [`LaggedDesign::new`] builds `X` of shape `(T − p)×k`: column 0 is the
//!   intercept, and lag block `i = 1..p` occupies columns
//!   `1 + (i − 1)·n .. 1 + i·n`. Row `r` corresponds to period `t = r + p`
//!   and reads `[1, y_{t−1}ᵀ, …, y_{t−p}ᵀ]`.
//! - `Y_trim` keeps rows `p..T` of `Y`, aligned with the rows of `X`.
//! - [`LaggedDesign::ols`] returns [`OLSFit`]: `XᵀX`, its inverse, `XᵀY`,
//!   `B_MLE = (XᵀX)⁻¹XᵀY` (Cholesky solve) and the residual cross-product
//!   `S_MLE = (Y − X B_MLE)ᵀ(Y − X B_MLE)`.
//!
//! Invariants & assumptions
//! ------------------------
//! - The [`VARShape`] passed in was produced by `VARShape::infer` for this
//!   data, so `T > p` and there is at least one usable row.
//! - `XᵀX` must be positive-definite for the fit to exist; this requires
//!   `T − p ≥ k` and non-collinear regressors. Failure is reported as
//!   `NumericalInstability` on `"xprime_x"`.
//!
//! Testing notes
//! -------------
//! - Unit tests check the lag layout on a hand-written series, and that OLS
//!   recovers exact coefficients from a noise-free VAR(1).
use crate::{
    bvar::{
        core::{data::VARData, shape::VARShape},
        errors::BVARResult,
    },
    linalg::{SpdFactor, symmetrize},
};
use ndarray::{Array2, s};

/// `LaggedDesign` — regressor matrix `X` and aligned responses `Y_trim`.
///
/// Fields
/// ------
/// - `x`: `Array2<f64>`, `(T − p)×k`.
/// - `y`: `Array2<f64>`, `(T − p)×n`.
/// - `shape`: [`VARShape`].
#[derive(Debug, Clone, PartialEq)]
pub struct LaggedDesign {
    x: Array2<f64>,
    y: Array2<f64>,
    shape: VARShape,
}

/// `OLSFit` — cross-products and least-squares estimates on a lagged design.
///
/// Fields
/// ------
/// - `xprime_x`: `XᵀX` (`k×k`, symmetric).
/// - `xprime_x_inv`: `(XᵀX)⁻¹` (`k×k`, symmetric).
/// - `xprime_y`: `XᵀY_trim` (`k×n`).
/// - `b_mle`: `B_MLE` (`k×n`).
/// - `sigma_mle`: residual cross-product `S_MLE` (`n×n`, symmetric). This is
///   the residual sum of squares, not divided by the sample size.
#[derive(Debug, Clone, PartialEq)]
pub struct OLSFit {
    pub xprime_x: Array2<f64>,
    pub xprime_x_inv: Array2<f64>,
    pub xprime_y: Array2<f64>,
    pub b_mle: Array2<f64>,
    pub sigma_mle: Array2<f64>,
}

impl LaggedDesign {
    /// Build the lagged regression for `data` under `shape`.
    pub fn new(data: &VARData, shape: VARShape) -> Self {
        let y = data.y();
        let t = data.nobs();
        let VARShape { n, p, k } = shape;
        let rows = shape.usable_rows(t);

        let mut x = Array2::<f64>::zeros((rows, k));
        x.column_mut(0).fill(1.0);
        for lag in 1..=p {
            let cols = 1 + (lag - 1) * n..1 + lag * n;
            x.slice_mut(s![.., cols]).assign(&y.slice(s![p - lag..t - lag, ..]));
        }

        LaggedDesign { x, y: y.slice(s![p.., ..]).to_owned(), shape }
    }

    /// Regressor matrix `X`.
    pub fn x(&self) -> &Array2<f64> {
        &self.x
    }

    /// Responses aligned with `X` (rows `p..T` of `Y`).
    pub fn y_trimmed(&self) -> &Array2<f64> {
        &self.y
    }

    pub fn shape(&self) -> VARShape {
        self.shape
    }

    /// Least-squares fit and cross-products.
    ///
    /// Errors
    /// ------
    /// - `BVARError::NumericalInstability { matrix: "xprime_x", .. }` if
    ///   `XᵀX` is singular or too ill-conditioned.
    pub fn ols(&self) -> BVARResult<OLSFit> {
        let mut xprime_x = self.x.t().dot(&self.x);
        symmetrize(&mut xprime_x);
        let xprime_y = self.x.t().dot(&self.y);

        let xx_factor = SpdFactor::new(&xprime_x, "xprime_x")?;
        let b_mle = xx_factor.solve(&xprime_y)?;
        let xprime_x_inv = xx_factor.inverse();

        let resid = &self.y - &self.x.dot(&b_mle);
        let mut sigma_mle = resid.t().dot(&resid);
        symmetrize(&mut sigma_mle);

        Ok(OLSFit { xprime_x, xprime_x_inv, xprime_y, b_mle, sigma_mle })
    }
}
