//! bvar — Bayesian VAR(p) with a conjugate Normal-Inverse-Wishart prior.
//!
//! Purpose
//! -------
//! Provide the full BVAR stack: validated data and hyperparameter types,
//! the closed-form posterior update, joint posterior sampling of the
//! coefficient matrix `B` and innovation covariance `Σ`, and the shared error
//! type.
//!
//! Key behaviors
//! -------------
//! - [`core`] holds [`VARData`], [`VARShape`], the lagged design and OLS fit,
//!   [`NIWPrior`], [`NIWPosterior`] and [`SamplerOptions`].
//! - [`models`] exposes [`update`] and [`sample`] plus their option-taking
//!   variants, and the [`PosteriorDrawSet`] result type.
//! - [`errors`] defines [`BVARError`] / [`BVARResult`], used by every fallible
//!   routine in the crate.
//!
//! Invariants & assumptions
//! ------------------------
//! - The model is `y_t = c + A_1 y_{t−1} + … + A_p y_{t−p} + ε_t` with
//!   `ε_t ~ N(0, Σ)`, stacked as `Y_trim = X B + E` with
//!   `B = [c, A_1, …, A_p]ᵀ` of shape `k×n`, `k = n·p + 1`.
//! - `vec` is column-major throughout, so `vec(B) | Σ ~ N(·, Σ ⊗ Ω)` has
//!   `Ω` as the row covariance of `B`.
//!
//! Conventions
//! -----------
//! - Matrices are `ndarray::Array2<f64>` at every public boundary;
//!   factorisations happen in `nalgebra` behind [`crate::linalg`].
//! - Routines are pure and synchronous. Logging goes through `tracing` at
//!   `debug` level for entry/exit and `warn` for rejected factorisations.
//!
//! Testing notes
//! -------------
//! - Unit tests live beside each module; the end-to-end pipeline from
//!   simulated data through update and sampling is covered in
//!   `tests/integration_bvar_pipeline.rs`.

pub mod core;
pub mod errors;
pub mod models;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::core::{
    LaggedDesign, NIWPosterior, NIWPrior, NormalDrawStrategy, OLSFit, SamplerOptions, VARData,
    VARShape,
};
pub use self::errors::{BVARError, BVARResult};
pub use self::models::{PosteriorDrawSet, sample, sample_with_options, update, update_with_prior};

// ---- Optional convenience prelude for downstream crates ------------------
//
// Downstream crates can `use rust_bvar::bvar::prelude::*;` to import the
// primary BVAR surface in a single line.

pub mod prelude {
    pub use super::core::{NIWPosterior, NIWPrior, NormalDrawStrategy, SamplerOptions, VARData};
    pub use super::errors::{BVARError, BVARResult};
    pub use super::models::{PosteriorDrawSet, sample, sample_with_options, update};
}
