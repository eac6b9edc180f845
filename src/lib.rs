//! rust_bvar — Bayesian vector autoregressions with a conjugate
//! Normal-Inverse-Wishart prior.
//!
//! Purpose
//! -------
//! Serve as the crate root for estimating VAR(p) models in the Bayesian
//! conjugate setting: turn observed data and prior hyperparameters into
//! closed-form posterior hyperparameters, and draw the coefficient matrix and
//! innovation covariance jointly from that posterior.
//!
//! Key behaviors
//! -------------
//! - [`bvar`] holds the model layer: data and hyperparameter types, the
//!   posterior update, the posterior sampler and the error type.
//! - [`linalg`] wraps `nalgebra` Cholesky factorisations behind
//!   `ndarray`-facing helpers and implements column-major `vec` / `unvec`.
//! - [`random`] provides reusable Inverse-Wishart and matrix-normal samplers
//!   and the per-draw RNG streams.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every fallible routine returns [`bvar::BVARResult`]; library code does
//!   not panic on invalid input.
//! - For a fixed seed, sampling output is bit-identical across runs and
//!   independent of thread count.
//!
//! Downstream usage
//! ----------------
//! ```rust
//! use ndarray::Array2;
//! use rust_bvar::bvar::prelude::*;
//!
//! let y = Array2::from_shape_fn((60, 2), |(t, j)| {
//!     let t = t as f64;
//!     (0.4 * t + j as f64).sin() + 0.05 * t.sqrt()
//! });
//! let prior = NIWPrior::diffuse(2, 1, 100.0, 4.0).unwrap();
//! let post = update(
//!     &y,
//!     prior.b_prior(),
//!     prior.omega_prior(),
//!     prior.psi_prior(),
//!     prior.df_prior(),
//! )
//! .unwrap();
//! let draws = sample(&post, 50, Some(1)).unwrap();
//! assert_eq!(draws.len(), 50);
//! ```

pub mod bvar;
pub mod linalg;
pub mod random;
