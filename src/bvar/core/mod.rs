//! bvar::core — data, shapes, hyperparameters and validation for the BVAR.
//!
//! Purpose
//! -------
//! Hold the building blocks the posterior update and sampler are assembled
//! from: the validated observation matrix, the `(n, p, k)` shape, the lagged
//! regression design with its least-squares fit, the NIW prior and posterior
//! value types, sampler options, and shared validation helpers.
//!
//! Key behaviors
//! -------------
//! - [`VARData`] validates the `T×n` observation matrix.
//! - [`VARShape`] infers the lag order `p` from `k = n·p + 1`.
//! - [`LaggedDesign`] builds `X` and `Y_trim` and computes [`OLSFit`].
//! - [`NIWPrior`] and [`NIWPosterior`] carry the conjugate hyperparameters.
//! - [`SamplerOptions`] and [`NormalDrawStrategy`] configure the sampler.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every constructor validates its inputs and returns a
//!   [`crate::bvar::errors::BVARError`] rather than panicking.
//! - Values are immutable once built; all operations are pure.

pub mod data;
pub mod design;
pub mod options;
pub mod posterior;
pub mod prior;
pub mod shape;
pub mod validation;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::data::VARData;
pub use self::design::{LaggedDesign, OLSFit};
pub use self::options::{NormalDrawStrategy, SamplerOptions};
pub use self::posterior::NIWPosterior;
pub use self::prior::NIWPrior;
pub use self::shape::VARShape;
pub use self::validation::{ensure_finite, ensure_shape, ensure_spd_hyperparameter, ensure_wishart_df};
