//! bvar::models — posterior update and posterior sampling.
//!
//! Purpose
//! -------
//! Host the two operations of the BVAR layer: the closed-form NIW posterior
//! update ([`update`]) and joint Monte Carlo sampling of `(B, Σ)`
//! ([`sample`]).
//!
//! Downstream usage
//! ----------------
//! - Call [`update`] (or [`update_with_prior`] with prebuilt
//!   [`crate::bvar::core::VARData`] / [`crate::bvar::core::NIWPrior`]) to get
//!   an [`crate::bvar::core::NIWPosterior`], then pass it to [`sample`] or
//!   [`sample_with_options`] as many times as needed.

pub mod sampler;
pub mod update;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::sampler::{PosteriorDrawSet, sample, sample_with_options};
pub use self::update::{update, update_with_prior};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_bvar::bvar::models::prelude::*;
//
// to import the model surface in a single line.

pub mod prelude {
    pub use super::sampler::{PosteriorDrawSet, sample, sample_with_options};
    pub use super::update::{update, update_with_prior};
}
