//! linalg — linear-algebra plumbing for the BVAR core.
//!
//! Purpose
//! -------
//! Keep the public API on `ndarray` types while delegating factorisations to
//! `nalgebra`. Everything the posterior update and sampler need from a
//! linear-algebra provider lives here: guarded Cholesky solves and inverses
//! ([`spd`]) and the column-major `vec` operator ([`vec`]). Kronecker
//! products come straight from `ndarray::linalg::kron`.
//!
//! Conventions
//! -----------
//! - Matrices are `Array2<f64>` at every public boundary; `DMatrix<f64>` only
//!   appears where a triangular factor is handed to the random-variate code.
//! - Failures are reported as [`crate::bvar::errors::BVARError`] values
//!   naming the matrix involved.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`spd`] check closed-form 2x2 results and rejection of
//!   indefinite / ill-conditioned inputs.
//! - Unit tests in [`vec`] check the stacking order, exact inversion and the
//!   vec/Kronecker identity.

pub mod spd;
pub mod vec;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::spd::{SPD_RCOND_EPS, SpdFactor, symmetrize, to_array2, to_dmatrix};
pub use self::vec::{unvec_col_major, vec_col_major};
