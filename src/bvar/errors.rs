//! bvar::errors — error taxonomy for BVAR posterior updating and sampling.
//!
//! Purpose
//! -------
//! Define the single error enum, [`BVARError`], and result alias,
//! [`BVARResult`], shared by the NIW posterior updater, the posterior sampler
//! and the linear-algebra / random-variate helpers they rely on.
//!
//! Key behaviors
//! -------------
//! - Separate shape failures (`DimensionMismatch`), bad prior or posterior
//!   parameters (`InvalidHyperparameter`), and factorisation breakdowns
//!   (`NumericalInstability`) so callers can decide whether retrying with
//!   better-conditioned inputs makes sense.
//! - Carry the offending matrix name and dimension/value in every variant so
//!   that `Display` output is diagnosable without extra context.
//!
//! Invariants & assumptions
//! ------------------------
//! - Validation errors are raised before any numerical work starts; no
//!   variant is ever produced after a partial result has been returned.
//! - Matrix names are the snake_case names used in the public API
//!   (`"y"`, `"b_prior"`, `"omega_prior"`, `"psi_prior"`, `"xprime_x"`, ...).
//!
//! Conventions
//! -----------
//! - Shapes are reported as `(rows, cols)`.
//! - Indices in `NonFiniteInput` are 0-based.
//!
//! Testing notes
//! -------------
//! - Unit tests check that each variant's `Display` message embeds its
//!   payload (matrix name, shapes, offending value).

/// Crate-wide result alias for BVAR operations that may produce [`BVARError`].
pub type BVARResult<T> = Result<T, BVARError>;

/// Unified error type for BVAR posterior updating and sampling.
///
/// Variants
/// --------
/// - `DimensionMismatch`
///   A shape relationship among `Y`, `B_prior`, `Ω_prior`, `Ψ_prior`, `k`,
///   `n`, `p` fails. `expected` / `found` are `(rows, cols)`.
/// - `InvalidHyperparameter`
///   A degrees-of-freedom value is too small or non-finite, or a scale
///   matrix that must be symmetric positive-definite is not. `value` holds
///   the scalar when one is involved.
/// - `NumericalInstability`
///   A Cholesky-based solve or inverse on a matrix that should be
///   positive-definite failed or was ill-conditioned beyond tolerance.
/// - `NonFiniteInput`
///   An input matrix contains NaN or ±∞.
/// - `SamplingFailed`
///   The random-variate provider rejected its parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum BVARError {
    // ---- Dimension checks ----
    /// Shape relationship among the inputs does not hold.
    DimensionMismatch {
        matrix: &'static str,
        expected: (usize, usize),
        found: (usize, usize),
        reason: &'static str,
    },

    // ---- Hyperparameters ----
    /// Degrees of freedom or scale matrix unusable.
    InvalidHyperparameter { name: &'static str, value: Option<f64>, reason: &'static str },

    // ---- Numerical ----
    /// Cholesky factorisation failed or the factor is too ill-conditioned.
    NumericalInstability { matrix: &'static str, reason: &'static str },

    // ---- Input data ----
    /// Input matrix entry is NaN/±inf.
    NonFiniteInput { matrix: &'static str, row: usize, col: usize, value: f64 },

    // ---- Random-variate provider ----
    /// Distribution constructor rejected its parameters.
    SamplingFailed { reason: String },
}

impl std::error::Error for BVARError {}

impl std::fmt::Display for BVARError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Dimension checks ----
            BVARError::DimensionMismatch { matrix, expected, found, reason } => write!(
                f,
                "Dimension mismatch for {matrix}: expected {}x{}, found {}x{}. {reason}",
                expected.0, expected.1, found.0, found.1
            ),

            // ---- Hyperparameters ----
            BVARError::InvalidHyperparameter { name, value: Some(value), reason } => {
                write!(f, "Invalid hyperparameter {name} = {value}. {reason}")
            }
            BVARError::InvalidHyperparameter { name, value: None, reason } => {
                write!(f, "Invalid hyperparameter {name}. {reason}")
            }

            // ---- Numerical ----
            BVARError::NumericalInstability { matrix, reason } => {
                write!(f, "Numerical instability in {matrix}: {reason}")
            }

            // ---- Input data ----
            BVARError::NonFiniteInput { matrix, row, col, value } => {
                write!(f, "Entry ({row}, {col}) of {matrix} is non-finite: {value}")
            }

            // ---- Random-variate provider ----
            BVARError::SamplingFailed { reason } => {
                write!(f, "Random-variate generation failed: {reason}")
            }
        }
    }
}
