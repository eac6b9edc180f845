//! Time-series data container for VAR models.
//!
//! Purpose
//! -------
//! Hold the `T×n` observation matrix `Y` after basic validation so that the
//! design-matrix builder and the posterior update can assume clean input.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every entry of `Y` is finite.
//! - Rows are observations in time order (oldest first); columns are
//!   variables. Whether `T` is large enough for a given lag order is checked
//!   by [`crate::bvar::core::shape::VARShape::infer`], not here.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the happy path and a non-finite entry.
use crate::bvar::{core::validation::ensure_finite, errors::BVARResult};
use ndarray::Array2;

/// `VARData` — validated `T×n` observation matrix.
///
/// Fields
/// ------
/// - `y`: `Array2<f64>`
///   Observations, one row per period, one column per variable.
///
/// Invariants
/// ----------
/// - All entries finite.
///
/// Performance
/// -----------
/// - Validation is a single O(T·n) scan; the matrix is moved in, not copied.
#[derive(Debug, Clone, PartialEq)]
pub struct VARData {
    y: Array2<f64>,
}

impl VARData {
    /// Validate and wrap an observation matrix.
    ///
    /// Errors
    /// ------
    /// - `BVARError::NonFiniteInput` for the first NaN/±∞ entry.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use ndarray::array;
    /// # use rust_bvar::bvar::core::data::VARData;
    /// let data = VARData::new(array![[1.0, 2.0], [1.5, 2.5], [1.2, 2.1]]).unwrap();
    /// assert_eq!(data.nobs(), 3);
    /// assert_eq!(data.nvars(), 2);
    /// ```
    pub fn new(y: Array2<f64>) -> BVARResult<Self> {
        ensure_finite("y", &y)?;
        Ok(VARData { y })
    }

    /// Observation matrix `Y`.
    pub fn y(&self) -> &Array2<f64> {
        &self.y
    }

    /// Number of observations `T`.
    pub fn nobs(&self) -> usize {
        self.y.nrows()
    }

    /// Number of variables `n`.
    pub fn nvars(&self) -> usize {
        self.y.ncols()
    }
}
