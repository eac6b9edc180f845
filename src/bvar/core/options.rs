//! Sampler options — configuration for posterior draws.
//!
//! Purpose
//! -------
//! Collect the knobs of the posterior sampler in one explicit value: the RNG
//! seed, how the conditional coefficient draw is computed, and whether draws
//! may run on a thread pool.
//!
//! Conventions
//! -----------
//! - `SamplerOptions::default()` is unseeded, uses the matrix-normal
//!   identity and runs serially.
//! - `parallel = true` only takes effect when the crate is built with the
//!   `parallel` feature; otherwise draws run serially. Results are the same
//!   either way for a fixed seed.

/// How `vec(B) | Σ ~ N(vec(B_post), Σ ⊗ Ω_post)` is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NormalDrawStrategy {
    /// `B = B_post + L_Ω Z L_Σᵀ`; never forms the `(k·n)×(k·n)` covariance.
    #[default]
    MatrixNormal,
    /// Materialise `Σ ⊗ Ω_post`, factor it, and unstack `vec(B)`. Costs
    /// `O((k·n)³)` per draw; meant for validation on small systems.
    Kronecker,
}

/// SamplerOptions — configuration for [`crate::bvar::models::sampler`].
///
/// Fields
/// ------
/// - `seed`: `Option<u64>`
///   Base seed. `None` draws a fresh one from the thread-local entropy
///   source, so runs are not reproducible.
/// - `strategy`: [`NormalDrawStrategy`]
///   Conditional coefficient draw method.
/// - `parallel`: `bool`
///   Run draws on the `rayon` pool (feature `parallel`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SamplerOptions {
    pub seed: Option<u64>,
    pub strategy: NormalDrawStrategy,
    pub parallel: bool,
}

impl SamplerOptions {
    /// Construct a new [`SamplerOptions`]. No validation is needed; every
    /// combination is admissible.
    pub fn new(seed: Option<u64>, strategy: NormalDrawStrategy, parallel: bool) -> Self {
        SamplerOptions { seed, strategy, parallel }
    }

    /// Default options with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        SamplerOptions { seed: Some(seed), ..SamplerOptions::default() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Verify documented defaults and that constructors preserve fields.
    //
    // Given
    // -----
    // - `default()`, `seeded(9)` and an explicit `new`.
    //
    // Expect
    // ------
    // - Default: no seed, MatrixNormal, serial.
    // - `seeded` only sets the seed; `new` stores its inputs as given.
    fn constructors_match_documented_defaults() {
        let default = SamplerOptions::default();
        assert_eq!(default.seed, None);
        assert_eq!(default.strategy, NormalDrawStrategy::MatrixNormal);
        assert!(!default.parallel);

        let seeded = SamplerOptions::seeded(9);
        assert_eq!(seeded, SamplerOptions { seed: Some(9), ..default });

        let explicit = SamplerOptions::new(Some(1), NormalDrawStrategy::Kronecker, true);
        assert_eq!(explicit.seed, Some(1));
        assert_eq!(explicit.strategy, NormalDrawStrategy::Kronecker);
        assert!(explicit.parallel);
    }
}
