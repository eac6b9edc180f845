//! random::streams — per-draw RNG streams.
//!
//! Each posterior draw gets its own `Xoshiro256PlusPlus` generator seeded
//! from `(base_seed, draw_index)` through a SplitMix64 mixer. Streams are
//! therefore independent of scheduling: draw `i` sees the same random numbers
//! whether draws run serially or on a thread pool.
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

/// Seed for stream `index` derived from `base`.
///
/// Distinct indices map to well-separated seeds even when `base` is small
/// (e.g. `0` or `1`).
pub fn stream_seed(base: u64, index: u64) -> u64 {
    splitmix64(base ^ splitmix64(index.wrapping_mul(GOLDEN_GAMMA)))
}

/// Generator for draw `index` under `base`.
pub fn draw_rng(base: u64, index: usize) -> Xoshiro256PlusPlus {
    Xoshiro256PlusPlus::seed_from_u64(stream_seed(base, index as u64))
}

/// Use the caller's seed, or take one from the thread-local entropy source.
pub fn resolve_base_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(rand::random::<u64>)
}

fn splitmix64(x: u64) -> u64 {
    let mut z = x.wrapping_add(GOLDEN_GAMMA);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
