//! Seeded randomness for the simulated feeds.
//!
//! Everything random in the dashboard (rotation periods, metric jitter, canned
//! replies) draws from a `ChaCha8Rng` owned by its component. Same seed -> same
//! demo, which is what the tests rely on.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// The RNG type threaded through the engine.
pub type DemoRng = ChaCha8Rng;

/// Deterministic RNG for a seed and a stream id, so sibling components seeded
/// from the same `--seed` do not share a sequence.
pub fn seeded_rng(seed: u64, stream: u64) -> DemoRng {
    ChaCha8Rng::seed_from_u64(seed.wrapping_add(stream))
}

/// Fresh RNG from OS entropy, used when no seed is configured.
pub fn entropy_rng() -> DemoRng {
    ChaCha8Rng::from_entropy()
}

/// Picks a seeded or entropy RNG depending on the configured seed.
pub fn rng_for(seed: Option<u64>, stream: u64) -> DemoRng {
    match seed {
        Some(seed) => seeded_rng(seed, stream),
        None => entropy_rng(),
    }
}
