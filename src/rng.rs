//! Deterministic RNG for quiz shuffles, miss damage, shiny rolls and boss moves.
//!
//! The generator lives inside `AppState` so recorded action streams replay
//! with the same outcomes.

use rand::SeedableRng;
use rand_pcg::Pcg32;

pub type GameRng = Pcg32;

pub fn create_rng(seed: u64) -> GameRng {
    Pcg32::seed_from_u64(seed)
}

pub fn seed_from_time() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    (now.as_secs() << 32) ^ now.subsec_nanos() as u64
}
