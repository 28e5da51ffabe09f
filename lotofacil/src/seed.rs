//! Seeding of the random number generators used by the tools.

use std::time::{SystemTime, UNIX_EPOCH};

use tracing::debug;

/// Nanoseconds since the Unix epoch, truncated to 64 bits. Zero if the clock reads before the
/// epoch.
pub fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_nanos() as u64)
        .unwrap_or_default()
}

/// The given seed, or one taken from the clock. Logged so that a run can be reproduced.
pub fn seed_or_clock(seed: Option<u64>) -> u64 {
    let seed = seed.unwrap_or_else(clock_seed);
    debug!("seed: {seed}");
    seed
}
