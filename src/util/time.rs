//! Time utilities for the fixed-tick simulation

use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Get current Unix timestamp in milliseconds
pub fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_millis() as u64
}

/// Tick rate configuration
pub const SIMULATION_TPS: u32 = 60; // 60 ticks per second
pub const TICK_DURATION_MICROS: u64 = 1_000_000 / SIMULATION_TPS as u64;

/// Simulation clock step per tick, in milliseconds. The detector contract
/// requires a strictly increasing timestamp advanced by a fixed 16ms per
/// frame regardless of wall-clock drift; the same clock drives combat timing.
pub const TICK_STEP_MS: u64 = 16;
