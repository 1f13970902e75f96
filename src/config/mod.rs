//! Configuration module - environment variable parsing

use std::env;

/// Application configuration loaded from environment variables
#[derive(Clone, Debug)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Seed for all game RNG; a fixed seed makes a run reproducible.
    /// Defaults to wall clock when unset.
    pub rng_seed: Option<u64>,
    /// Emit one JSON draw list per tick on stdout instead of discarding
    /// frames (for piping into an external renderer)
    pub dump_frames: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let rng_seed = match env::var("RNG_SEED") {
            Ok(raw) => Some(raw.parse().map_err(|_| ConfigError::InvalidSeed)?),
            Err(_) => None,
        };

        Ok(Self {
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            rng_seed,
            dump_frames: env::var("DUMP_FRAMES").map(|v| v == "1").unwrap_or(false),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("RNG_SEED must be an unsigned integer")]
    InvalidSeed,
}
