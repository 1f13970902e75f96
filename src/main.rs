//! Gesture Fighter - webcam-driven fighting game
//!
//! Entry point. It handles:
//! - Environment configuration and structured logging
//! - Wiring the camera/detector/renderer/audio collaborators
//! - Running the fixed-tick match loop until quit or camera loss
//!
//! Controls on stdin: `r` resets the match, `q` (or ctrl-c) quits.

mod app;
mod audio;
mod config;
mod game;
mod input;
mod render;
mod util;
mod vision;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::AppState;
use crate::config::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing
    init_tracing(&config.log_level);

    info!("Starting Gesture Fighter");

    let state = AppState::new(&config);
    info!(seed = state.seed(), "RNG seeded");

    // Runs until quit (Ok) or the camera stops producing frames (fatal)
    state.into_loop().run().await?;

    info!("Shutdown complete");
    Ok(())
}

/// Initialize tracing/logging
fn init_tracing(log_level: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}
