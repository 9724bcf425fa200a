//! CLI configuration management.
//!
//! This module defines the complete CLI configuration hierarchy:
//!
//! ```text
//! Cli
//! ├── api: ApiClientConfig      # Web API base URL, HTTP timeout, user agent
//! ├── session: SessionConfig    # Per-step workflow timeouts
//! └── replay: ReplayConfig      # Input file and road attributes
//! ```
//!
//! All configuration can be provided via CLI arguments or environment variables.
//! Use `--help` to see all available options.

mod replay;
mod session;

use std::process;

use bikeroutes_reqwest::ApiClientConfig;
use clap::Parser;
pub use replay::ReplayConfig;
use serde::{Deserialize, Serialize};
pub use session::SessionConfig;

use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_STARTUP};

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
#[command(name = "bikeroutes")]
#[command(about = "Replays drawn bike routes through the drawing workflow")]
#[command(version)]
pub struct Cli {
    /// Web API connection.
    #[clap(flatten)]
    pub api: ApiClientConfig,

    /// Workflow session tuning.
    #[clap(flatten)]
    pub session: SessionConfig,

    /// Paths to replay and the attributes to draw them with.
    #[clap(flatten)]
    pub replay: ReplayConfig,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    ///
    /// The .env file is loaded first so that clap's `env` lookups see its values.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    /// Loads environment variables from .env file if the dotenv feature is enabled.
    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    /// No-op when dotenv feature is disabled.
    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Logs build information at debug level.
    fn log_build_info() {
        tracing::debug!(
            target: TRACING_TARGET_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            features = ?Self::enabled_features(),
            "Build information"
        );
    }

    /// Logs configuration (no sensitive information).
    pub fn log(&self) {
        Self::log_build_info();

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            api_base_url = %self.api.api_base_url,
            http_timeout_secs = self.api.effective_timeout().as_secs(),
            "API configuration"
        );

        self.session.log();
        self.replay.log();
    }

    /// Returns a list of enabled compile-time features.
    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect()
    }
}
