//! Workflow session configuration.

use std::time::Duration;

use anyhow::Context;
use bikeroutes_workflow::{DEFAULT_OVERLAP_TOLERANCE, WorkflowConfig};
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_CONFIG;

/// Timeouts applied to each collaborator call of the workflow.
#[derive(Debug, Clone, Serialize, Deserialize, Args)]
pub struct SessionConfig {
    /// Timeout for loading existing routes, in seconds.
    #[arg(long = "fetch-timeout", env = "FETCH_TIMEOUT", default_value_t = 30)]
    #[serde(default = "default_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// Timeout for snapping a drawn path to the road, in seconds.
    #[arg(long = "snap-timeout", env = "SNAP_TIMEOUT", default_value_t = 30)]
    #[serde(default = "default_timeout_secs")]
    pub snap_timeout_secs: u64,

    /// Timeout for persisting a snapped route, in seconds.
    #[arg(long = "persist-timeout", env = "PERSIST_TIMEOUT", default_value_t = 30)]
    #[serde(default = "default_timeout_secs")]
    pub persist_timeout_secs: u64,

    /// Distance, in degrees, under which a point lies on a route.
    #[arg(long = "overlap-tolerance", env = "OVERLAP_TOLERANCE", default_value_t = DEFAULT_OVERLAP_TOLERANCE)]
    #[serde(default = "default_overlap_tolerance")]
    pub overlap_tolerance: f64,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_overlap_tolerance() -> f64 {
    DEFAULT_OVERLAP_TOLERANCE
}

impl SessionConfig {
    /// Builds the validated workflow configuration.
    pub fn workflow_config(&self) -> anyhow::Result<WorkflowConfig> {
        WorkflowConfig::builder()
            .fetch_timeout(Duration::from_secs(self.fetch_timeout_secs))
            .snap_timeout(Duration::from_secs(self.snap_timeout_secs))
            .persist_timeout(Duration::from_secs(self.persist_timeout_secs))
            .overlap_tolerance(self.overlap_tolerance)
            .build()
            .context("invalid session configuration")
    }

    /// Logs the session configuration.
    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            fetch_timeout_secs = self.fetch_timeout_secs,
            snap_timeout_secs = self.snap_timeout_secs,
            persist_timeout_secs = self.persist_timeout_secs,
            overlap_tolerance = self.overlap_tolerance,
            "Session configuration"
        );
    }
}
