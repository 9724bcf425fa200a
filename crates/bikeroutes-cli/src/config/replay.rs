//! Replay input configuration.

use std::path::PathBuf;

use anyhow::Context;
use bikeroutes_core::{DrawnPath, RoadAttributes, RoadCondition, RoadSurface, RoadType};
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_CONFIG;

/// Drawn paths to replay and the attributes selected while drawing them.
#[derive(Debug, Clone, Serialize, Deserialize, Args)]
pub struct ReplayConfig {
    /// JSON file holding an array of drawn paths.
    #[arg(long = "paths", env = "REPLAY_PATHS")]
    pub paths: PathBuf,

    /// Road type selected for every replayed path.
    #[arg(long = "road-type", env = "ROAD_TYPE", default_value = "separated")]
    #[serde(default)]
    pub road_type: RoadType,

    /// Road surface selected for every replayed path.
    #[arg(long = "road-surface", env = "ROAD_SURFACE", default_value = "asphalt")]
    #[serde(default)]
    pub road_surface: RoadSurface,

    /// Road condition selected for every replayed path.
    #[arg(long = "road-condition", env = "ROAD_CONDITION", default_value = "very_good")]
    #[serde(default)]
    pub road_condition: RoadCondition,
}

impl ReplayConfig {
    /// Returns the attributes to draw with.
    pub fn attributes(&self) -> RoadAttributes {
        RoadAttributes::new(self.road_type, self.road_surface, self.road_condition)
    }

    /// Reads and parses the input file.
    pub async fn load_paths(&self) -> anyhow::Result<Vec<DrawnPath>> {
        let contents = tokio::fs::read(&self.paths)
            .await
            .with_context(|| format!("failed to read {}", self.paths.display()))?;
        let paths: Vec<DrawnPath> = serde_json::from_slice(&contents)
            .with_context(|| format!("failed to parse {}", self.paths.display()))?;

        for (index, path) in paths.iter().enumerate() {
            for point in path.points() {
                point
                    .validate()
                    .with_context(|| format!("invalid point in path {index}"))?;
            }
        }

        Ok(paths)
    }

    /// Logs the replay configuration.
    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            paths = %self.paths.display(),
            road_type = %self.road_type,
            road_surface = %self.road_surface,
            road_condition = %self.road_condition,
            "Replay configuration"
        );
    }
}
