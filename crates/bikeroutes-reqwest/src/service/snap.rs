//! Road snapping over `POST /api/google/roads`.

use std::time::Instant;

use bikeroutes_core::{EncodedPath, LatLng, SnapProvider, SnappedPath};
use serde::{Deserialize, Serialize};

use super::SNAP_PATH;
use crate::connect::{ApiClient, TRACING_TARGET};

/// Body of a snap request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapRequest {
    /// Pipe-delimited `lat,lng` pairs.
    pub path: String,
}

impl From<&EncodedPath> for SnapRequest {
    fn from(path: &EncodedPath) -> Self {
        Self {
            path: path.as_str().to_owned(),
        }
    }
}

/// Body of a snap response, as relayed from the upstream roads API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapResponse {
    /// Snapped points in road order; absent when nothing could be snapped.
    #[serde(default)]
    pub snapped_points: Vec<SnappedPoint>,
}

/// One snapped point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnappedPoint {
    /// Position on the road.
    pub location: SnappedLocation,
    /// Index of the drawn point this one was snapped from. Absent for
    /// interpolated points.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_index: Option<u32>,
    /// Upstream identifier of the road segment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
}

/// Position of a snapped point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnappedLocation {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

impl From<SnappedLocation> for LatLng {
    fn from(location: SnappedLocation) -> Self {
        LatLng::new(location.latitude, location.longitude)
    }
}

impl From<SnapResponse> for SnappedPath {
    fn from(response: SnapResponse) -> Self {
        response
            .snapped_points
            .into_iter()
            .map(|point| LatLng::from(point.location))
            .collect()
    }
}

#[async_trait::async_trait]
impl SnapProvider for ApiClient {
    async fn snap_to_road(&self, path: &EncodedPath) -> bikeroutes_core::Result<SnappedPath> {
        let started_at = Instant::now();
        let url = self.endpoint(SNAP_PATH)?;
        let body = SnapRequest::from(path);

        tracing::debug!(target: TRACING_TARGET, url = %url, "Snapping path to road");

        let response: SnapResponse = self.fetch_json(self.http().post(url).json(&body)).await?;
        let snapped = SnappedPath::from(response);

        tracing::debug!(
            target: TRACING_TARGET,
            snapped_points = snapped.len(),
            elapsed_ms = started_at.elapsed().as_millis(),
            "Path snapped"
        );

        Ok(snapped)
    }
}
