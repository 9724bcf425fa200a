//! Road snapping service wrapper.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use super::TRACING_TARGET_SNAP;
use crate::{DrawnPath, Error, Result, SnapProvider, SnappedPath};

/// Road snapping service with structured logging.
#[derive(Clone)]
pub struct SnapService {
    inner: Arc<dyn SnapProvider>,
}

impl fmt::Debug for SnapService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapService").finish_non_exhaustive()
    }
}

impl SnapService {
    /// Creates a new snap service wrapper.
    pub fn new<P>(provider: P) -> Self
    where
        P: SnapProvider + 'static,
    {
        Self {
            inner: Arc::new(provider),
        }
    }

    /// Snaps a drawn path onto the road network.
    ///
    /// An empty drawn path is rejected before reaching the provider.
    pub async fn snap_to_road(&self, path: &DrawnPath) -> Result<SnappedPath> {
        if path.is_empty() {
            return Err(Error::invalid_input().with_message("drawn path has no points"));
        }

        let started_at = Instant::now();
        let encoded = path.encode();

        tracing::debug!(
            target: TRACING_TARGET_SNAP,
            drawn_points = path.len(),
            "Snapping drawn path to road"
        );

        let result = self.inner.snap_to_road(&encoded).await;
        let elapsed = started_at.elapsed();

        match &result {
            Ok(snapped) => {
                tracing::debug!(
                    target: TRACING_TARGET_SNAP,
                    drawn_points = path.len(),
                    snapped_points = snapped.len(),
                    elapsed_ms = elapsed.as_millis(),
                    "Drawn path snapped"
                );
            }
            Err(error) => {
                tracing::error!(
                    target: TRACING_TARGET_SNAP,
                    error = %error,
                    elapsed_ms = elapsed.as_millis(),
                    "Road snapping failed"
                );
            }
        }

        result
    }
}
