//! Read-only view of the workflow state.

use bikeroutes_core::{DrawnPath, Polyline, RoadAttributes, Route, RouteId};
use serde::{Deserialize, Serialize};

use super::{Failure, Phase};

/// The state read by rendering hosts on every frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowSnapshot {
    /// Current phase.
    pub phase: Phase,
    /// Attributes currently selected in the pickers.
    pub attributes: RoadAttributes,
    /// Every known route, ordered by id.
    pub existing_routes: Vec<Route>,
    /// Path being processed, if any.
    pub pending_path: Option<DrawnPath>,
    /// Failure that put the workflow in the error phase.
    pub last_error: Option<Failure>,
}

impl WorkflowSnapshot {
    /// Returns true if freehand input should be enabled.
    pub fn accepts_drawing(&self) -> bool {
        self.phase.accepts_drawing()
    }

    /// Looks up a known route.
    pub fn route(&self, id: RouteId) -> Option<&Route> {
        self.existing_routes.iter().find(|route| route.id == id)
    }

    /// Builds the polylines to render, one per known route.
    pub fn polylines(&self) -> Vec<Polyline> {
        self.existing_routes.iter().map(Route::polyline).collect()
    }
}
