//! Events accepted by the machine and the effects it asks its host to run.

use std::fmt;

use bikeroutes_core::{
    DrawnPath, Error, RoadAttributes, RoadCondition, RoadSurface, RoadType, Route, SnappedPath,
};
use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

/// An input to the drawing workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, IntoStaticStr)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Event {
    /// Starts the session by loading existing routes.
    BeginSession,
    /// The user finished a freehand stroke.
    PathDrawn(DrawnPath),
    /// Abandons the current stroke.
    Cancel,
    /// Selects the road type.
    SetRoadType(RoadType),
    /// Selects the road surface.
    SetRoadSurface(RoadSurface),
    /// Selects the road condition.
    SetRoadCondition(RoadCondition),
    /// Leaves the error phase.
    Retry,
    /// Reloads every route from the persistence layer.
    Reload,
}

impl Event {
    /// Returns the event name used in logs.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.into()
    }
}

/// Identifies one collaborator call.
///
/// Tickets increase monotonically; an outcome carrying a ticket other than
/// the one in flight is stale and gets discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub(crate) const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw ticket number.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A collaborator call requested by a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Load every persisted route.
    LoadRoutes {
        /// Ticket to resolve with.
        ticket: Ticket,
    },
    /// Snap the pending path to the road network.
    SnapToRoad {
        /// Ticket to resolve with.
        ticket: Ticket,
        /// Path to snap.
        path: DrawnPath,
    },
    /// Persist a snapped path with the attributes current at call time.
    PersistRoute {
        /// Ticket to resolve with.
        ticket: Ticket,
        /// Snapped points.
        points: SnappedPath,
        /// Attributes to persist with.
        attributes: RoadAttributes,
    },
}

impl Effect {
    /// Returns the ticket this effect must be resolved with.
    pub const fn ticket(&self) -> Ticket {
        match self {
            Self::LoadRoutes { ticket }
            | Self::SnapToRoad { ticket, .. }
            | Self::PersistRoute { ticket, .. } => *ticket,
        }
    }
}

/// Result of a collaborator call, fed back through [`DrawMachine::resolve`].
///
/// [`DrawMachine::resolve`]: super::DrawMachine::resolve
#[derive(Debug)]
pub enum Outcome {
    /// Existing routes were loaded.
    RoutesLoaded(Vec<Route>),
    /// The pending path was snapped.
    Snapped(SnappedPath),
    /// The snapped path was persisted.
    Persisted(Route),
    /// The call failed or timed out.
    Failed(Error),
}
