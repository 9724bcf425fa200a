//! Async host of the drawing machine.
//!
//! [`WorkflowSession`] owns the [`DrawMachine`](crate::DrawMachine) inside a
//! single tokio task and runs the collaborator calls it requests. Every
//! other component talks to it through a cloneable [`WorkflowHandle`], so
//! the machine has exactly one writer.

mod actor;
mod handle;

use bikeroutes_core::{Route, RouteColor};
use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

pub use actor::WorkflowSession;
pub use handle::WorkflowHandle;

use crate::{Event, Phase};

/// Tracing target for session operations.
pub const TRACING_TARGET: &str = "bikeroutes_workflow::session";

/// Acknowledgement of a dispatched event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dispatch {
    /// Whether the event changed anything.
    pub accepted: bool,
    /// Phase before the event.
    pub from: Phase,
    /// Phase after the event.
    pub to: Phase,
}

/// Notification sent when a route joins the known set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteAdded {
    /// The persisted route.
    pub route: Route,
    /// Stroke color derived from the route's condition.
    pub color: RouteColor,
}

impl RouteAdded {
    /// Builds the notification for a route.
    pub fn new(route: Route) -> Self {
        let color = route.color();
        Self { route, color }
    }
}

#[derive(Debug)]
pub(crate) enum Command {
    Dispatch {
        event: Event,
        reply: oneshot::Sender<Dispatch>,
    },
    Shutdown {
        reply: oneshot::Sender<()>,
    },
}
