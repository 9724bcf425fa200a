//! The route drawing state machine.
//!
//! [`DrawMachine`] is a pure transition function: it never performs I/O.
//! Accepting an event may yield an [`Effect`] describing a collaborator
//! call, and the host feeds the result back with [`DrawMachine::resolve`].
//! The async host lives in [`crate::session`].

mod draw;
mod event;
mod failure;
mod phase;
mod snapshot;

pub use draw::{DrawMachine, Transition};
pub use event::{Effect, Event, Outcome, Ticket};
pub use failure::{Failure, FailureKind};
pub use phase::Phase;
pub use snapshot::WorkflowSnapshot;

/// Tracing target for state transitions.
pub const TRACING_TARGET: &str = "bikeroutes_workflow::machine";
