//! Convenience re-exports for hosts of the workflow.

pub use bikeroutes_core::prelude::*;

pub use crate::{
    Dispatch, Event, Failure, FailureKind, OverlapVoteCoordinator, Panel, PanelToggleCoordinator,
    Phase, RouteAdded, TutorialCoordinator, WorkflowConfig, WorkflowError, WorkflowHandle,
    WorkflowResult, WorkflowSession, WorkflowSnapshot,
};
