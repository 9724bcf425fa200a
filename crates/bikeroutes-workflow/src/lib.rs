#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod error;
pub mod machine;
pub mod session;
pub mod toggle;
pub mod tutorial;
pub mod vote;

#[doc(hidden)]
pub mod prelude;

pub use config::{
    DEFAULT_CALL_TIMEOUT, DEFAULT_CHANNEL_CAPACITY, DEFAULT_OVERLAP_TOLERANCE, WorkflowConfig,
    WorkflowConfigBuilder, WorkflowConfigBuilderError,
};
pub use error::{WorkflowError, WorkflowResult};
pub use machine::{
    DrawMachine, Effect, Event, Failure, FailureKind, Outcome, Phase, Ticket, Transition,
    WorkflowSnapshot,
};
pub use session::{Dispatch, RouteAdded, WorkflowHandle, WorkflowSession};
pub use toggle::{Panel, PanelToggleCoordinator, ToggleEvent, ToggleState};
pub use tutorial::{TutorialCoordinator, TutorialEvent, TutorialStep};
pub use vote::{OverlapVoteCoordinator, VoteChoice, VoteState};
