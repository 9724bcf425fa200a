//! Workflow error types.

use thiserror::Error;

use crate::WorkflowConfigBuilderError;

/// Result type for workflow operations.
pub type WorkflowResult<T> = Result<T, WorkflowError>;

/// Errors raised by the session plumbing.
///
/// Collaborator failures never surface here: they become a transition to
/// the `error` phase and are reported through the snapshot instead.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The session task has stopped and no longer accepts events.
    #[error("workflow session is closed")]
    SessionClosed,

    /// Configuration is invalid.
    #[error("invalid workflow configuration: {0}")]
    InvalidConfig(String),
}

impl From<WorkflowConfigBuilderError> for WorkflowError {
    fn from(error: WorkflowConfigBuilderError) -> Self {
        Self::InvalidConfig(error.to_string())
    }
}
