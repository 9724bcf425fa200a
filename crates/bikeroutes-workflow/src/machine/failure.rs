//! The error record kept while the workflow sits in the error phase.

use bikeroutes_core::{Error, ErrorKind};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, IntoStaticStr};

/// Which collaborator step failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, AsRefStr, Display, IntoStaticStr)]
#[strum(serialize_all = "PascalCase")]
pub enum FailureKind {
    /// Loading existing routes failed.
    FetchRoutesFailed,
    /// Snapping the drawn path failed.
    SnapToRoadFailed,
    /// Persisting the snapped route failed.
    PersistRouteFailed,
}

/// A collaborator failure, as shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Failure {
    /// Step that failed.
    pub kind: FailureKind,
    /// Classification of the underlying error.
    pub cause: ErrorKind,
    /// Human readable message.
    pub message: String,
    /// Whether retrying the step may succeed.
    pub retryable: bool,
    /// When the failure was observed.
    pub occurred_at: Timestamp,
}

impl Failure {
    /// Records a failure of the given step.
    pub fn new(kind: FailureKind, error: &Error) -> Self {
        Self {
            kind,
            cause: error.kind,
            message: error.describe(),
            retryable: error.is_retryable(),
            occurred_at: Timestamp::now(),
        }
    }

    /// Returns true if the underlying call timed out.
    pub fn is_timeout(&self) -> bool {
        self.cause == ErrorKind::Timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_keeps_cause_and_message() {
        let error = Error::timeout().with_message("snapping timed out");
        let failure = Failure::new(FailureKind::SnapToRoadFailed, &error);
        assert_eq!(failure.cause, ErrorKind::Timeout);
        assert_eq!(failure.message, "snapping timed out");
        assert!(failure.retryable);
        assert!(failure.is_timeout());
    }

    #[test]
    fn message_falls_back_to_kind() {
        let failure = Failure::new(FailureKind::PersistRouteFailed, &Error::invalid_input());
        assert_eq!(failure.message, "invalid_input");
        assert!(!failure.retryable);
        assert_eq!(failure.kind.to_string(), "PersistRouteFailed");
    }
}
