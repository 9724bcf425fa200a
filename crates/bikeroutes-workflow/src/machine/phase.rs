//! Lifecycle phases of a drawing session.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, IntoStaticStr};

/// Phase of the drawing workflow.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, AsRefStr, Display, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Waiting for the session to begin.
    #[default]
    Idle,
    /// Loading existing routes.
    Fetching,
    /// Accepting freehand paths.
    Drawing,
    /// Snapping and persisting the pending path.
    Processing,
    /// A collaborator call failed.
    Error,
}

impl Phase {
    /// Returns true if a collaborator call is outstanding in this phase.
    #[inline]
    pub const fn is_busy(self) -> bool {
        matches!(self, Self::Fetching | Self::Processing)
    }

    /// Returns true if freehand input should be enabled.
    #[inline]
    pub const fn accepts_drawing(self) -> bool {
        matches!(self, Self::Drawing)
    }
}
