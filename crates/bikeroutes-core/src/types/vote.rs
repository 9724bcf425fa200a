//! Votes on the condition of overlapping routes.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{RoadCondition, RouteId};

/// A user's opinion on which condition is correct for a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteCandidate {
    /// Unique identifier of this vote.
    pub vote_id: Uuid,
    /// Route the vote is about.
    pub route_id: RouteId,
    /// Condition the user picked.
    pub condition: RoadCondition,
    /// When the vote was recorded.
    pub recorded_at: Timestamp,
}

impl VoteCandidate {
    /// Records a vote now.
    pub fn new(route_id: RouteId, condition: RoadCondition) -> Self {
        Self {
            vote_id: Uuid::now_v7(),
            route_id,
            condition,
            recorded_at: Timestamp::now(),
        }
    }
}
