//! Condition voting on routes that overlap at a point.

use std::collections::BTreeMap;

use bikeroutes_core::{
    LatLng, RoadCondition, Route, RouteColor, RouteId, VoteCandidate, VoteService,
};
use geo::{Closest, ClosestPoint, Distance, Euclidean, Point};
use serde::{Deserialize, Serialize};

use crate::WorkflowConfig;

/// Tracing target for vote coordination.
pub const TRACING_TARGET: &str = "bikeroutes_workflow::vote";

/// One entry of the condition picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteChoice {
    /// Route the entry stands for.
    pub route_id: RouteId,
    /// Condition that route currently carries.
    pub condition: RoadCondition,
    /// Stroke color of that condition.
    pub color: RouteColor,
}

/// Routes under the inspected point and whether the picker is shown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VoteState {
    /// Routes passing within tolerance of the point.
    pub overlapping: Vec<Route>,
    /// True only when more than one route overlaps.
    pub visible: bool,
}

/// Lets a user pick the correct condition among overlapping routes.
///
/// Votes are kept in a local ballot and forwarded to an optional
/// [`VoteService`]. Forwarding failures are logged and otherwise ignored.
#[derive(Debug, Clone)]
pub struct OverlapVoteCoordinator {
    tolerance: f64,
    state: VoteState,
    ballot: Vec<VoteCandidate>,
    votes: Option<VoteService>,
}

impl OverlapVoteCoordinator {
    /// Creates a coordinator matching routes within `tolerance` degrees.
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance,
            state: VoteState::default(),
            ballot: Vec::new(),
            votes: None,
        }
    }

    /// Creates a coordinator using the configured tolerance.
    pub fn from_config(config: &WorkflowConfig) -> Self {
        Self::new(config.overlap_tolerance)
    }

    /// Forwards submitted votes to `votes`.
    pub fn with_vote_service(mut self, votes: VoteService) -> Self {
        self.votes = Some(votes);
        self
    }

    /// Returns the matching tolerance in degrees.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Collects the routes passing within tolerance of `location`.
    ///
    /// The picker becomes visible only if more than one route matches.
    pub fn inspect<'a>(
        &mut self,
        location: LatLng,
        routes: impl IntoIterator<Item = &'a Route>,
    ) -> &VoteState {
        let point = Point::from(location);
        let overlapping: Vec<Route> = routes
            .into_iter()
            .filter(|route| distance_to(route, point).is_some_and(|d| d <= self.tolerance))
            .cloned()
            .collect();

        tracing::debug!(
            target: TRACING_TARGET,
            location = %location,
            overlapping = overlapping.len(),
            "Inspected location"
        );

        self.state = VoteState {
            visible: overlapping.len() > 1,
            overlapping,
        };
        &self.state
    }

    /// Returns the current state.
    pub fn state(&self) -> &VoteState {
        &self.state
    }

    /// Returns true if the picker should be shown.
    pub fn is_visible(&self) -> bool {
        self.state.visible
    }

    /// Returns the picker entries, one per overlapping route.
    pub fn choices(&self) -> Vec<VoteChoice> {
        if !self.state.visible {
            return Vec::new();
        }

        self.state
            .overlapping
            .iter()
            .map(|route| VoteChoice {
                route_id: route.id,
                condition: route.condition,
                color: route.color(),
            })
            .collect()
    }

    /// Hides the picker without voting.
    pub fn dismiss(&mut self) {
        self.state = VoteState::default();
    }

    /// Records a vote for `route_id` and hides the picker.
    ///
    /// Returns `None` without recording anything if the picker is hidden or
    /// the route is not among the overlapping ones.
    pub async fn submit_vote(
        &mut self,
        route_id: RouteId,
        condition: RoadCondition,
    ) -> Option<VoteCandidate> {
        let known = self.state.visible
            && self
                .state
                .overlapping
                .iter()
                .any(|route| route.id == route_id);
        if !known {
            tracing::debug!(
                target: TRACING_TARGET,
                route_id = %route_id,
                "Vote ignored for route outside the picker"
            );
            return None;
        }

        let vote = VoteCandidate::new(route_id, condition);
        self.ballot.push(vote.clone());
        self.dismiss();

        if let Some(votes) = &self.votes {
            // Failures are already logged by the service.
            let _ = votes.submit_vote(&vote).await;
        }

        Some(vote)
    }

    /// Returns every vote recorded so far.
    pub fn ballot(&self) -> &[VoteCandidate] {
        &self.ballot
    }

    /// Counts recorded votes per route and condition.
    pub fn tally(&self) -> BTreeMap<RouteId, BTreeMap<RoadCondition, usize>> {
        let mut tally: BTreeMap<RouteId, BTreeMap<RoadCondition, usize>> = BTreeMap::new();
        for vote in &self.ballot {
            *tally
                .entry(vote.route_id)
                .or_default()
                .entry(vote.condition)
                .or_default() += 1;
        }
        tally
    }
}

/// Planar distance, in degrees, from `point` to the route's polyline.
fn distance_to(route: &Route, point: Point<f64>) -> Option<f64> {
    match route.points.points() {
        [] => None,
        [only] => Some(Euclidean.distance(Point::from(*only), point)),
        _ => match route.points.to_line_string().closest_point(&point) {
            Closest::Intersection(closest) | Closest::SinglePoint(closest) => {
                Some(Euclidean.distance(closest, point))
            }
            Closest::Indeterminate => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use bikeroutes_core::{ErrorKind, RoadAttributes, SnappedPath};
    use bikeroutes_test::MockVoteProvider;

    use super::*;

    fn route(id: i64, condition: RoadCondition, points: Vec<LatLng>) -> Route {
        Route::new(
            RouteId::new(id),
            SnappedPath::new(points),
            RoadAttributes::default().with_condition(condition),
        )
    }

    /// Two routes sharing a segment along latitude 51.09, and one far away.
    fn routes() -> Vec<Route> {
        vec![
            route(
                1,
                RoadCondition::Good,
                vec![LatLng::new(51.09, 3.75), LatLng::new(51.09, 3.76)],
            ),
            route(
                2,
                RoadCondition::Bad,
                vec![
                    LatLng::new(51.08, 3.755),
                    LatLng::new(51.09, 3.755),
                    LatLng::new(51.09, 3.765),
                ],
            ),
            route(
                3,
                RoadCondition::Average,
                vec![LatLng::new(51.20, 3.90), LatLng::new(51.21, 3.91)],
            ),
        ]
    }

    #[test]
    fn overlapping_routes_show_the_picker() {
        let routes = routes();
        let mut votes = OverlapVoteCoordinator::new(1e-4);
        let state = votes.inspect(LatLng::new(51.090_05, 3.758), &routes);

        let ids: Vec<_> = state.overlapping.iter().map(|r| r.id.get()).collect();
        assert_eq!(ids, vec![1, 2]);
        assert!(state.visible);

        let choices = votes.choices();
        assert_eq!(choices[0].condition, RoadCondition::Good);
        assert_eq!(choices[1].color, RouteColor::Red);
    }

    #[test]
    fn single_match_never_shows_the_picker() {
        let routes = routes();
        let mut votes = OverlapVoteCoordinator::new(1e-4);
        let state = votes.inspect(LatLng::new(51.09, 3.751), &routes);

        assert_eq!(state.overlapping.len(), 1);
        assert!(!state.visible);
        assert!(votes.choices().is_empty());
    }

    #[test]
    fn single_point_routes_are_matched_by_distance() {
        let routes = vec![
            route(1, RoadCondition::Good, vec![LatLng::new(51.0, 3.0)]),
            route(2, RoadCondition::Bad, vec![LatLng::new(51.0, 3.000_05)]),
            route(3, RoadCondition::Bad, Vec::new()),
        ];
        let mut votes = OverlapVoteCoordinator::new(1e-4);
        assert_eq!(votes.inspect(LatLng::new(51.0, 3.0), &routes).overlapping.len(), 2);
    }

    #[tokio::test]
    async fn vote_is_recorded_and_hides_the_picker() {
        let routes = routes();
        let provider = MockVoteProvider::new();
        let mut votes = OverlapVoteCoordinator::new(1e-4)
            .with_vote_service(VoteService::new(provider.clone()));
        votes.inspect(LatLng::new(51.09, 3.758), &routes);

        let vote = votes.submit_vote(RouteId::new(2), RoadCondition::Average).await.unwrap();
        assert_eq!(vote.route_id, RouteId::new(2));
        assert!(!votes.is_visible());
        assert_eq!(votes.ballot().len(), 1);
        assert_eq!(provider.votes(), vec![vote]);
    }

    #[tokio::test]
    async fn vote_for_unlisted_route_is_ignored() {
        let routes = routes();
        let mut votes = OverlapVoteCoordinator::new(1e-4);
        votes.inspect(LatLng::new(51.09, 3.758), &routes);

        assert!(votes.submit_vote(RouteId::new(3), RoadCondition::Bad).await.is_none());
        assert!(votes.is_visible());
        assert!(votes.ballot().is_empty());
    }

    #[tokio::test]
    async fn forwarding_failure_is_swallowed() {
        let routes = routes();
        let provider = MockVoteProvider::failing(ErrorKind::NetworkError);
        let mut votes = OverlapVoteCoordinator::new(1e-4)
            .with_vote_service(VoteService::new(provider));
        votes.inspect(LatLng::new(51.09, 3.758), &routes);

        assert!(votes.submit_vote(RouteId::new(1), RoadCondition::Good).await.is_some());
        assert_eq!(votes.ballot().len(), 1);
    }

    #[tokio::test]
    async fn tally_counts_per_route_and_condition() {
        let routes = routes();
        let mut votes = OverlapVoteCoordinator::new(1e-4);
        for condition in [RoadCondition::Bad, RoadCondition::Bad, RoadCondition::Good] {
            votes.inspect(LatLng::new(51.09, 3.758), &routes);
            votes.submit_vote(RouteId::new(2), condition).await;
        }

        let tally = votes.tally();
        assert_eq!(tally[&RouteId::new(2)][&RoadCondition::Bad], 2);
        assert_eq!(tally[&RouteId::new(2)][&RoadCondition::Good], 1);
        assert!(!tally.contains_key(&RouteId::new(1)));
    }

    #[test]
    fn dismiss_clears_the_picker() {
        let routes = routes();
        let mut votes = OverlapVoteCoordinator::from_config(&WorkflowConfig::default());
        votes.inspect(LatLng::new(51.09, 3.758), &routes);
        votes.dismiss();
        assert!(!votes.is_visible());
        assert!(votes.state().overlapping.is_empty());
    }
}
