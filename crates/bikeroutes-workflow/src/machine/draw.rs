//! Transition function of the drawing workflow.

use std::collections::BTreeMap;

use bikeroutes_core::{DrawnPath, Error, RoadAttributes, Route, RouteId, SnappedPath};

use super::{
    Effect, Event, Failure, FailureKind, Outcome, Phase, TRACING_TARGET, Ticket, WorkflowSnapshot,
};

/// Result of applying one event or outcome.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct Transition {
    /// Whether the input changed anything.
    pub accepted: bool,
    /// Phase before the input.
    pub from: Phase,
    /// Phase after the input.
    pub to: Phase,
    /// Collaborator call the host must run next.
    pub effect: Option<Effect>,
    /// Route added to the known set by this input.
    pub route_added: Option<Route>,
}

impl Transition {
    fn unchanged(phase: Phase) -> Self {
        Self {
            accepted: true,
            ..Self::ignored(phase)
        }
    }

    fn ignored(phase: Phase) -> Self {
        Self {
            accepted: false,
            from: phase,
            to: phase,
            effect: None,
            route_added: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Fetch,
    Snap,
    Persist,
}

impl Step {
    const fn failure_kind(self) -> FailureKind {
        match self {
            Self::Fetch => FailureKind::FetchRoutesFailed,
            Self::Snap => FailureKind::SnapToRoadFailed,
            Self::Persist => FailureKind::PersistRouteFailed,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct InFlight {
    ticket: Ticket,
    step: Step,
}

/// State machine governing one drawing session.
///
/// Only [`Phase::Drawing`] accepts a new path, so at most one snap and
/// persist cycle exists at any time. Attribute setters apply in every
/// phase; the persist step reads them when it is issued, so the last
/// selection made before that moment wins.
#[derive(Debug, Clone, Default)]
pub struct DrawMachine {
    phase: Phase,
    attributes: RoadAttributes,
    existing_routes: BTreeMap<RouteId, Route>,
    pending_path: Option<DrawnPath>,
    last_error: Option<Failure>,
    next_ticket: u64,
    in_flight: Option<InFlight>,
}

impl DrawMachine {
    /// Creates a machine in the idle phase with default attributes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a machine with preselected attributes.
    pub fn with_attributes(attributes: RoadAttributes) -> Self {
        Self {
            attributes,
            ..Self::default()
        }
    }

    /// Returns the current phase.
    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the currently selected attributes.
    #[inline]
    pub fn attributes(&self) -> RoadAttributes {
        self.attributes
    }

    /// Iterates over the known routes in id order.
    pub fn existing_routes(&self) -> impl ExactSizeIterator<Item = &Route> {
        self.existing_routes.values()
    }

    /// Returns the path being processed.
    pub fn pending_path(&self) -> Option<&DrawnPath> {
        self.pending_path.as_ref()
    }

    /// Returns the failure that caused the error phase.
    pub fn last_error(&self) -> Option<&Failure> {
        self.last_error.as_ref()
    }

    /// Returns the ticket of the outstanding collaborator call.
    pub fn in_flight(&self) -> Option<Ticket> {
        self.in_flight.map(|in_flight| in_flight.ticket)
    }

    /// Captures the current state.
    pub fn snapshot(&self) -> WorkflowSnapshot {
        WorkflowSnapshot {
            phase: self.phase,
            attributes: self.attributes,
            existing_routes: self.existing_routes.values().cloned().collect(),
            pending_path: self.pending_path.clone(),
            last_error: self.last_error.clone(),
        }
    }

    /// Applies an event.
    pub fn dispatch(&mut self, event: Event) -> Transition {
        let from = self.phase;
        let name = event.name();

        let transition = match (from, event) {
            (_, Event::SetRoadType(road_type)) => {
                self.attributes.road_type = road_type;
                Transition::unchanged(from)
            }
            (_, Event::SetRoadSurface(surface)) => {
                self.attributes.surface = surface;
                Transition::unchanged(from)
            }
            (_, Event::SetRoadCondition(condition)) => {
                self.attributes.condition = condition;
                Transition::unchanged(from)
            }
            (Phase::Idle, Event::BeginSession) => self.start_fetch(from),
            (Phase::Drawing, Event::PathDrawn(path)) if !path.is_empty() => {
                let effect = Effect::SnapToRoad {
                    ticket: self.issue(Step::Snap),
                    path: path.clone(),
                };
                self.pending_path = Some(path);
                self.enter(from, Phase::Processing, Some(effect), None)
            }
            (Phase::Drawing, Event::Cancel) => Transition::unchanged(from),
            (Phase::Error, Event::Retry) if !self.fetch_failed() => {
                self.last_error = None;
                self.enter(from, Phase::Drawing, None, None)
            }
            (Phase::Error, Event::Retry) | (Phase::Drawing | Phase::Error, Event::Reload) => {
                self.start_fetch(from)
            }
            _ => Transition::ignored(from),
        };

        if transition.accepted {
            tracing::debug!(
                target: TRACING_TARGET,
                event = name,
                from = %transition.from,
                to = %transition.to,
                "Event applied"
            );
        } else {
            tracing::debug!(
                target: TRACING_TARGET,
                event = name,
                phase = %from,
                "Event ignored"
            );
        }

        transition
    }

    /// Feeds back the outcome of a collaborator call.
    ///
    /// Outcomes whose ticket is not the one in flight are discarded.
    pub fn resolve(&mut self, ticket: Ticket, outcome: Outcome) -> Transition {
        let from = self.phase;
        let Some(in_flight) = self.in_flight.filter(|in_flight| in_flight.ticket == ticket) else {
            tracing::debug!(
                target: TRACING_TARGET,
                %ticket,
                phase = %from,
                "Stale outcome discarded"
            );
            return Transition::ignored(from);
        };
        self.in_flight = None;

        let transition = match (in_flight.step, outcome) {
            (step, Outcome::Failed(error)) => self.fail(from, step, &error),
            (Step::Fetch, Outcome::RoutesLoaded(routes)) => {
                self.existing_routes = routes.into_iter().map(|route| (route.id, route)).collect();
                self.enter(from, Phase::Drawing, None, None)
            }
            (Step::Snap, Outcome::Snapped(points)) => self.snapped(from, points),
            (Step::Persist, Outcome::Persisted(route))
                if self.existing_routes.contains_key(&route.id) =>
            {
                let error = Error::external_error()
                    .with_message(format!("persisted route id {} already known", route.id));
                self.fail(from, Step::Persist, &error)
            }
            (Step::Persist, Outcome::Persisted(route)) => {
                self.existing_routes.insert(route.id, route.clone());
                self.pending_path = None;
                self.enter(from, Phase::Drawing, None, Some(route))
            }
            (step, _) => {
                let error = Error::internal_error()
                    .with_message("collaborator returned an outcome for a different step");
                self.fail(from, step, &error)
            }
        };

        tracing::debug!(
            target: TRACING_TARGET,
            %ticket,
            from = %transition.from,
            to = %transition.to,
            "Outcome applied"
        );

        transition
    }

    /// Fails the outstanding call, whatever its outcome would have been.
    pub fn abort_in_flight(&mut self, error: &Error) -> Transition {
        match self.in_flight.take() {
            Some(in_flight) => self.fail(self.phase, in_flight.step, error),
            None => Transition::ignored(self.phase),
        }
    }

    fn fetch_failed(&self) -> bool {
        self.last_error
            .as_ref()
            .is_some_and(|failure| failure.kind == FailureKind::FetchRoutesFailed)
    }

    fn snapped(&mut self, from: Phase, points: SnappedPath) -> Transition {
        if points.is_empty() {
            let error =
                Error::external_error().with_message("road snapping returned no points");
            return self.fail(from, Step::Snap, &error);
        }

        let effect = Effect::PersistRoute {
            ticket: self.issue(Step::Persist),
            points,
            attributes: self.attributes,
        };
        self.enter(from, Phase::Processing, Some(effect), None)
    }

    fn start_fetch(&mut self, from: Phase) -> Transition {
        self.last_error = None;
        let effect = Effect::LoadRoutes {
            ticket: self.issue(Step::Fetch),
        };
        self.enter(from, Phase::Fetching, Some(effect), None)
    }

    fn fail(&mut self, from: Phase, step: Step, error: &Error) -> Transition {
        let failure = Failure::new(step.failure_kind(), error);
        tracing::warn!(
            target: TRACING_TARGET,
            kind = %failure.kind,
            cause = %failure.cause,
            message = %failure.message,
            "Collaborator call failed"
        );

        self.in_flight = None;
        self.pending_path = None;
        self.last_error = Some(failure);
        self.enter(from, Phase::Error, None, None)
    }

    fn issue(&mut self, step: Step) -> Ticket {
        self.next_ticket += 1;
        let ticket = Ticket::new(self.next_ticket);
        self.in_flight = Some(InFlight { ticket, step });
        ticket
    }

    fn enter(
        &mut self,
        from: Phase,
        to: Phase,
        effect: Option<Effect>,
        route_added: Option<Route>,
    ) -> Transition {
        self.phase = to;
        Transition {
            accepted: true,
            from,
            to,
            effect,
            route_added,
        }
    }
}

#[cfg(test)]
mod tests {
    use bikeroutes_core::{ErrorKind, LatLng, RoadCondition, RoadSurface, RoadType};

    use super::*;

    fn drawn() -> DrawnPath {
        DrawnPath::new(vec![LatLng::new(51.09, 3.75), LatLng::new(51.10, 3.76)])
    }

    fn snapped() -> SnappedPath {
        SnappedPath::new(vec![LatLng::new(51.091, 3.751)])
    }

    fn route(id: i64, attributes: RoadAttributes) -> Route {
        Route::new(RouteId::new(id), snapped(), attributes)
    }

    /// Returns a machine in the drawing phase with the given routes loaded.
    fn drawing(routes: Vec<Route>) -> DrawMachine {
        let mut machine = DrawMachine::new();
        let effect = machine.dispatch(Event::BeginSession).effect.unwrap();
        let _ = machine.resolve(effect.ticket(), Outcome::RoutesLoaded(routes));
        assert_eq!(machine.phase(), Phase::Drawing);
        machine
    }

    fn persist_request(transition: &Transition) -> (Ticket, SnappedPath, RoadAttributes) {
        match transition.effect.clone() {
            Some(Effect::PersistRoute {
                ticket,
                points,
                attributes,
            }) => (ticket, points, attributes),
            other => panic!("expected persist effect, got {other:?}"),
        }
    }

    #[test]
    fn fresh_session_loads_empty_route_list() {
        let mut machine = DrawMachine::new();
        assert_eq!(machine.phase(), Phase::Idle);

        let begin = machine.dispatch(Event::BeginSession);
        assert_eq!(begin.to, Phase::Fetching);
        let Some(Effect::LoadRoutes { ticket }) = begin.effect else {
            panic!("expected load effect");
        };

        let loaded = machine.resolve(ticket, Outcome::RoutesLoaded(Vec::new()));
        assert_eq!(loaded.to, Phase::Drawing);
        assert_eq!(machine.existing_routes().len(), 0);
        assert!(machine.last_error().is_none());
    }

    #[test]
    fn drawn_path_is_snapped_then_persisted() {
        let mut machine = drawing(Vec::new());

        let drawn_transition = machine.dispatch(Event::PathDrawn(drawn()));
        assert_eq!(drawn_transition.to, Phase::Processing);
        assert_eq!(machine.pending_path(), Some(&drawn()));
        let Some(Effect::SnapToRoad { ticket, path }) = drawn_transition.effect else {
            panic!("expected snap effect");
        };
        assert_eq!(path, drawn());

        let snapped_transition = machine.resolve(ticket, Outcome::Snapped(snapped()));
        assert_eq!(snapped_transition.to, Phase::Processing);
        let (ticket, points, attributes) = persist_request(&snapped_transition);
        assert_eq!(points, snapped());

        let persisted = machine.resolve(ticket, Outcome::Persisted(route(1, attributes)));
        assert_eq!(persisted.to, Phase::Drawing);
        assert_eq!(persisted.route_added.map(|r| r.id), Some(RouteId::new(1)));
        assert_eq!(machine.existing_routes().len(), 1);
        assert!(machine.pending_path().is_none());
    }

    #[test]
    fn snap_failure_keeps_existing_routes() {
        let existing = route(4, RoadAttributes::default());
        let mut machine = drawing(vec![existing.clone()]);

        let ticket = machine.dispatch(Event::PathDrawn(drawn())).effect.unwrap().ticket();
        let failed = machine.resolve(ticket, Outcome::Failed(Error::network_error()));

        assert_eq!(failed.to, Phase::Error);
        let failure = machine.last_error().unwrap();
        assert_eq!(failure.kind, FailureKind::SnapToRoadFailed);
        assert_eq!(failure.cause, ErrorKind::NetworkError);
        assert_eq!(machine.existing_routes().cloned().collect::<Vec<_>>(), vec![existing]);
        assert!(machine.pending_path().is_none());
    }

    #[test]
    fn attribute_change_during_processing_wins() {
        let mut machine = drawing(Vec::new());

        let ticket = machine.dispatch(Event::PathDrawn(drawn())).effect.unwrap().ticket();
        let set = machine.dispatch(Event::SetRoadCondition(RoadCondition::Bad));
        assert!(set.accepted);
        assert_eq!(set.to, Phase::Processing);

        let (ticket, points, attributes) =
            persist_request(&machine.resolve(ticket, Outcome::Snapped(snapped())));
        assert_eq!(attributes.condition, RoadCondition::Bad);

        let persisted = Route::new(RouteId::new(1), points, attributes);
        let _ = machine.resolve(ticket, Outcome::Persisted(persisted));
        let stored = machine.existing_routes().next().unwrap();
        assert_eq!(stored.condition, RoadCondition::Bad);
    }

    #[test]
    fn last_attribute_write_in_any_phase_reaches_persist() {
        let mut machine = DrawMachine::new();
        let _ = machine.dispatch(Event::SetRoadType(RoadType::None));
        let fetch = machine.dispatch(Event::BeginSession).effect.unwrap().ticket();
        let _ = machine.dispatch(Event::SetRoadSurface(RoadSurface::Offroad));
        let _ = machine.dispatch(Event::SetRoadType(RoadType::Combined));
        let _ = machine.resolve(fetch, Outcome::RoutesLoaded(Vec::new()));
        let _ = machine.dispatch(Event::SetRoadCondition(RoadCondition::Average));

        let snap = machine.dispatch(Event::PathDrawn(drawn())).effect.unwrap().ticket();
        let _ = machine.dispatch(Event::SetRoadSurface(RoadSurface::Concrete));
        let (_, _, attributes) = persist_request(&machine.resolve(snap, Outcome::Snapped(snapped())));

        assert_eq!(
            attributes,
            RoadAttributes::new(RoadType::Combined, RoadSurface::Concrete, RoadCondition::Average)
        );
    }

    #[test]
    fn path_drawn_outside_drawing_is_ignored() {
        let mut machine = DrawMachine::new();
        assert!(!machine.dispatch(Event::PathDrawn(drawn())).accepted);
        assert_eq!(machine.phase(), Phase::Idle);

        let fetch = machine.dispatch(Event::BeginSession).effect.unwrap().ticket();
        assert!(!machine.dispatch(Event::PathDrawn(drawn())).accepted);
        assert_eq!(machine.phase(), Phase::Fetching);

        let _ = machine.resolve(fetch, Outcome::RoutesLoaded(Vec::new()));
        let snap = machine.dispatch(Event::PathDrawn(drawn())).effect.unwrap().ticket();
        let second = machine.dispatch(Event::PathDrawn(drawn()));
        assert!(!second.accepted);
        assert!(second.effect.is_none());
        assert_eq!(machine.in_flight(), Some(snap));

        let _ = machine.resolve(snap, Outcome::Failed(Error::timeout()));
        assert!(!machine.dispatch(Event::PathDrawn(drawn())).accepted);
        assert_eq!(machine.phase(), Phase::Error);
    }

    #[test]
    fn empty_drawn_path_is_ignored() {
        let mut machine = drawing(Vec::new());
        let transition = machine.dispatch(Event::PathDrawn(DrawnPath::default()));
        assert!(!transition.accepted);
        assert_eq!(machine.phase(), Phase::Drawing);
    }

    #[test]
    fn each_successful_cycle_adds_exactly_one_route() {
        let mut machine = drawing(vec![route(1, RoadAttributes::default())]);

        for id in 2..=5 {
            let before = machine.existing_routes().len();
            let snap = machine.dispatch(Event::PathDrawn(drawn())).effect.unwrap().ticket();
            let (persist, points, attributes) =
                persist_request(&machine.resolve(snap, Outcome::Snapped(snapped())));
            let route = Route::new(RouteId::new(id), points, attributes);
            let _ = machine.resolve(persist, Outcome::Persisted(route));

            assert_eq!(machine.existing_routes().len(), before + 1);
            assert!(machine.pending_path().is_none());
            assert_eq!(machine.phase(), Phase::Drawing);
        }
    }

    #[test]
    fn persisted_route_with_known_id_fails_the_step() {
        let mut machine = drawing(vec![route(1, RoadAttributes::default())]);
        let snap = machine.dispatch(Event::PathDrawn(drawn())).effect.unwrap().ticket();
        let (persist, points, attributes) =
            persist_request(&machine.resolve(snap, Outcome::Snapped(snapped())));

        let duplicate = Route::new(RouteId::new(1), points, attributes);
        let failed = machine.resolve(persist, Outcome::Persisted(duplicate));

        assert_eq!(failed.to, Phase::Error);
        assert!(failed.route_added.is_none());
        let failure = machine.last_error().unwrap();
        assert_eq!(failure.kind, FailureKind::PersistRouteFailed);
        assert_eq!(failure.cause, ErrorKind::ExternalError);
        assert!(failure.message.contains("already known"));
        assert_eq!(machine.existing_routes().len(), 1);
        assert!(machine.pending_path().is_none());
    }

    #[test]
    fn empty_snap_result_is_a_snap_failure() {
        let mut machine = drawing(Vec::new());
        let snap = machine.dispatch(Event::PathDrawn(drawn())).effect.unwrap().ticket();
        let failed = machine.resolve(snap, Outcome::Snapped(SnappedPath::default()));

        assert_eq!(failed.to, Phase::Error);
        assert!(failed.effect.is_none());
        assert_eq!(machine.last_error().unwrap().kind, FailureKind::SnapToRoadFailed);
    }

    #[test]
    fn persist_failure_is_reported_as_such() {
        let mut machine = drawing(Vec::new());
        let snap = machine.dispatch(Event::PathDrawn(drawn())).effect.unwrap().ticket();
        let (persist, _, _) = persist_request(&machine.resolve(snap, Outcome::Snapped(snapped())));
        let _ = machine.resolve(persist, Outcome::Failed(Error::service_unavailable()));

        assert_eq!(machine.phase(), Phase::Error);
        assert_eq!(machine.last_error().unwrap().kind, FailureKind::PersistRouteFailed);
        assert_eq!(machine.existing_routes().len(), 0);
    }

    #[test]
    fn fetch_failure_then_retry_fetches_again() {
        let mut machine = DrawMachine::new();
        let fetch = machine.dispatch(Event::BeginSession).effect.unwrap().ticket();
        let _ = machine.resolve(fetch, Outcome::Failed(Error::network_error()));
        assert_eq!(machine.last_error().unwrap().kind, FailureKind::FetchRoutesFailed);

        let retry = machine.dispatch(Event::Retry);
        assert_eq!(retry.to, Phase::Fetching);
        assert!(matches!(retry.effect, Some(Effect::LoadRoutes { .. })));
        assert!(machine.last_error().is_none());
    }

    #[test]
    fn retry_after_processing_failure_returns_to_drawing() {
        let existing = route(1, RoadAttributes::default());
        let mut machine = drawing(vec![existing]);
        let snap = machine.dispatch(Event::PathDrawn(drawn())).effect.unwrap().ticket();
        let _ = machine.resolve(snap, Outcome::Failed(Error::timeout()));

        let retry = machine.dispatch(Event::Retry);
        assert_eq!(retry.to, Phase::Drawing);
        assert!(retry.effect.is_none());
        assert!(machine.last_error().is_none());
        assert_eq!(machine.existing_routes().len(), 1);
    }

    #[test]
    fn retry_after_failed_reload_fetches_again() {
        let mut machine = drawing(vec![route(1, RoadAttributes::default())]);
        let reload = machine.dispatch(Event::Reload).effect.unwrap().ticket();
        let _ = machine.resolve(reload, Outcome::Failed(Error::network_error()));
        assert_eq!(machine.last_error().unwrap().kind, FailureKind::FetchRoutesFailed);

        let retry = machine.dispatch(Event::Retry);
        assert_eq!(retry.to, Phase::Fetching);
        assert!(matches!(retry.effect, Some(Effect::LoadRoutes { .. })));
        assert!(machine.last_error().is_none());
    }

    #[test]
    fn retry_outside_error_is_ignored() {
        let mut machine = drawing(Vec::new());
        assert!(!machine.dispatch(Event::Retry).accepted);
        assert!(!machine.dispatch(Event::BeginSession).accepted);
    }

    #[test]
    fn reload_replaces_existing_routes() {
        let mut machine = drawing(vec![
            route(1, RoadAttributes::default()),
            route(2, RoadAttributes::default()),
        ]);

        let reload = machine.dispatch(Event::Reload);
        assert_eq!(reload.to, Phase::Fetching);
        let ticket = reload.effect.unwrap().ticket();
        let _ = machine.resolve(ticket, Outcome::RoutesLoaded(vec![route(3, RoadAttributes::default())]));

        let ids: Vec<_> = machine.existing_routes().map(|r| r.id.get()).collect();
        assert_eq!(ids, vec![3]);
    }

    #[test]
    fn cancel_is_a_self_transition_in_drawing() {
        let mut machine = drawing(Vec::new());
        let cancel = machine.dispatch(Event::Cancel);
        assert!(cancel.accepted);
        assert_eq!((cancel.from, cancel.to), (Phase::Drawing, Phase::Drawing));
        assert!(cancel.effect.is_none());
    }

    #[test]
    fn stale_outcomes_are_discarded() {
        let mut machine = drawing(Vec::new());
        let snap = machine.dispatch(Event::PathDrawn(drawn())).effect.unwrap().ticket();
        let (persist, _, attributes) =
            persist_request(&machine.resolve(snap, Outcome::Snapped(snapped())));

        let stale = machine.resolve(snap, Outcome::Snapped(snapped()));
        assert!(!stale.accepted);
        assert_eq!(machine.in_flight(), Some(persist));

        let _ = machine.resolve(persist, Outcome::Persisted(route(1, attributes)));
        let late = machine.resolve(persist, Outcome::Persisted(route(2, attributes)));
        assert!(!late.accepted);
        assert_eq!(machine.existing_routes().len(), 1);
    }

    #[test]
    fn mismatched_outcome_fails_the_step() {
        let mut machine = drawing(Vec::new());
        let snap = machine.dispatch(Event::PathDrawn(drawn())).effect.unwrap().ticket();
        let _ = machine.resolve(snap, Outcome::RoutesLoaded(Vec::new()));

        let failure = machine.last_error().unwrap();
        assert_eq!(failure.kind, FailureKind::SnapToRoadFailed);
        assert_eq!(failure.cause, ErrorKind::InternalError);
    }

    #[test]
    fn abort_fails_the_outstanding_step() {
        let mut machine = DrawMachine::new();
        assert!(!machine.abort_in_flight(&Error::internal_error()).accepted);

        let _ = machine.dispatch(Event::BeginSession);
        let aborted = machine.abort_in_flight(&Error::internal_error());
        assert_eq!(aborted.to, Phase::Error);
        assert_eq!(machine.last_error().unwrap().kind, FailureKind::FetchRoutesFailed);
        assert!(machine.in_flight().is_none());
    }

    #[test]
    fn snapshot_reflects_state() {
        let mut machine = drawing(vec![route(2, RoadAttributes::default())]);
        let _ = machine.dispatch(Event::PathDrawn(drawn()));

        let snapshot = machine.snapshot();
        assert_eq!(snapshot.phase, Phase::Processing);
        assert!(!snapshot.accepts_drawing());
        assert_eq!(snapshot.pending_path, Some(drawn()));
        assert!(snapshot.route(RouteId::new(2)).is_some());
        assert_eq!(snapshot.polylines().len(), 1);
    }
}
