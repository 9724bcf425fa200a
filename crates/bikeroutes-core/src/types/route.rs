//! Persisted routes and their rendering hand-off.

use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};

use super::{LatLng, RoadAttributes, RoadCondition, RoadSurface, RoadType, RouteColor, SnappedPath};

/// Identifier assigned to a route by the persistence layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(Serialize, Deserialize, Display, From, Into)]
#[serde(transparent)]
pub struct RouteId(i64);

impl RouteId {
    /// Creates a route identifier.
    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    #[inline]
    pub const fn get(self) -> i64 {
        self.0
    }
}

/// A snapped, attributed route owned by the persistence layer.
///
/// Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Identifier assigned on creation.
    pub id: RouteId,
    /// Road-accurate points, in order.
    #[serde(rename = "latlngString")]
    pub points: SnappedPath,
    /// Infrastructure type.
    #[serde(rename = "type")]
    pub road_type: RoadType,
    /// Pavement.
    pub surface: RoadSurface,
    /// Condition.
    pub condition: RoadCondition,
}

impl Route {
    /// Creates a route from a snapped path and the attributes it was drawn with.
    pub fn new(id: RouteId, points: SnappedPath, attributes: RoadAttributes) -> Self {
        Self {
            id,
            points,
            road_type: attributes.road_type,
            surface: attributes.surface,
            condition: attributes.condition,
        }
    }

    /// Returns the attributes the route was persisted with.
    pub fn attributes(&self) -> RoadAttributes {
        RoadAttributes::new(self.road_type, self.surface, self.condition)
    }

    /// Returns the stroke color of this route.
    pub fn color(&self) -> RouteColor {
        self.condition.color()
    }

    /// Builds the object handed to the rendering layer.
    pub fn polyline(&self) -> Polyline {
        Polyline {
            route_id: self.id,
            points: self.points.points().to_vec(),
            color: self.color(),
            condition: self.condition,
        }
    }
}

/// A rendered route: geometry, stroke color and the condition it encodes.
///
/// The condition travels with the polyline so consumers never have to
/// recover it from the stroke color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    /// Route this polyline renders.
    pub route_id: RouteId,
    /// Points in drawing order.
    pub points: Vec<LatLng>,
    /// Stroke color.
    pub color: RouteColor,
    /// Condition encoded by the color.
    pub condition: RoadCondition,
}

/// Body of a route persistence request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRoute {
    /// Snapped points to store.
    pub snapped_coordinates: SnappedPath,
    /// Condition selected when the route was persisted.
    pub road_condition: RoadCondition,
    /// Surface selected when the route was persisted.
    pub road_surface: RoadSurface,
    /// Type selected when the route was persisted.
    pub road_type: RoadType,
}

impl NewRoute {
    /// Creates a persistence request.
    pub fn new(snapped_coordinates: SnappedPath, attributes: RoadAttributes) -> Self {
        Self {
            snapped_coordinates,
            road_condition: attributes.condition,
            road_surface: attributes.surface,
            road_type: attributes.road_type,
        }
    }

    /// Returns the attributes carried by this request.
    pub fn attributes(&self) -> RoadAttributes {
        RoadAttributes::new(self.road_type, self.road_surface, self.road_condition)
    }

    /// Turns the request into the route it describes once an id is assigned.
    pub fn into_route(self, id: RouteId) -> Route {
        let attributes = self.attributes();
        Route::new(id, self.snapped_coordinates, attributes)
    }
}
