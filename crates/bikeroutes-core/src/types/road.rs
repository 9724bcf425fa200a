//! Road attributes selected by the user while drawing.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// Kind of cycling infrastructure along a route.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, AsRefStr, Display, EnumIter, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RoadType {
    /// Dedicated lane or path separated from motor traffic.
    #[default]
    #[serde(alias = "fietsstrook")]
    #[strum(to_string = "separated", serialize = "fietsstrook")]
    Separated,
    /// Lane shared with other traffic.
    Combined,
    /// No cycling infrastructure.
    None,
}

/// Pavement of a route.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, AsRefStr, Display, EnumIter, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RoadSurface {
    /// Asphalt.
    #[default]
    Asphalt,
    /// Concrete slabs.
    Concrete,
    /// Unpaved.
    Offroad,
}

/// Perceived condition of a route.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(Serialize, Deserialize, AsRefStr, Display, EnumIter, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RoadCondition {
    /// Very good condition.
    #[default]
    #[serde(alias = "very good")]
    #[strum(to_string = "very_good", serialize = "very good")]
    VeryGood,
    /// Good condition.
    Good,
    /// Average condition.
    Average,
    /// Bad condition.
    Bad,
}

impl RoadCondition {
    /// Returns the stroke color used to render routes in this condition.
    #[inline]
    pub const fn color(self) -> RouteColor {
        match self {
            Self::VeryGood => RouteColor::Green,
            Self::Good => RouteColor::Blue,
            Self::Average => RouteColor::Gray,
            Self::Bad => RouteColor::Red,
        }
    }
}

/// Stroke color of a rendered route, one per [`RoadCondition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, AsRefStr, Display, EnumIter, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RouteColor {
    /// Green.
    Green,
    /// Blue.
    Blue,
    /// Gray.
    Gray,
    /// Red.
    Red,
}

impl RouteColor {
    /// Returns the CSS hex value of this color.
    pub const fn hex(self) -> &'static str {
        match self {
            Self::Green => "#22c55e",
            Self::Blue => "#3b82f6",
            Self::Gray => "#6b7280",
            Self::Red => "#ef4444",
        }
    }

    /// Returns the condition rendered with this color.
    ///
    /// Colors map one-to-one onto conditions, so the lookup is total.
    pub const fn condition(self) -> RoadCondition {
        match self {
            Self::Green => RoadCondition::VeryGood,
            Self::Blue => RoadCondition::Good,
            Self::Gray => RoadCondition::Average,
            Self::Red => RoadCondition::Bad,
        }
    }
}

/// Pure mapping from condition to stroke color.
#[inline]
pub const fn color_of(condition: RoadCondition) -> RouteColor {
    condition.color()
}

/// The road attributes currently selected in the pickers.
///
/// Defaults to the first option of every picker.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoadAttributes {
    /// Infrastructure type.
    #[serde(rename = "type")]
    pub road_type: RoadType,
    /// Pavement.
    pub surface: RoadSurface,
    /// Condition.
    pub condition: RoadCondition,
}

impl RoadAttributes {
    /// Creates a new set of attributes.
    pub const fn new(road_type: RoadType, surface: RoadSurface, condition: RoadCondition) -> Self {
        Self {
            road_type,
            surface,
            condition,
        }
    }

    /// Returns a copy with the road type replaced.
    #[must_use]
    pub const fn with_road_type(mut self, road_type: RoadType) -> Self {
        self.road_type = road_type;
        self
    }

    /// Returns a copy with the surface replaced.
    #[must_use]
    pub const fn with_surface(mut self, surface: RoadSurface) -> Self {
        self.surface = surface;
        self
    }

    /// Returns a copy with the condition replaced.
    #[must_use]
    pub const fn with_condition(mut self, condition: RoadCondition) -> Self {
        self.condition = condition;
        self
    }

    /// Returns the stroke color for the current condition.
    pub const fn color(&self) -> RouteColor {
        self.condition.color()
    }
}
