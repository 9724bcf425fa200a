//! Coordinates and the paths built from them.

use std::fmt;
use std::str::FromStr;

use derive_more::{Deref, From};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Separator between coordinate pairs in an [`EncodedPath`].
pub const PAIR_SEPARATOR: char = '|';

/// Separator between latitude and longitude inside one pair.
pub const COMPONENT_SEPARATOR: char = ',';

/// Number of decimals kept when a coordinate is written to a URL value.
pub const URL_VALUE_PRECISION: usize = 6;

/// Center of the map when a session opens.
pub const INITIAL_CENTER: LatLng = LatLng::new(51.092_266, 3.756_351);

/// Zoom level of the map when a session opens.
pub const INITIAL_ZOOM: u8 = 15;

/// A WGS84 coordinate pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    /// Latitude in degrees, within `[-90, 90]`.
    pub lat: f64,
    /// Longitude in degrees, within `[-180, 180]`.
    pub lng: f64,
}

impl LatLng {
    /// Creates a coordinate without validating it.
    #[inline]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Creates a coordinate, rejecting non-finite or out-of-range values.
    pub fn try_new(lat: f64, lng: f64) -> Result<Self> {
        let coordinate = Self::new(lat, lng);
        coordinate.validate()?;
        Ok(coordinate)
    }

    /// Checks that both components are finite and inside their ranges.
    pub fn validate(&self) -> Result<()> {
        if !self.lat.is_finite() || !(-90.0..=90.0).contains(&self.lat) {
            return Err(Error::invalid_input()
                .with_message(format!("latitude {} is out of range", self.lat)));
        }
        if !self.lng.is_finite() || !(-180.0..=180.0).contains(&self.lng) {
            return Err(Error::invalid_input()
                .with_message(format!("longitude {} is out of range", self.lng)));
        }
        Ok(())
    }

    /// Renders the pair as `lat,lng`, each rounded to six decimals with
    /// trailing zeros removed.
    pub fn to_url_value(&self) -> String {
        format!(
            "{}{COMPONENT_SEPARATOR}{}",
            format_component(self.lat),
            format_component(self.lng)
        )
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_url_value())
    }
}

impl FromStr for LatLng {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let Some((lat, lng)) = s.split_once(COMPONENT_SEPARATOR) else {
            return Err(Error::invalid_input()
                .with_message(format!("coordinate pair '{s}' is missing a comma")));
        };

        let lat: f64 = lat.trim().parse()?;
        let lng: f64 = lng.trim().parse()?;
        Self::try_new(lat, lng)
    }
}

impl From<LatLng> for geo::Coord<f64> {
    fn from(value: LatLng) -> Self {
        geo::coord! { x: value.lng, y: value.lat }
    }
}

impl From<LatLng> for geo::Point<f64> {
    fn from(value: LatLng) -> Self {
        geo::Point::new(value.lng, value.lat)
    }
}

fn format_component(value: f64) -> String {
    let rendered = format!("{value:.URL_VALUE_PRECISION$}");
    let trimmed = rendered.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_owned(),
        other => other.to_owned(),
    }
}

/// Raw points produced by a freehand drawing, in drawing order.
///
/// Ephemeral: created when the user finishes a stroke and consumed by the
/// snap step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[derive(Deref, From)]
#[serde(transparent)]
pub struct DrawnPath(Vec<LatLng>);

impl DrawnPath {
    /// Creates a drawn path from its points.
    pub fn new(points: impl Into<Vec<LatLng>>) -> Self {
        Self(points.into())
    }

    /// Encodes the path into the pipe-delimited form sent to the snap endpoint.
    pub fn encode(&self) -> EncodedPath {
        EncodedPath::from_points(&self.0)
    }

    /// Returns the points of this path.
    pub fn points(&self) -> &[LatLng] {
        &self.0
    }

    /// Consumes the path and returns its points.
    pub fn into_points(self) -> Vec<LatLng> {
        self.0
    }
}

impl FromIterator<LatLng> for DrawnPath {
    fn from_iter<T: IntoIterator<Item = LatLng>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Road-accurate points returned by the snapping service, in order.
///
/// Snapping is not length preserving: the snapped path may hold more or
/// fewer points than the drawn path it came from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[derive(Deref, From)]
#[serde(transparent)]
pub struct SnappedPath(Vec<LatLng>);

impl SnappedPath {
    /// Creates a snapped path from its points.
    pub fn new(points: impl Into<Vec<LatLng>>) -> Self {
        Self(points.into())
    }

    /// Returns the points of this path.
    pub fn points(&self) -> &[LatLng] {
        &self.0
    }

    /// Consumes the path and returns its points.
    pub fn into_points(self) -> Vec<LatLng> {
        self.0
    }

    /// Builds a planar line string (`x = lng`, `y = lat`).
    pub fn to_line_string(&self) -> geo::LineString<f64> {
        self.0.iter().copied().map(geo::Coord::from).collect()
    }
}

impl FromIterator<LatLng> for SnappedPath {
    fn from_iter<T: IntoIterator<Item = LatLng>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Pipe-delimited `lat,lng` pairs, e.g. `51.09,3.75|51.1,3.76`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncodedPath(String);

impl EncodedPath {
    /// Encodes a sequence of points.
    pub fn from_points(points: &[LatLng]) -> Self {
        let encoded = points
            .iter()
            .map(LatLng::to_url_value)
            .collect::<Vec<_>>()
            .join(&PAIR_SEPARATOR.to_string());
        Self(encoded)
    }

    /// Parses and validates an encoded path.
    pub fn parse(value: impl Into<String>) -> Result<Self> {
        let encoded = Self(value.into());
        encoded.decode()?;
        Ok(encoded)
    }

    /// Decodes every pair; fails on the first malformed pair.
    pub fn decode(&self) -> Result<Vec<LatLng>> {
        if self.0.trim().is_empty() {
            return Ok(Vec::new());
        }

        self.0
            .split(PAIR_SEPARATOR)
            .enumerate()
            .map(|(index, pair)| {
                if pair.trim().is_empty() {
                    return Err(Error::invalid_input()
                        .with_message(format!("coordinate pair {index} is empty")));
                }
                pair.parse::<LatLng>()
            })
            .collect()
    }

    /// Returns the encoded string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the path holds no pairs.
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for EncodedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&EncodedPath> for DrawnPath {
    type Error = Error;

    fn try_from(value: &EncodedPath) -> Result<Self> {
        value.decode().map(DrawnPath::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn url_value_trims_trailing_zeros() {
        assert_eq!(LatLng::new(51.09, 3.75).to_url_value(), "51.09,3.75");
        assert_eq!(LatLng::new(51.0, -3.0).to_url_value(), "51,-3");
        assert_eq!(
            LatLng::new(51.092_266_4, 3.756_351_9).to_url_value(),
            "51.092266,3.756352"
        );
    }

    #[test]
    fn url_value_never_renders_negative_zero() {
        assert_eq!(LatLng::new(-0.000_000_1, 0.0).to_url_value(), "0,0");
    }

    #[test]
    fn drawn_path_encodes_with_pipes() {
        let path = DrawnPath::new(vec![LatLng::new(51.09, 3.75), LatLng::new(51.10, 3.76)]);
        assert_eq!(path.encode().as_str(), "51.09,3.75|51.1,3.76");
    }

    #[test]
    fn encoded_path_decodes_with_whitespace() {
        let encoded = EncodedPath::parse(" 51.09 , 3.75 |51.1,3.76").unwrap();
        let points = encoded.decode().unwrap();
        assert_eq!(points, vec![LatLng::new(51.09, 3.75), LatLng::new(51.1, 3.76)]);

        let drawn = DrawnPath::try_from(&encoded).unwrap();
        assert_eq!(drawn.points(), points.as_slice());
        assert_eq!(drawn.encode().as_str(), "51.09,3.75|51.1,3.76");
    }

    #[test]
    fn empty_encoded_path_decodes_to_nothing() {
        let encoded = DrawnPath::default().encode();
        assert!(encoded.is_empty());
        assert!(encoded.decode().unwrap().is_empty());
    }

    #[test]
    fn malformed_pairs_are_rejected() {
        for input in ["51.09", "51.09,abc", "51.09,3.75||51.1,3.76", "91,3", "51,181"] {
            let error = EncodedPath::parse(input).unwrap_err();
            assert_eq!(error.kind, ErrorKind::InvalidInput, "input: {input}");
        }
    }

    #[test]
    fn non_finite_coordinates_are_invalid() {
        assert!(LatLng::try_new(f64::NAN, 0.0).is_err());
        assert!(LatLng::try_new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn line_string_uses_lng_as_x() {
        let path = SnappedPath::new(vec![LatLng::new(51.0, 3.0), LatLng::new(52.0, 4.0)]);
        let line = path.to_line_string();
        let first = line.0[0];
        assert_eq!(first.x, 3.0);
        assert_eq!(first.y, 51.0);
    }

    #[test]
    fn paths_serialize_as_plain_arrays() {
        let path = SnappedPath::new(vec![LatLng::new(51.091, 3.751)]);
        let json = serde_json::to_value(&path).unwrap();
        assert_eq!(json, serde_json::json!([{ "lat": 51.091, "lng": 3.751 }]));
    }
}
