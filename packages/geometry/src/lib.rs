#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Zone geometry types, validation, and coordinate normalization.
//!
//! Zones are located by a `GeoJSON` `Point` or `Polygon`. Every boundary that
//! accepts geometry (HTTP bodies, stored rows, pasted text, drawn shapes)
//! decodes it through [`Geometry::from_value`], so there is exactly one
//! definition of "well-formed" in the system.
//!
//! Coordinates are stored longitude-first ([`Position`]). Map surfaces that
//! want latitude-first get a [`DisplayPosition`] through
//! [`to_display_order`]; the two orders are distinct types and never swapped
//! implicitly.

pub mod convert;
pub mod normalize;
pub mod text;
pub mod validate;

use serde::ser::SerializeStruct as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub use normalize::{
    BoundingBox, POINT_BOUNDS_PADDING, compute_bounds, ensure_closed_ring, to_display_order,
    to_storage_order,
};
pub use text::{GeometryTextError, parse_geometry_text, to_pretty_json};
pub use validate::{GeometryError, is_valid_geometry};

/// Minimum number of positions in a closed linear ring (a triangle plus the
/// repeated first vertex).
pub const MIN_RING_POSITIONS: usize = 4;

/// A `[longitude, latitude]` pair in storage (`GeoJSON`) order.
///
/// Both components are guaranteed finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    lng: f64,
    lat: f64,
}

impl Position {
    /// Creates a position from a longitude and a latitude.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NonFinite`] if either component is `NaN` or
    /// infinite.
    pub fn new(lng: f64, lat: f64) -> Result<Self, GeometryError> {
        if lng.is_finite() && lat.is_finite() {
            Ok(Self { lng, lat })
        } else {
            Err(GeometryError::NonFinite)
        }
    }

    /// Longitude (x).
    #[must_use]
    pub const fn lng(self) -> f64 {
        self.lng
    }

    /// Latitude (y).
    #[must_use]
    pub const fn lat(self) -> f64 {
        self.lat
    }
}

impl Serialize for Position {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.lng, self.lat].serialize(serializer)
    }
}

/// A `[latitude, longitude]` pair in display order, as expected by
/// latitude-first map widgets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayPosition {
    lat: f64,
    lng: f64,
}

impl DisplayPosition {
    /// Creates a display position from a latitude and a longitude.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NonFinite`] if either component is `NaN` or
    /// infinite.
    pub fn new(lat: f64, lng: f64) -> Result<Self, GeometryError> {
        if lat.is_finite() && lng.is_finite() {
            Ok(Self { lat, lng })
        } else {
            Err(GeometryError::NonFinite)
        }
    }

    /// Latitude (first component).
    #[must_use]
    pub const fn lat(self) -> f64 {
        self.lat
    }

    /// Longitude (second component).
    #[must_use]
    pub const fn lng(self) -> f64 {
        self.lng
    }
}

impl Serialize for DisplayPosition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.lat, self.lng].serialize(serializer)
    }
}

/// A closed sequence of at least [`MIN_RING_POSITIONS`] positions whose first
/// and last positions are equal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LinearRing(Vec<Position>);

impl LinearRing {
    /// Validates `positions` as a closed linear ring.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::RingTooShort`] or
    /// [`GeometryError::RingNotClosed`].
    pub fn new(positions: Vec<Position>) -> Result<Self, GeometryError> {
        Self::at_index(positions, 0)
    }

    /// Closes `positions` with [`ensure_closed_ring`] and then validates the
    /// result. Intended for user-drawn rings that omit the closing vertex.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::RingTooShort`] if the closed ring still has
    /// fewer than [`MIN_RING_POSITIONS`] positions.
    pub fn close(positions: &[Position]) -> Result<Self, GeometryError> {
        Self::new(ensure_closed_ring(positions).into_owned())
    }

    /// Same as [`Self::new`], reporting errors against ring number `ring`.
    pub(crate) fn at_index(positions: Vec<Position>, ring: usize) -> Result<Self, GeometryError> {
        if positions.len() < MIN_RING_POSITIONS {
            return Err(GeometryError::RingTooShort {
                ring,
                len: positions.len(),
            });
        }
        if positions.first() != positions.last() {
            return Err(GeometryError::RingNotClosed { ring });
        }
        Ok(Self(positions))
    }

    /// The ring's positions, closing vertex included.
    #[must_use]
    pub fn positions(&self) -> &[Position] {
        &self.0
    }
}

/// A polygon made of an exterior ring followed by zero or more holes.
///
/// Only the exterior ring is interpreted (bounds, map fitting); holes are
/// carried through unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    rings: Vec<LinearRing>,
}

impl Polygon {
    /// Creates a polygon from its rings, exterior first.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::EmptyPolygon`] if `rings` is empty.
    pub fn new(rings: Vec<LinearRing>) -> Result<Self, GeometryError> {
        if rings.is_empty() {
            return Err(GeometryError::EmptyPolygon);
        }
        Ok(Self { rings })
    }

    /// The exterior boundary.
    #[must_use]
    pub fn exterior(&self) -> &LinearRing {
        &self.rings[0]
    }

    /// Interior rings (holes).
    #[must_use]
    pub fn interiors(&self) -> &[LinearRing] {
        &self.rings[1..]
    }

    /// All rings, exterior first.
    #[must_use]
    pub fn rings(&self) -> &[LinearRing] {
        &self.rings
    }
}

/// Discriminant of a [`Geometry`], as written in the `GeoJSON` `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    /// `"Point"`
    Point,
    /// `"Polygon"`
    Polygon,
}

impl GeometryKind {
    /// The `GeoJSON` type name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Point => "Point",
            Self::Polygon => "Polygon",
        }
    }
}

impl std::fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A zone's location: a single point or a polygon.
///
/// Serializes to `{"type": "Point" | "Polygon", "coordinates": ...}`.
/// Deserialization goes through [`Geometry::from_value`], so a value of this
/// type is always well-formed.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// A single position.
    Point(Position),
    /// An exterior ring plus optional holes.
    Polygon(Polygon),
}

impl Geometry {
    /// The `GeoJSON` discriminant of this geometry.
    #[must_use]
    pub const fn kind(&self) -> GeometryKind {
        match self {
            Self::Point(_) => GeometryKind::Point,
            Self::Polygon(_) => GeometryKind::Polygon,
        }
    }
}

impl Serialize for Geometry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Geometry", 2)?;
        state.serialize_field("type", self.kind().as_str())?;
        match self {
            Self::Point(position) => state.serialize_field("coordinates", position)?,
            Self::Polygon(polygon) => state.serialize_field("coordinates", polygon.rings())?,
        }
        state.end()
    }
}

impl<'de> Deserialize<'de> for Geometry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Self::from_value(&value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn integer_coordinates_serialize_as_floats() {
        let input = json!({ "type": "Point", "coordinates": [10, -5] });
        let geometry = Geometry::from_value(&input).unwrap();

        let output = serde_json::to_value(&geometry).unwrap();

        assert_eq!(output["coordinates"], json!([10.0, -5.0]));
        assert_ne!(output, input);
        assert_eq!(Geometry::from_value(&output).unwrap(), geometry);
    }
}
