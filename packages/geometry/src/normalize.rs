//! Coordinate-order conversion, ring closure, and map bounds.
//!
//! None of these functions re-validate their inputs.

use std::borrow::Cow;

use geo::BoundingRect as _;
use serde::{Deserialize, Serialize};

use crate::{DisplayPosition, Geometry, Position};

/// Padding, in degrees, applied on each side of a point when computing its
/// bounds so that a map fitted to it does not zoom in all the way.
pub const POINT_BOUNDS_PADDING: f64 = 0.002;

/// An axis-aligned bounding box in WGS84 coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Western longitude boundary.
    pub west: f64,
    /// Southern latitude boundary.
    pub south: f64,
    /// Eastern longitude boundary.
    pub east: f64,
    /// Northern latitude boundary.
    pub north: f64,
}

impl BoundingBox {
    /// Creates a new bounding box from the given coordinates.
    #[must_use]
    pub const fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }

    /// South-west corner in display order.
    #[must_use]
    pub const fn south_west(&self) -> DisplayPosition {
        DisplayPosition {
            lat: self.south,
            lng: self.west,
        }
    }

    /// North-east corner in display order.
    #[must_use]
    pub const fn north_east(&self) -> DisplayPosition {
        DisplayPosition {
            lat: self.north,
            lng: self.east,
        }
    }
}

/// Converts a storage-order position into display order.
#[must_use]
pub const fn to_display_order(position: Position) -> DisplayPosition {
    DisplayPosition {
        lat: position.lat,
        lng: position.lng,
    }
}

/// Converts a display-order position back into storage order.
#[must_use]
pub const fn to_storage_order(position: DisplayPosition) -> Position {
    Position {
        lng: position.lng,
        lat: position.lat,
    }
}

impl From<Position> for DisplayPosition {
    fn from(position: Position) -> Self {
        to_display_order(position)
    }
}

impl From<DisplayPosition> for Position {
    fn from(position: DisplayPosition) -> Self {
        to_storage_order(position)
    }
}

/// Appends the first position to `ring` if it is not already closed.
///
/// Rings with fewer than three positions are returned unchanged; they are too
/// short to close and will be rejected by validation anyway. A ring that is
/// already closed is returned borrowed.
#[must_use]
pub fn ensure_closed_ring(ring: &[Position]) -> Cow<'_, [Position]> {
    if ring.len() < 3 {
        return Cow::Borrowed(ring);
    }

    match (ring.first(), ring.last()) {
        (Some(first), Some(last)) if first != last => {
            let mut closed = Vec::with_capacity(ring.len() + 1);
            closed.extend_from_slice(ring);
            closed.push(*first);
            Cow::Owned(closed)
        }
        _ => Cow::Borrowed(ring),
    }
}

/// Computes the box a map should fit to show `geometry`.
///
/// Points get a fixed [`POINT_BOUNDS_PADDING`] on every side. Polygons get
/// the minimal box around their exterior ring.
#[must_use]
pub fn compute_bounds(geometry: &Geometry) -> BoundingBox {
    match geometry {
        Geometry::Point(position) => BoundingBox::new(
            position.lng - POINT_BOUNDS_PADDING,
            position.lat - POINT_BOUNDS_PADDING,
            position.lng + POINT_BOUNDS_PADDING,
            position.lat + POINT_BOUNDS_PADDING,
        ),
        Geometry::Polygon(polygon) => {
            let polygon: geo::Polygon<f64> = polygon.into();

            polygon.exterior().bounding_rect().map_or_else(
                || BoundingBox::new(0.0, 0.0, 0.0, 0.0),
                |rect| BoundingBox::new(rect.min().x, rect.min().y, rect.max().x, rect.max().y),
            )
        }
    }
}
