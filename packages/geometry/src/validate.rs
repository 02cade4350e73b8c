//! Structural validation of untyped geometry payloads.
//!
//! [`Geometry::from_value`] is the single decoding step from arbitrary JSON
//! into a [`Geometry`]. Nothing downstream re-probes raw JSON.

use serde_json::Value;

use crate::{Geometry, LinearRing, Polygon, Position};

/// Reasons a candidate geometry is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    /// The value is not a JSON object.
    #[error("geometry must be a JSON object")]
    NotAnObject,

    /// A required field is absent.
    #[error("geometry is missing the `{0}` field")]
    MissingField(&'static str),

    /// The `type` discriminant is neither `"Point"` nor `"Polygon"`.
    #[error("unsupported geometry type {0}: expected \"Point\" or \"Polygon\"")]
    UnsupportedType(String),

    /// Point coordinates are not a pair of finite numbers.
    #[error("Point coordinates must be a [longitude, latitude] pair of finite numbers")]
    InvalidPoint,

    /// Polygon coordinates are not an array.
    #[error("Polygon coordinates must be an array of linear rings")]
    InvalidPolygon,

    /// Polygon coordinates hold no rings.
    #[error("Polygon must contain at least one linear ring")]
    EmptyPolygon,

    /// A ring entry is not an array.
    #[error("ring {ring} must be an array of positions")]
    NotARing {
        /// Zero-based ring index.
        ring: usize,
    },

    /// A ring entry is not a pair of finite numbers.
    #[error("ring {ring} position {position} must be a [longitude, latitude] pair of finite numbers")]
    InvalidPosition {
        /// Zero-based ring index.
        ring: usize,
        /// Zero-based position index within the ring.
        position: usize,
    },

    /// A ring has fewer than four positions.
    #[error("ring {ring} has {len} positions but a linear ring needs at least 4")]
    RingTooShort {
        /// Zero-based ring index.
        ring: usize,
        /// Number of positions found.
        len: usize,
    },

    /// A ring's first and last positions differ.
    #[error("ring {ring} is not closed: first and last positions differ")]
    RingNotClosed {
        /// Zero-based ring index.
        ring: usize,
    },

    /// A coordinate component is `NaN` or infinite.
    #[error("coordinates must be finite numbers")]
    NonFinite,
}

/// Returns `true` if `value` decodes into a well-formed [`Geometry`].
///
/// Total over every JSON value; never panics.
#[must_use]
pub fn is_valid_geometry(value: &Value) -> bool {
    Geometry::from_value(value).is_ok()
}

impl Geometry {
    /// Decodes an untyped JSON value into a [`Geometry`].
    ///
    /// Rules:
    /// * the value is an object with `type` and `coordinates`
    /// * a `Point` holds exactly two finite numbers
    /// * a `Polygon` holds at least one ring; every ring holds valid
    ///   positions, has at least four of them, and is closed
    ///
    /// # Errors
    ///
    /// Returns the first [`GeometryError`] encountered.
    pub fn from_value(value: &Value) -> Result<Self, GeometryError> {
        let Value::Object(object) = value else {
            return Err(GeometryError::NotAnObject);
        };

        let kind = object
            .get("type")
            .ok_or(GeometryError::MissingField("type"))?;
        let coordinates = object
            .get("coordinates")
            .ok_or(GeometryError::MissingField("coordinates"))?;

        match kind.as_str() {
            Some("Point") => decode_position(coordinates)
                .map(Self::Point)
                .ok_or(GeometryError::InvalidPoint),
            Some("Polygon") => decode_polygon(coordinates).map(Self::Polygon),
            Some(other) => Err(GeometryError::UnsupportedType(format!("{other:?}"))),
            None => Err(GeometryError::UnsupportedType(kind.to_string())),
        }
    }
}

fn decode_position(value: &Value) -> Option<Position> {
    match value.as_array()?.as_slice() {
        [lng, lat] => Position::new(lng.as_f64()?, lat.as_f64()?).ok(),
        _ => None,
    }
}

fn decode_polygon(value: &Value) -> Result<Polygon, GeometryError> {
    let rings = value.as_array().ok_or(GeometryError::InvalidPolygon)?;

    let rings = rings
        .iter()
        .enumerate()
        .map(|(ring, positions)| decode_ring(ring, positions))
        .collect::<Result<Vec<_>, _>>()?;

    Polygon::new(rings)
}

fn decode_ring(ring: usize, value: &Value) -> Result<LinearRing, GeometryError> {
    let positions = value
        .as_array()
        .ok_or(GeometryError::NotARing { ring })?
        .iter()
        .enumerate()
        .map(|(position, entry)| {
            decode_position(entry).ok_or(GeometryError::InvalidPosition { ring, position })
        })
        .collect::<Result<Vec<_>, _>>()?;

    LinearRing::at_index(positions, ring)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn closed_square() -> Value {
        json!([
            [-46.64, -23.55],
            [-46.63, -23.55],
            [-46.63, -23.54],
            [-46.64, -23.54],
            [-46.64, -23.55]
        ])
    }

    #[test]
    fn accepts_finite_points() {
        for (lng, lat) in [
            (0.0, 0.0),
            (-46.6333, -23.5505),
            (180.0, 90.0),
            (-180.0, -90.0),
            (1e300, -1e-300),
        ] {
            let value = json!({ "type": "Point", "coordinates": [lng, lat] });
            assert!(is_valid_geometry(&value), "({lng}, {lat}) rejected");
        }
    }

    #[test]
    fn accepts_integer_coordinates() {
        let value = json!({ "type": "Point", "coordinates": [10, -5] });
        let geometry = Geometry::from_value(&value).unwrap();
        assert_eq!(geometry, Geometry::Point(Position::new(10.0, -5.0).unwrap()));
    }

    #[test]
    fn rejects_non_finite_components() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert_eq!(Position::new(bad, 0.0), Err(GeometryError::NonFinite));
            assert_eq!(Position::new(0.0, bad), Err(GeometryError::NonFinite));

            // serde_json cannot represent non-finite floats and turns them into null.
            let value = json!({ "type": "Point", "coordinates": [bad, 1.0] });
            assert!(!is_valid_geometry(&value));
        }
    }

    #[test]
    fn rejects_malformed_point_coordinates() {
        for coordinates in [
            json!([1.0]),
            json!([]),
            json!([1.0, "2"]),
            json!(["1", 2.0]),
            json!([1.0, null]),
            json!([1.0, 2.0, 3.0]),
            json!({ "lng": 1.0, "lat": 2.0 }),
            json!("1,2"),
        ] {
            let value = json!({ "type": "Point", "coordinates": coordinates });
            assert_eq!(
                Geometry::from_value(&value),
                Err(GeometryError::InvalidPoint),
                "accepted {coordinates}"
            );
        }
    }

    #[test]
    fn rejects_non_objects() {
        for value in [
            Value::Null,
            json!(true),
            json!(42),
            json!("Point"),
            json!([[0.0, 0.0]]),
        ] {
            assert_eq!(
                Geometry::from_value(&value),
                Err(GeometryError::NotAnObject)
            );
        }
    }

    #[test]
    fn rejects_missing_fields() {
        assert_eq!(
            Geometry::from_value(&json!({ "coordinates": [0.0, 0.0] })),
            Err(GeometryError::MissingField("type"))
        );
        assert_eq!(
            Geometry::from_value(&json!({ "type": "Point" })),
            Err(GeometryError::MissingField("coordinates"))
        );
    }

    #[test]
    fn rejects_other_geojson_types() {
        for kind in ["LineString", "MultiPolygon", "point", "polygon", ""] {
            let value = json!({ "type": kind, "coordinates": [0.0, 0.0] });
            assert!(matches!(
                Geometry::from_value(&value),
                Err(GeometryError::UnsupportedType(_))
            ));
        }
        let value = json!({ "type": 7, "coordinates": [0.0, 0.0] });
        assert!(!is_valid_geometry(&value));
    }

    #[test]
    fn accepts_closed_polygon() {
        let value = json!({ "type": "Polygon", "coordinates": [closed_square()] });
        let Geometry::Polygon(polygon) = Geometry::from_value(&value).unwrap() else {
            panic!("expected a polygon");
        };
        assert_eq!(polygon.exterior().positions().len(), 5);
        assert!(polygon.interiors().is_empty());
    }

    #[test]
    fn rejects_unclosed_ring_until_closed() {
        let open = json!([
            [-46.64, -23.55],
            [-46.63, -23.55],
            [-46.63, -23.54],
            [-46.64, -23.54]
        ]);
        let value = json!({ "type": "Polygon", "coordinates": [open] });
        assert_eq!(
            Geometry::from_value(&value),
            Err(GeometryError::RingNotClosed { ring: 0 })
        );

        let value = json!({ "type": "Polygon", "coordinates": [closed_square()] });
        assert!(is_valid_geometry(&value));
    }

    #[test]
    fn rejects_closed_triangle_with_three_positions() {
        let ring = json!([[0.0, 0.0], [1.0, 0.0], [0.0, 0.0]]);
        let value = json!({ "type": "Polygon", "coordinates": [ring] });
        assert_eq!(
            Geometry::from_value(&value),
            Err(GeometryError::RingTooShort { ring: 0, len: 3 })
        );

        let ring = json!([[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]);
        let value = json!({ "type": "Polygon", "coordinates": [ring] });
        assert!(!is_valid_geometry(&value));
    }

    #[test]
    fn rejects_empty_polygon() {
        let value = json!({ "type": "Polygon", "coordinates": [] });
        assert_eq!(
            Geometry::from_value(&value),
            Err(GeometryError::EmptyPolygon)
        );
    }

    #[test]
    fn reports_the_offending_ring_and_position() {
        let hole = json!([[0.1, 0.1], [0.2, 0.1], "oops", [0.1, 0.1]]);
        let value = json!({ "type": "Polygon", "coordinates": [closed_square(), hole] });
        assert_eq!(
            Geometry::from_value(&value),
            Err(GeometryError::InvalidPosition {
                ring: 1,
                position: 2
            })
        );

        let value = json!({ "type": "Polygon", "coordinates": [closed_square(), 5] });
        assert_eq!(
            Geometry::from_value(&value),
            Err(GeometryError::NotARing { ring: 1 })
        );

        let value = json!({ "type": "Polygon", "coordinates": { "rings": [] } });
        assert_eq!(
            Geometry::from_value(&value),
            Err(GeometryError::InvalidPolygon)
        );
    }

    #[test]
    fn accepts_well_formed_holes() {
        let hole = json!([
            [-46.638, -23.548],
            [-46.632, -23.548],
            [-46.632, -23.542],
            [-46.638, -23.548]
        ]);
        let value = json!({ "type": "Polygon", "coordinates": [closed_square(), hole] });
        let Geometry::Polygon(polygon) = Geometry::from_value(&value).unwrap() else {
            panic!("expected a polygon");
        };
        assert_eq!(polygon.rings().len(), 2);
        assert_eq!(polygon.interiors().len(), 1);
    }

    #[test]
    fn ignores_foreign_members() {
        let value = json!({
            "type": "Point",
            "coordinates": [1.5, 2.5],
            "bbox": [1.5, 2.5, 1.5, 2.5],
            "properties": { "name": "ignored" }
        });
        assert!(is_valid_geometry(&value));
    }

    #[test]
    fn deserialize_uses_the_same_rules() {
        let point: Geometry =
            serde_json::from_value(json!({ "type": "Point", "coordinates": [1.0, 2.0] }))
                .unwrap();
        assert_eq!(point.kind(), crate::GeometryKind::Point);

        let err = serde_json::from_value::<Geometry>(json!({
            "type": "Polygon",
            "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]]
        }))
        .unwrap_err();
        assert!(err.to_string().contains("not closed"), "{err}");
    }

    #[test]
    fn serializes_to_wire_shape() {
        let input = json!({ "type": "Polygon", "coordinates": [closed_square()] });
        let geometry = Geometry::from_value(&input).unwrap();
        assert_eq!(serde_json::to_value(&geometry).unwrap(), input);

        let input = json!({ "type": "Point", "coordinates": [-46.6333, -23.5505] });
        let geometry = Geometry::from_value(&input).unwrap();
        assert_eq!(serde_json::to_value(&geometry).unwrap(), input);
    }
}
