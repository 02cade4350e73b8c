//! Bridging between zone geometry and the `geojson` / `geo` crates.
//!
//! Drawing tools and pasted `GeoJSON` may carry altitude or leave rings
//! open; [`Geometry::from_geojson`] is the lenient entry point that cleans
//! those up before applying the usual validation rules.

use crate::{Geometry, GeometryError, LinearRing, Polygon, Position, ensure_closed_ring};

impl Geometry {
    /// Converts a drawn or pasted `GeoJSON` geometry into a zone geometry.
    ///
    /// Only the first two components of each position are kept. Every
    /// polygon ring is closed with [`ensure_closed_ring`] before validation.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::UnsupportedType`] for anything other than a
    /// `Point` or `Polygon`, or the validation error for malformed
    /// coordinates.
    pub fn from_geojson(geometry: &geojson::Geometry) -> Result<Self, GeometryError> {
        match &geometry.value {
            geojson::Value::Point(position) => planar(position)
                .map(Self::Point)
                .ok_or(GeometryError::InvalidPoint),
            geojson::Value::Polygon(rings) => {
                let rings = rings
                    .iter()
                    .enumerate()
                    .map(|(ring, positions)| {
                        let positions = positions
                            .iter()
                            .enumerate()
                            .map(|(position, coords)| {
                                planar(coords)
                                    .ok_or(GeometryError::InvalidPosition { ring, position })
                            })
                            .collect::<Result<Vec<_>, _>>()?;

                        LinearRing::at_index(ensure_closed_ring(&positions).into_owned(), ring)
                    })
                    .collect::<Result<Vec<_>, _>>()?;

                Polygon::new(rings).map(Self::Polygon)
            }
            other => Err(GeometryError::UnsupportedType(
                geojson_type_name(other).to_string(),
            )),
        }
    }
}

fn planar(coords: &[f64]) -> Option<Position> {
    match coords {
        [lng, lat, ..] => Position::new(*lng, *lat).ok(),
        _ => None,
    }
}

const fn geojson_type_name(value: &geojson::Value) -> &'static str {
    match value {
        geojson::Value::Point(_) => "Point",
        geojson::Value::MultiPoint(_) => "MultiPoint",
        geojson::Value::LineString(_) => "LineString",
        geojson::Value::MultiLineString(_) => "MultiLineString",
        geojson::Value::Polygon(_) => "Polygon",
        geojson::Value::MultiPolygon(_) => "MultiPolygon",
        geojson::Value::GeometryCollection(_) => "GeometryCollection",
    }
}

fn ring_coords(ring: &LinearRing) -> Vec<Vec<f64>> {
    ring.positions()
        .iter()
        .map(|position| vec![position.lng, position.lat])
        .collect()
}

impl From<&Geometry> for geojson::Geometry {
    fn from(geometry: &Geometry) -> Self {
        let value = match geometry {
            Geometry::Point(position) => geojson::Value::Point(vec![position.lng, position.lat]),
            Geometry::Polygon(polygon) => {
                geojson::Value::Polygon(polygon.rings().iter().map(ring_coords).collect())
            }
        };
        Self::new(value)
    }
}

fn line_string(ring: &LinearRing) -> geo::LineString<f64> {
    ring.positions()
        .iter()
        .map(|position| geo::Coord {
            x: position.lng,
            y: position.lat,
        })
        .collect()
}

impl From<&Polygon> for geo::Polygon<f64> {
    fn from(polygon: &Polygon) -> Self {
        Self::new(
            line_string(polygon.exterior()),
            polygon.interiors().iter().map(line_string).collect(),
        )
    }
}

impl From<&Geometry> for geo::Geometry<f64> {
    fn from(geometry: &Geometry) -> Self {
        match geometry {
            Geometry::Point(position) => Self::Point(geo::Point::new(position.lng, position.lat)),
            Geometry::Polygon(polygon) => Self::Polygon(polygon.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Contains as _;
    use serde_json::json;

    #[test]
    fn drops_altitude_and_closes_drawn_rings() {
        let drawn = geojson::Geometry::new(geojson::Value::Polygon(vec![vec![
            vec![-46.64, -23.55, 760.0],
            vec![-46.63, -23.55, 761.0],
            vec![-46.63, -23.54, 759.5],
            vec![-46.64, -23.54, 760.0],
        ]]));

        let geometry = Geometry::from_geojson(&drawn).unwrap();
        assert_eq!(
            serde_json::to_value(&geometry).unwrap(),
            json!({
                "type": "Polygon",
                "coordinates": [[
                    [-46.64, -23.55],
                    [-46.63, -23.55],
                    [-46.63, -23.54],
                    [-46.64, -23.54],
                    [-46.64, -23.55]
                ]]
            })
        );
    }

    #[test]
    fn drawn_point_keeps_first_two_components() {
        let drawn = geojson::Geometry::new(geojson::Value::Point(vec![1.0, 2.0, 3.0]));
        let geometry = Geometry::from_geojson(&drawn).unwrap();
        assert_eq!(geometry, Geometry::Point(Position::new(1.0, 2.0).unwrap()));

        let short = geojson::Geometry::new(geojson::Value::Point(vec![1.0]));
        assert_eq!(
            Geometry::from_geojson(&short),
            Err(GeometryError::InvalidPoint)
        );
    }

    #[test]
    fn drawn_rings_still_need_three_vertices() {
        let drawn = geojson::Geometry::new(geojson::Value::Polygon(vec![vec![
            vec![0.0, 0.0],
            vec![1.0, 1.0],
        ]]));
        assert_eq!(
            Geometry::from_geojson(&drawn),
            Err(GeometryError::RingTooShort { ring: 0, len: 2 })
        );
    }

    #[test]
    fn rejects_unsupported_geojson_kinds() {
        let line = geojson::Geometry::new(geojson::Value::LineString(vec![
            vec![0.0, 0.0],
            vec![1.0, 1.0],
        ]));
        assert_eq!(
            Geometry::from_geojson(&line),
            Err(GeometryError::UnsupportedType("LineString".to_string()))
        );
    }

    #[test]
    fn geojson_output_matches_wire_shape() {
        let input = json!({
            "type": "Polygon",
            "coordinates": [[[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0], [0.0, 0.0]]]
        });
        let geometry = Geometry::from_value(&input).unwrap();
        let out = geojson::Geometry::from(&geometry);
        assert_eq!(serde_json::to_value(&out).unwrap(), input);
        assert_eq!(Geometry::from_geojson(&out).unwrap(), geometry);
    }

    #[test]
    fn converts_to_geo_polygon() {
        let geometry = Geometry::from_value(&json!({
            "type": "Polygon",
            "coordinates": [
                [[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0], [0.0, 0.0]],
                [[1.0, 1.0], [2.0, 1.0], [2.0, 2.0], [1.0, 2.0], [1.0, 1.0]]
            ]
        }))
        .unwrap();

        let geo::Geometry::Polygon(polygon) = geo::Geometry::from(&geometry) else {
            panic!("expected a polygon");
        };
        assert_eq!(polygon.interiors().len(), 1);
        assert!(polygon.contains(&geo::Point::new(3.0, 3.0)));
        assert!(!polygon.contains(&geo::Point::new(1.5, 1.5)));
    }
}
