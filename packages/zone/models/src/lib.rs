#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Zone entity and zone type taxonomy.
//!
//! A zone is a named region classified by [`ZoneType`] and located by a
//! [`Geometry`]. Zones are created once and never updated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use zone_map_geometry::Geometry;

/// Maximum zone name length, in characters, after trimming.
pub const ZONE_NAME_MAX_CHARS: usize = 120;

/// Land-use classification of a zone.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ZoneType {
    /// Housing
    Residencial,
    /// Shops and offices
    Comercial,
    /// Manufacturing and logistics
    Industrial,
    /// Mixed use
    Misto,
    /// Special-purpose areas
    Especial,
}

impl ZoneType {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Residencial,
            Self::Comercial,
            Self::Industrial,
            Self::Misto,
            Self::Especial,
        ]
    }
}

/// A persisted zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    /// Storage-assigned unique identifier (UUID).
    pub id: String,
    /// Display name, trimmed.
    pub name: String,
    /// Land-use classification.
    #[serde(rename = "type")]
    pub zone_type: ZoneType,
    /// Location as stored, longitude first.
    pub geometry: Geometry,
    /// When the zone was inserted.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr as _;

    #[test]
    fn zone_type_literals_round_trip() {
        for zone_type in ZoneType::all() {
            let literal = zone_type.to_string();
            assert_eq!(literal, zone_type.as_ref());
            assert_eq!(ZoneType::from_str(&literal).unwrap(), *zone_type);
            assert_eq!(
                serde_json::to_value(zone_type).unwrap(),
                serde_json::Value::String(literal)
            );
        }
    }

    #[test]
    fn zone_type_parsing_is_exact() {
        assert_eq!(ZoneType::from_str("MISTO").unwrap(), ZoneType::Misto);
        assert!(ZoneType::from_str("misto").is_err());
        assert!(ZoneType::from_str("RURAL").is_err());
        assert!(ZoneType::from_str("").is_err());
    }

    #[test]
    fn zone_wire_shape() {
        let json = serde_json::json!({
            "id": "11111111-1111-1111-1111-111111111111",
            "name": "Zona Residencial Norte",
            "type": "RESIDENCIAL",
            "geometry": { "type": "Point", "coordinates": [-46.6333, -23.5505] },
            "createdAt": "2025-12-13T05:02:51.455Z"
        });

        let zone: Zone = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(zone.zone_type, ZoneType::Residencial);

        let out = serde_json::to_value(&zone).unwrap();
        assert_eq!(out["type"], json["type"]);
        assert_eq!(out["geometry"], json["geometry"]);
        assert_eq!(out["id"], json["id"]);
        assert!(out["createdAt"].as_str().unwrap().starts_with("2025-12-13T05:02:51.455"));
    }

    #[test]
    fn zone_with_invalid_geometry_does_not_deserialize() {
        let json = serde_json::json!({
            "id": "x",
            "name": "Broken",
            "type": "MISTO",
            "geometry": { "type": "Point", "coordinates": [1.0] },
            "createdAt": "2025-12-13T05:02:51.455Z"
        });
        assert!(serde_json::from_value::<Zone>(json).is_err());
    }
}
