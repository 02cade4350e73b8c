#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the zone map server.
//!
//! These types are serialized to JSON for the REST API. They are separate
//! from the stored [`Zone`] to allow independent evolution of the API
//! contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zone_map_geometry::Geometry;
use zone_map_zone_models::{Zone, ZoneType};

/// A zone as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiZone {
    /// Unique zone ID (UUID).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Land-use classification.
    #[serde(rename = "type")]
    pub zone_type: ZoneType,
    /// `GeoJSON` geometry, longitude first.
    pub geometry: Geometry,
    /// When the zone was created (ISO 8601).
    pub created_at: DateTime<Utc>,
}

impl From<Zone> for ApiZone {
    fn from(zone: Zone) -> Self {
        Self {
            id: zone.id,
            name: zone.name,
            zone_type: zone.zone_type,
            geometry: zone.geometry,
            created_at: zone.created_at,
        }
    }
}

/// Body of `POST /api/zones`.
///
/// Missing fields default to empty values so that they are reported by
/// field-level validation rather than as a malformed body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiCreateZone {
    /// Zone name.
    #[serde(default)]
    pub name: String,
    /// Zone type literal.
    #[serde(default, rename = "type")]
    pub zone_type: String,
    /// Candidate `GeoJSON` geometry.
    #[serde(default)]
    pub geometry: serde_json::Value,
}

/// Query parameters for `GET /api/zones`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ZoneListParams {
    /// Case-insensitive name substring.
    pub name: Option<String>,
}

/// Error body for failed requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Human-readable message.
    pub error: String,
    /// Offending field for validation errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ApiError {
    /// An error not tied to a field.
    #[must_use]
    pub fn message(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            field: None,
        }
    }

    /// A validation error for `field`.
    #[must_use]
    pub fn for_field(error: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            field: Some(field.into()),
        }
    }
}

/// Liveness response.
#[derive(Debug, Serialize)]
pub struct ApiHealth {
    /// Always `"ok"`.
    pub status: &'static str,
    /// Service version.
    pub version: String,
}

/// Readiness response.
#[derive(Debug, Serialize)]
pub struct ApiReady {
    /// `"ok"` or `"unavailable"`.
    pub status: &'static str,
    /// Database status: `"ok"` or `"error"`.
    pub db: &'static str,
}
