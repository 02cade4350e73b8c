#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Zone insert records and query parameter definitions.
//!
//! These types describe what is handed to a zone repository. They are
//! distinct from the API request types in `zone_map_server_models`, which
//! are still untyped at the geometry level.

use serde::Serialize;
use zone_map_geometry::Geometry;
use zone_map_zone_models::ZoneType;

/// A zone ready to be inserted. The repository assigns `id` and
/// `created_at`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewZone {
    /// Trimmed display name.
    pub name: String,
    /// Land-use classification.
    pub zone_type: ZoneType,
    /// Validated geometry, stored as given.
    pub geometry: Geometry,
}

/// Result ordering for zone listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum ZoneOrder {
    /// Most recently created first; ties broken consistently by the
    /// repository.
    #[default]
    NewestFirst,
}

/// Parameters for listing zones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ZoneQuery {
    /// Case-insensitive substring the zone name must contain
    /// (`None` = don't filter).
    pub name_contains: Option<String>,
    /// Result ordering.
    pub order: ZoneOrder,
}

impl ZoneQuery {
    /// Every zone, newest first.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Zones whose name contains `filter`, newest first.
    #[must_use]
    pub fn name_contains(filter: impl Into<String>) -> Self {
        Self {
            name_contains: Some(filter.into()),
            order: ZoneOrder::NewestFirst,
        }
    }
}
