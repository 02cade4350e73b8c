#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Zone creation and listing.
//!
//! [`ZoneRecordService`] is the only path that writes zones. It validates the
//! geometry with [`zone_map_geometry::Geometry::from_value`] before anything
//! else and touches the repository only if every check passes.
//! [`ZoneQueryService`] turns an optional name filter into a
//! [`zone_map_database_models::ZoneQuery`].

mod query;
mod record;

use zone_map_database::DbError;
use zone_map_geometry::GeometryError;

pub use query::ZoneQueryService;
pub use record::{CreateZoneInput, ZoneRecordService, normalize_name, parse_zone_type};

/// A non-geometry zone field that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneField {
    /// `name`
    Name,
    /// `type`
    Type,
}

impl ZoneField {
    /// Field name as it appears on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Type => "type",
        }
    }
}

impl std::fmt::Display for ZoneField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors from zone services.
#[derive(Debug, thiserror::Error)]
pub enum ZoneError {
    /// The geometry failed structural validation.
    #[error("geometry must be a valid GeoJSON Point or Polygon: {0}")]
    InvalidGeometry(#[from] GeometryError),

    /// The name or type failed validation.
    #[error("{field} {reason}")]
    InvalidField {
        /// Which field was rejected.
        field: ZoneField,
        /// What is wrong with it.
        reason: String,
    },

    /// The repository failed. Passed through untouched.
    #[error(transparent)]
    Storage(#[from] DbError),
}

impl ZoneError {
    /// `true` for errors caused by the caller's input.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidGeometry(_) | Self::InvalidField { .. })
    }

    /// The wire name of the offending field, for client errors.
    #[must_use]
    pub const fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidGeometry(_) => Some("geometry"),
            Self::InvalidField { field, .. } => Some(field.as_str()),
            Self::Storage(_) => None,
        }
    }
}
