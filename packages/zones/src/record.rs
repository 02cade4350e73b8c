//! Zone creation.

use std::str::FromStr as _;
use std::sync::Arc;

use serde_json::Value;
use zone_map_database::ZoneRepository;
use zone_map_database_models::NewZone;
use zone_map_geometry::Geometry;
use zone_map_zone_models::{ZONE_NAME_MAX_CHARS, Zone, ZoneType};

use crate::{ZoneError, ZoneField};

/// Raw zone creation payload.
///
/// Fields are left untyped so each one can be rejected with its own error
/// instead of a generic deserialization failure.
#[derive(Debug, Clone)]
pub struct CreateZoneInput {
    /// Display name; trimmed before storage.
    pub name: String,
    /// Zone type literal, e.g. `"RESIDENCIAL"`.
    pub zone_type: String,
    /// Candidate geometry of unknown shape.
    pub geometry: Value,
}

/// Trims `name` and checks it is non-empty and at most
/// [`ZONE_NAME_MAX_CHARS`] characters. Internal whitespace is kept.
///
/// # Errors
///
/// Returns [`ZoneError::InvalidField`] for [`ZoneField::Name`].
pub fn normalize_name(name: &str) -> Result<String, ZoneError> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(ZoneError::InvalidField {
            field: ZoneField::Name,
            reason: "should not be empty".to_string(),
        });
    }

    let len = trimmed.chars().count();
    if len > ZONE_NAME_MAX_CHARS {
        return Err(ZoneError::InvalidField {
            field: ZoneField::Name,
            reason: format!("must be at most {ZONE_NAME_MAX_CHARS} characters (got {len})"),
        });
    }

    Ok(trimmed.to_string())
}

/// Parses a zone type literal.
///
/// # Errors
///
/// Returns [`ZoneError::InvalidField`] for [`ZoneField::Type`] if `literal`
/// is not one of the [`ZoneType`] values.
pub fn parse_zone_type(literal: &str) -> Result<ZoneType, ZoneError> {
    ZoneType::from_str(literal).map_err(|_| {
        let expected: Vec<&str> = ZoneType::all().iter().map(AsRef::as_ref).collect();
        ZoneError::InvalidField {
            field: ZoneField::Type,
            reason: format!("must be one of {}", expected.join(", ")),
        }
    })
}

/// Validates and persists new zones.
#[derive(Clone)]
pub struct ZoneRecordService {
    repo: Arc<dyn ZoneRepository>,
}

impl ZoneRecordService {
    /// Creates a service writing to `repo`.
    #[must_use]
    pub fn new(repo: Arc<dyn ZoneRepository>) -> Self {
        Self { repo }
    }

    /// Validates `input` and stores it as a new zone.
    ///
    /// The geometry is checked first and stored exactly as given (no
    /// reordering or ring closing). Nothing is written unless every check
    /// passes; on success exactly one insert is made.
    ///
    /// # Errors
    ///
    /// * [`ZoneError::InvalidGeometry`] if the geometry is malformed
    /// * [`ZoneError::InvalidField`] if the name or type is rejected
    /// * [`ZoneError::Storage`] if the repository fails
    pub async fn create(&self, input: CreateZoneInput) -> Result<Zone, ZoneError> {
        let geometry = Geometry::from_value(&input.geometry).map_err(|e| {
            log::debug!("Rejected zone geometry: {e}");
            ZoneError::InvalidGeometry(e)
        })?;
        let name = normalize_name(&input.name)?;
        let zone_type = parse_zone_type(&input.zone_type)?;

        let zone = self
            .repo
            .create(NewZone {
                name,
                zone_type,
                geometry,
            })
            .await?;

        log::info!("Created {} zone {} ({})", zone.zone_type, zone.id, zone.name);

        Ok(zone)
    }
}
