//! Geometry as user-editable JSON text.

use crate::{Geometry, GeometryError};

/// Errors from [`parse_geometry_text`].
#[derive(Debug, thiserror::Error)]
pub enum GeometryTextError {
    /// The text is not JSON at all.
    #[error("geometry text is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON does not describe a valid geometry.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Parses pasted JSON text into a [`Geometry`].
///
/// Blank input yields `Ok(None)`, meaning nothing has been entered yet.
///
/// # Errors
///
/// Returns [`GeometryTextError::Json`] for malformed JSON and
/// [`GeometryTextError::Geometry`] if the JSON fails validation.
pub fn parse_geometry_text(input: &str) -> Result<Option<Geometry>, GeometryTextError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let value: serde_json::Value = serde_json::from_str(trimmed)?;
    Ok(Some(Geometry::from_value(&value)?))
}

/// Pretty-prints a geometry for a text area; `None` becomes an empty string.
#[must_use]
pub fn to_pretty_json(geometry: Option<&Geometry>) -> String {
    geometry
        .and_then(|g| serde_json::to_string_pretty(g).ok())
        .unwrap_or_default()
}
