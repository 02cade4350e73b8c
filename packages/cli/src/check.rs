//! `check` subcommand: validate geometry text and report its bounds.

use zone_map_geometry::{GeometryTextError, compute_bounds, parse_geometry_text, to_pretty_json};

/// Errors from [`render_check`].
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    /// The input contained only whitespace.
    #[error("no geometry given")]
    Empty,

    /// The input was not a valid geometry.
    #[error(transparent)]
    Invalid(#[from] GeometryTextError),
}

/// Validates `input` and renders the normalized geometry followed by its
/// bounds as west, south, east, north.
///
/// # Errors
///
/// Returns [`CheckError`] if the input is blank or invalid.
pub fn render_check(input: &str) -> Result<String, CheckError> {
    let geometry = parse_geometry_text(input)?.ok_or(CheckError::Empty)?;
    let bounds = compute_bounds(&geometry);

    Ok(format!(
        "{}\n{} bounds: west={} south={} east={} north={}",
        to_pretty_json(Some(&geometry)),
        geometry.kind(),
        bounds.west,
        bounds.south,
        bounds.east,
        bounds.north,
    ))
}
