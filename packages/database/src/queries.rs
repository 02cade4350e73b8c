//! Raw SQL for the `zones` table.
//!
//! Geometry is stored as `JSONB` and read back as text, then decoded with
//! the same validator used for API input. A stored row that no longer
//! decodes is reported as a conversion error rather than served.

use std::str::FromStr as _;

use chrono::{DateTime, NaiveDateTime, Utc};
use moosicbox_json_utils::database::ToValue as _;
use switchy_database::{Database, DatabaseValue, Row};
use zone_map_database_models::{NewZone, ZoneOrder, ZoneQuery};
use zone_map_geometry::Geometry;
use zone_map_zone_models::{Zone, ZoneType};

use crate::DbError;

const ZONE_COLUMNS: &str =
    "id::text AS id, name, zone_type, geometry::text AS geometry, created_at";

/// Inserts a zone and returns the stored row.
///
/// # Errors
///
/// Returns [`DbError`] if the insert fails or the returned row cannot be
/// decoded.
pub async fn insert_zone(db: &dyn Database, zone: &NewZone) -> Result<Zone, DbError> {
    let geometry = serde_json::to_string(&zone.geometry).map_err(|e| DbError::Conversion {
        message: format!("Failed to serialize geometry: {e}"),
    })?;

    let rows = db
        .query_raw_params(
            &format!(
                "INSERT INTO zones (name, zone_type, geometry)
                 VALUES ($1::text, $2::text, ($3::text)::jsonb)
                 RETURNING {ZONE_COLUMNS}"
            ),
            &[
                DatabaseValue::String(zone.name.clone()),
                DatabaseValue::String(zone.zone_type.as_ref().to_string()),
                DatabaseValue::String(geometry),
            ],
        )
        .await?;

    let row = rows.first().ok_or_else(|| DbError::Conversion {
        message: "Insert into zones returned no row".to_string(),
    })?;

    let zone = zone_from_row(row)?;
    log::debug!("Inserted zone {} ({})", zone.id, zone.name);
    Ok(zone)
}

/// Lists zones matching `query`.
///
/// The name filter is matched with `ILIKE` as a literal substring; `%`, `_`
/// and `\` in the filter are escaped.
///
/// # Errors
///
/// Returns [`DbError`] if the query fails or a row cannot be decoded.
pub async fn find_zones(db: &dyn Database, query: &ZoneQuery) -> Result<Vec<Zone>, DbError> {
    let (sql, params) = build_find_sql(query);

    let rows = db.query_raw_params(&sql, &params).await?;

    rows.iter().map(zone_from_row).collect()
}

/// Runs a trivial query to confirm the database answers.
///
/// # Errors
///
/// Returns [`DbError`] if the database is unreachable.
pub async fn ping(db: &dyn Database) -> Result<(), DbError> {
    db.query_raw_params("SELECT 1 AS ok", &[]).await?;
    Ok(())
}

fn build_find_sql(query: &ZoneQuery) -> (String, Vec<DatabaseValue>) {
    let mut sql = format!("SELECT {ZONE_COLUMNS} FROM zones");
    let mut params = Vec::new();

    if let Some(filter) = query.name_contains.as_deref() {
        sql.push_str(" WHERE name ILIKE '%' || $1::text || '%'");
        params.push(DatabaseValue::String(escape_like(filter)));
    }

    match query.order {
        ZoneOrder::NewestFirst => sql.push_str(" ORDER BY created_at DESC, id DESC"),
    }

    (sql, params)
}

/// Escapes `LIKE` wildcards so `filter` matches literally. Backslash is the
/// default `LIKE` escape character in Postgres.
fn escape_like(filter: &str) -> String {
    let mut escaped = String::with_capacity(filter.len());
    for c in filter.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn zone_from_row(row: &Row) -> Result<Zone, DbError> {
    let conversion = |column: &str, e: &dyn std::fmt::Display| DbError::Conversion {
        message: format!("Failed to parse zone {column}: {e}"),
    };

    let id: String = row.to_value("id").map_err(|e| conversion("id", &e))?;
    let name: String = row.to_value("name").map_err(|e| conversion("name", &e))?;

    let zone_type: String = row
        .to_value("zone_type")
        .map_err(|e| conversion("zone_type", &e))?;
    let zone_type = ZoneType::from_str(&zone_type).map_err(|e| conversion("zone_type", &e))?;

    let geometry: String = row
        .to_value("geometry")
        .map_err(|e| conversion("geometry", &e))?;
    let geometry: Geometry =
        serde_json::from_str(&geometry).map_err(|e| conversion("geometry", &e))?;

    let created_at: NaiveDateTime = row
        .to_value("created_at")
        .map_err(|e| conversion("created_at", &e))?;

    Ok(Zone {
        id,
        name,
        zone_type,
        geometry,
        created_at: DateTime::<Utc>::from_naive_utc_and_offset(created_at, Utc),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_like_wildcards() {
        assert_eq!(escape_like("resi"), "resi");
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("zona_norte"), "zona\\_norte");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
    }

    #[test]
    fn unfiltered_listing_has_no_params() {
        let (sql, params) = build_find_sql(&ZoneQuery::all());
        assert!(params.is_empty());
        assert!(!sql.contains("WHERE"));
        assert!(sql.ends_with("ORDER BY created_at DESC, id DESC"));
    }

    #[test]
    fn filtered_listing_binds_escaped_filter() {
        let (sql, params) = build_find_sql(&ZoneQuery::name_contains("50%"));
        assert!(sql.contains("name ILIKE '%' || $1::text || '%'"));
        assert_eq!(params.len(), 1);
        assert!(matches!(&params[0], DatabaseValue::String(s) if s == "50\\%"));
        assert!(sql.ends_with("ORDER BY created_at DESC, id DESC"));
    }
}
