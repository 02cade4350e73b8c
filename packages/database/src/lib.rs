#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Zone storage: the [`ZoneRepository`] trait and its implementations.
//!
//! [`PostgresZoneRepository`] uses `switchy_database` with raw parameterized
//! SQL and `switchy_schema` for embedded migrations.
//! [`MemoryZoneRepository`] keeps zones in process memory with the same
//! filtering and ordering semantics, for development and tests.
//!
//! Repositories never validate geometry on write: [`NewZone`] can only hold
//! an already-validated [`zone_map_geometry::Geometry`].

pub mod db;
pub mod memory;
pub mod queries;
pub mod seed;

use std::sync::Arc;

use async_trait::async_trait;
use include_dir::{Dir, include_dir};
use switchy_database::Database;
use switchy_schema::discovery::embedded::EmbeddedMigrationSource;
use switchy_schema::runner::MigrationRunner;
use zone_map_database_models::{NewZone, ZoneQuery};
use zone_map_zone_models::Zone;

pub use memory::MemoryZoneRepository;

/// Embedded SQL migrations from the `migrations/` directory.
static MIGRATIONS_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/../../migrations");

/// Errors that can occur during database operations.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// Database query error.
    #[error("Database error: {0}")]
    Database(#[from] switchy_database::DatabaseError),

    /// Migration error.
    #[error("Migration error: {0}")]
    Migration(#[from] switchy_schema::MigrationError),

    /// Data conversion error.
    #[error("Data conversion error: {message}")]
    Conversion {
        /// Description of what went wrong.
        message: String,
    },
}

/// Runs all pending database migrations.
///
/// # Errors
///
/// Returns [`DbError`] if any migration fails to apply.
pub async fn run_migrations(db: &dyn Database) -> Result<(), DbError> {
    let source = EmbeddedMigrationSource::new(&MIGRATIONS_DIR);
    let runner = MigrationRunner::new(Box::new(source));
    runner.run(db).await?;
    log::info!("Database migrations completed successfully");
    Ok(())
}

/// Storage for zones.
///
/// Implementations own id and timestamp generation and must return listings
/// in the order requested by [`ZoneQuery::order`], with a tie-break that is
/// stable across repeated queries.
#[async_trait]
pub trait ZoneRepository: Send + Sync {
    /// Inserts a zone and returns it with its generated `id` and
    /// `created_at`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the write fails.
    async fn create(&self, zone: NewZone) -> Result<Zone, DbError>;

    /// Lists zones matching `query`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the read fails or a stored row cannot be
    /// decoded.
    async fn find_many(&self, query: &ZoneQuery) -> Result<Vec<Zone>, DbError>;

    /// Checks that storage is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if storage is unavailable.
    async fn ping(&self) -> Result<(), DbError>;
}

/// [`ZoneRepository`] backed by the `zones` table in Postgres.
#[derive(Clone)]
pub struct PostgresZoneRepository {
    db: Arc<dyn Database>,
}

impl PostgresZoneRepository {
    /// Wraps an open database connection.
    #[must_use]
    pub fn new(db: Arc<dyn Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ZoneRepository for PostgresZoneRepository {
    async fn create(&self, zone: NewZone) -> Result<Zone, DbError> {
        queries::insert_zone(self.db.as_ref(), &zone).await
    }

    async fn find_many(&self, query: &ZoneQuery) -> Result<Vec<Zone>, DbError> {
        queries::find_zones(self.db.as_ref(), query).await
    }

    async fn ping(&self) -> Result<(), DbError> {
        queries::ping(self.db.as_ref()).await
    }
}
