#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the zone map application.
//!
//! Serves `GET`/`POST /api/zones` plus liveness (`/api/health`) and
//! readiness (`/api/ready`) probes. Zones are stored in Postgres, or in
//! memory when `ZONE_MAP_STORAGE=memory`.

mod config;
mod handlers;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, error, middleware, web};
use zone_map_database::{
    MemoryZoneRepository, PostgresZoneRepository, ZoneRepository, db, run_migrations,
};
use zone_map_server_models::ApiError;
use zone_map_zones::{ZoneQueryService, ZoneRecordService};

pub use config::{ServerConfig, StorageBackend};

/// Shared application state.
pub struct AppState {
    /// Zone creation.
    pub records: ZoneRecordService,
    /// Zone listing.
    pub queries: ZoneQueryService,
    /// Underlying storage, for readiness checks.
    pub repo: Arc<dyn ZoneRepository>,
}

impl AppState {
    /// Builds the services on top of `repo`.
    #[must_use]
    pub fn new(repo: Arc<dyn ZoneRepository>) -> Self {
        Self {
            records: ZoneRecordService::new(repo.clone()),
            queries: ZoneQueryService::new(repo.clone()),
            repo,
        }
    }
}

/// Registers the `/api` routes and JSON body handling.
///
/// Malformed request bodies are answered with a `400` [`ApiError`].
pub fn configure(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(ApiError::message(err.to_string()));
        error::InternalError::from_response(err, response).into()
    });

    cfg.app_data(json_config).service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/ready", web::get().to(handlers::ready))
            .route("/zones", web::get().to(handlers::list_zones))
            .route("/zones", web::post().to(handlers::create_zone)),
    );
}

/// Opens the configured zone storage, running migrations for Postgres.
///
/// # Errors
///
/// Returns an error if the database connection or migrations fail.
pub async fn open_repository(
    config: &ServerConfig,
) -> Result<Arc<dyn ZoneRepository>, Box<dyn std::error::Error>> {
    match config.storage {
        StorageBackend::Memory => {
            log::warn!("Using in-memory zone storage; zones are lost on restart");
            Ok(Arc::new(MemoryZoneRepository::new()))
        }
        StorageBackend::Postgres => {
            log::info!("Connecting to database...");
            let db_conn = db::connect(&config.database_url).await?;

            log::info!("Running migrations...");
            run_migrations(db_conn.as_ref()).await?;

            Ok(Arc::new(PostgresZoneRepository::new(Arc::from(db_conn))))
        }
    }
}

/// Starts the zone map API server.
///
/// This is a regular async function; the caller provides the runtime
/// (e.g. via `#[actix_web::main]`) and initializes logging.
///
/// # Errors
///
/// Returns an `std::io::Result` error if storage cannot be opened or the
/// HTTP server fails to bind.
#[allow(clippy::future_not_send)]
pub async fn run_server(config: ServerConfig) -> std::io::Result<()> {
    let repo = open_repository(&config)
        .await
        .map_err(|e| std::io::Error::other(format!("Failed to open zone storage: {e}")))?;

    let state = web::Data::new(AppState::new(repo));

    log::info!("Starting server on {}:{}", config.bind_addr, config.port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((config.bind_addr, config.port))?
    .run()
    .await
}
