#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the zone map toolchain.
//!
//! Runs the API server, seeds a development database with demo zones, or
//! checks pasted geometry JSON against the same validator the API uses.

mod check;

use std::io::Read as _;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use zone_map_database::{PostgresZoneRepository, db, run_migrations, seed::seed_zones};
use zone_map_server::{ServerConfig, run_server};

/// Zone map toolchain.
#[derive(Parser)]
#[command(name = "zone_map_cli")]
#[command(about = "Manage and serve land-use zones")]
struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server (configured from the environment).
    Serve {
        /// Overrides `PORT`.
        #[arg(long)]
        port: Option<u16>,
    },

    /// Run migrations and insert the demo zones into `DATABASE_URL`.
    Seed,

    /// Validate a `GeoJSON` Point or Polygon and print its bounds.
    Check {
        /// File to read; standard input when omitted.
        path: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port } => cmd_serve(port).await,
        Commands::Seed => cmd_seed().await,
        Commands::Check { path } => cmd_check(path),
    }
}

/// Starts the server on its own actix system.
async fn cmd_serve(port: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = ServerConfig::from_env();
    if let Some(port) = port {
        config.port = port;
    }

    // actix-web needs its own single-threaded runtime; running it inside
    // tokio's would nest runtimes.
    tokio::task::spawn_blocking(move || actix_web::rt::System::new().block_on(run_server(config)))
        .await??;

    Ok(())
}

/// Seeds the demo zones into Postgres.
async fn cmd_seed() -> Result<(), Box<dyn std::error::Error>> {
    let db_conn = db::connect_from_env().await?;
    run_migrations(db_conn.as_ref()).await?;

    let repo = PostgresZoneRepository::new(Arc::from(db_conn));
    let inserted = seed_zones(&repo).await?;

    println!("Seeded {inserted} zone(s)");
    Ok(())
}

/// Validates geometry from a file or stdin.
fn cmd_check(path: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let input = match path {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    match check::render_check(&input) {
        Ok(report) => {
            println!("{report}");
            Ok(())
        }
        Err(e) => {
            log::debug!("Rejected geometry input: {e:?}");
            Err(e.into())
        }
    }
}
