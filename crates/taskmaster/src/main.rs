//! # taskmaster
//!
//! TaskMaster server binary — opens the database, runs migrations and
//! seeding, and serves the HTTP API until ctrl-c.

#![deny(unsafe_code)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use taskmaster_server::config::{Environment, ServerConfig};
use taskmaster_server::server::ApiServer;
use taskmaster_store::{ConnectionConfig, open_pool, run_migrations, seed};
use tracing_subscriber::EnvFilter;

/// TaskMaster server.
#[derive(Parser, Debug)]
#[command(name = "taskmaster", about = "TaskMaster to-do list server")]
struct Cli {
    /// Host to bind.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to bind (0 for auto-assign).
    #[arg(long, default_value = "8374")]
    port: u16,

    /// Path to the `SQLite` database.
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// Run in production mode (suppresses error detail in responses).
    #[arg(long)]
    production: bool,
}

impl Cli {
    fn default_db_path() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
        PathBuf::from(home).join(".taskmaster").join("taskmaster.db")
    }
}

fn ensure_parent_dir(path: &std::path::Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    Ok(())
}

/// Open the pool and bring the schema and seed data up to date.
fn bootstrap_database(path: &std::path::Path) -> Result<taskmaster_store::ConnectionPool> {
    ensure_parent_dir(path)?;
    let db_str = path.to_string_lossy();
    let pool =
        open_pool(&db_str, &ConnectionConfig::default()).context("Failed to open database")?;
    {
        let conn = pool.get().context("Failed to get DB connection")?;
        let _ = run_migrations(&conn).context("Failed to run migrations")?;
        seed::ensure_defaults(&conn).context("Failed to seed default data")?;
    }
    Ok(pool)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let db_path = args.db_path.unwrap_or_else(Cli::default_db_path);
    let pool = bootstrap_database(&db_path)?;
    tracing::info!(db = %db_path.display(), "database ready");

    let config = ServerConfig {
        host: args.host,
        port: args.port,
        environment: if args.production {
            Environment::Production
        } else {
            Environment::Development
        },
    };

    let server = ApiServer::new(config, pool);
    let (addr, handle) = server.listen().await.context("Failed to bind server")?;
    tracing::info!("TaskMaster listening on http://{addr}");

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for ctrl-c")?;

    tracing::info!("Shutting down...");
    server.shutdown().shutdown();
    let _ = handle.await;

    tracing::info!("Shutdown complete");
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
