//! # Storefront Terminal Application Entry Point
//!
//! A line-oriented menu front end to the retail customer/order database.
//!
//! ## Application Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Terminal                              │
//! │                                                                         │
//! │  main.rs ────► Sets up logging, configuration, database session         │
//! │                                                                         │
//! │  menu.rs ────► Two-level menu loop (main menu + statistics)             │
//! │                                                                         │
//! │  commands/ ──► register_customer, add_product, place_order,             │
//! │                transaction history, five date-ranged reports            │
//! │                                                                         │
//! │  prompt.rs ──► Line-oriented input helpers                              │
//! │                                                                         │
//! │                              │                                          │
//! │                              ▼                                          │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                       SQLite Database                            │  │
//! │  │  storefront.db (local file, WAL mode)                            │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging)
//! 2. Load configuration (database path)
//! 3. Connect to database & run migrations; a failure here is fatal
//! 4. Run the menu loop until exit or exhausted input
//! 5. Close the database session, on every exit path

mod commands;
mod config;
mod error;
mod menu;
mod prompt;

use std::fs;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use storefront_db::{Database, DbConfig};

use crate::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    info!("Starting Storefront terminal");

    let config = AppConfig::load();

    // The SQLite driver creates the file, but not its parent directory
    if let Some(parent) = config.database_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let db = Database::new(DbConfig::new(&config.database_path)).await?;
    info!(path = %config.database_path.display(), "Database ready");

    let outcome = menu::run(&db).await;

    // The session is released on every exit path, error or not
    db.close().await;

    match outcome {
        Ok(()) => {
            println!("Goodbye!");
            Ok(())
        }
        Err(err) => {
            error!(%err, "Aborting on fatal error");
            Err(err.into())
        }
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// Default is `info`; override with `RUST_LOG` (e.g. `RUST_LOG=debug`).
/// Diagnostics go to stderr so they do not interleave with menu output.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
}
