//! # storefront-db: Database Layer for Storefront
//!
//! This crate provides database access for the Storefront system.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Storefront Data Flow                              │
//! │                                                                         │
//! │  Menu handler (place_order)                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  storefront-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories  │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │ (customer.rs,  │    │  (embedded)  │  │   │
//! │  │   │               │    │  basket.rs,    │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│  order.rs,     │    │ 001_init.sql │  │   │
//! │  │   │ Connection    │    │  report.rs...) │    │              │  │   │
//! │  │   │ Management    │    │                │    │              │  │   │
//! │  │   └───────────────┘    └────────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   CUSTOMER, PRODUCT_ALL, BASKET, FILLED, TRANSACT, SHIP_*       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (customer, basket, order...)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use storefront_db::{Database, DbConfig};
//!
//! // Create database with default config
//! let config = DbConfig::new("path/to/storefront.db");
//! let db = Database::new(config).await?;
//!
//! // Use repositories
//! let basket = db.baskets().find_open(customer_id).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::DbError;
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::basket::BasketRepository;
pub use repository::customer::CustomerRepository;
pub use repository::order::{HistoryEntry, OrderRepository};
pub use repository::product::ProductRepository;
pub use repository::report::{DateRange, ReportRepository};
