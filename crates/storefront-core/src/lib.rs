//! # storefront-core: Pure Domain Logic for Storefront
//!
//! This crate is the **heart** of Storefront. It contains the domain types
//! shared by every layer, as pure data and functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Storefront Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Terminal Menu (apps/terminal)                │   │
//! │  │    register customer ──► fill basket ──► place order ──► stats  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ storefront-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────────────────┐      ┌─────────────────────┐          │   │
//! │  │   │       types         │      │        money        │          │   │
//! │  │   │ Customer, Product,  │      │  Money (integer     │          │   │
//! │  │   │ Basket, BasketLine, │      │  cents, no floats)  │          │   │
//! │  │   │ Transaction         │      │                     │          │   │
//! │  │   └─────────────────────┘      └─────────────────────┘          │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 storefront-db (Database Layer)                  │   │
//! │  │           SQLite queries, migrations, repositories              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain entities (Customer, Product, Basket, Transaction)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64)

// =============================================================================
// Module Declarations
// =============================================================================

pub mod money;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use storefront_core::Money` instead of
// `use storefront_core::money::Money`

pub use money::Money;
pub use types::*;
