//! # Domain Types
//!
//! Core domain types used throughout Storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Customer     │   │     Product     │   │     Basket      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  customer_id    │   │  product_id     │   │  (customer_id,  │       │
//! │  │  name, email    │   │  name           │   │   date_created) │       │
//! │  │  phone parts    │   │  rec_price      │   │  date_closed    │       │
//! │  │  membership     │   │  product_type   │   │  running totals │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │   BasketLine    │   │   Transaction   │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  basket key +   │   │  transact_id    │                             │
//! │  │  product + qty  │   │  basket snapshot│                             │
//! │  │  price snapshot │   │  ship/delivery  │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity Pattern
//! Customers, products and transactions carry database-generated integer
//! identifiers. A basket has no identifier of its own: it is identified by
//! the composite key (customer_id, date_created), and its line items and the
//! transaction snapshotting it carry the same pair.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Customer
// =============================================================================

/// A registered customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Customer {
    /// Database-generated identifier.
    pub customer_id: i64,
    pub first_name: String,
    pub surname: String,
    pub email_address: String,
    pub home_address: String,
    /// Phone number parts are kept as entered, no numeric coercion.
    pub area_code: String,
    pub prefix: String,
    pub line_number: String,
    /// Free-text membership level (e.g. "gold").
    pub membership: String,
}

impl Customer {
    /// Full display name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.surname)
    }

    /// Phone number assembled from its three stored parts.
    pub fn phone(&self) -> String {
        format!("({}) {}-{}", self.area_code, self.prefix, self.line_number)
    }
}

/// The eight registration fields, collected from prompts before insertion.
///
/// Registration performs no format validation; fields are stored as entered.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewCustomer {
    pub first_name: String,
    pub surname: String,
    pub email_address: String,
    pub home_address: String,
    pub area_code: String,
    pub prefix: String,
    pub line_number: String,
    pub membership: String,
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale. Read-only from this application.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    pub product_id: i64,
    pub name: String,
    /// Recommended price in cents.
    pub rec_price_cents: i64,
    pub product_type: String,
}

impl Product {
    /// Returns the recommended price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.rec_price_cents)
    }
}

// =============================================================================
// Basket
// =============================================================================

/// A customer's in-progress collection of line items.
///
/// Identified by (customer_id, date_created). Open while `date_closed` is
/// `None`; order placement closes it. The running totals are maintained as
/// lines are added and are snapshotted verbatim into the transaction, never
/// recomputed from the line items at placement time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Basket {
    pub customer_id: i64,
    pub date_created: DateTime<Utc>,
    pub date_closed: Option<DateTime<Utc>>,
    /// Running total of all line prices, in cents.
    pub total_amount_cents: i64,
    /// Running count of units across all lines.
    pub quantity_items: i64,
}

impl Basket {
    /// An open basket has not yet been closed by order placement.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.date_closed.is_none()
    }

    /// Returns the running total as Money.
    #[inline]
    pub fn total_amount(&self) -> Money {
        Money::from_cents(self.total_amount_cents)
    }
}

// =============================================================================
// Basket Line
// =============================================================================

/// One (basket, product) association with a quantity and price snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct BasketLine {
    /// Creation timestamp of the owning basket.
    pub date_created: DateTime<Utc>,
    pub customer_id: i64,
    pub product_id: i64,
    pub quantity_product: i64,
    /// Line total (unit price times quantity) frozen when the line was added.
    pub final_price_cents: i64,
}

impl BasketLine {
    /// Returns the frozen line total as Money.
    #[inline]
    pub fn final_price(&self) -> Money {
        Money::from_cents(self.final_price_cents)
    }
}

// =============================================================================
// Transaction
// =============================================================================

/// A placed order: an immutable snapshot of a basket's totals plus shipping
/// and delivery metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Transaction {
    /// Database-generated identifier.
    pub transact_id: i64,
    pub transact_date: DateTime<Utc>,
    /// Basket total at placement time, in cents.
    pub total_amount_cents: i64,
    /// Basket unit count at placement time.
    pub num_items: i64,
    pub credit_card: String,
    pub delivered_tag: bool,
    pub deliver_date: Option<DateTime<Utc>>,
    pub ship_date: DateTime<Utc>,
    /// Creation timestamp of the basket this order snapshotted.
    pub date_created: DateTime<Utc>,
    pub customer_id: i64,
}

impl Transaction {
    /// Returns the snapshotted total as Money.
    #[inline]
    pub fn total_amount(&self) -> Money {
        Money::from_cents(self.total_amount_cents)
    }

    /// Human-readable delivery status for terminal output.
    pub fn delivery_status(&self) -> &'static str {
        if self.delivered_tag {
            "delivered"
        } else {
            "pending"
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_customer() -> Customer {
        Customer {
            customer_id: 7,
            first_name: "Ada".to_string(),
            surname: "Lovelace".to_string(),
            email_address: "ada@example.com".to_string(),
            home_address: "1 Analytical Way".to_string(),
            area_code: "212".to_string(),
            prefix: "555".to_string(),
            line_number: "0199".to_string(),
            membership: "gold".to_string(),
        }
    }

    #[test]
    fn test_customer_display_helpers() {
        let customer = sample_customer();
        assert_eq!(customer.full_name(), "Ada Lovelace");
        assert_eq!(customer.phone(), "(212) 555-0199");
    }

    #[test]
    fn test_basket_open_state() {
        let mut basket = Basket {
            customer_id: 7,
            date_created: Utc::now(),
            date_closed: None,
            total_amount_cents: 2000,
            quantity_items: 2,
        };
        assert!(basket.is_open());
        assert_eq!(basket.total_amount().cents(), 2000);

        basket.date_closed = Some(Utc::now());
        assert!(!basket.is_open());
    }

    #[test]
    fn test_line_price_snapshot() {
        let line = BasketLine {
            date_created: Utc::now(),
            customer_id: 7,
            product_id: 3,
            quantity_product: 2,
            final_price_cents: 2000,
        };
        assert_eq!(format!("{}", line.final_price()), "$20.00");
    }

    #[test]
    fn test_delivery_status() {
        let now = Utc::now();
        let mut tx = Transaction {
            transact_id: 1,
            transact_date: now,
            total_amount_cents: 2000,
            num_items: 2,
            credit_card: "4111111111111111".to_string(),
            delivered_tag: false,
            deliver_date: None,
            ship_date: now,
            date_created: now,
            customer_id: 7,
        };
        assert_eq!(tx.delivery_status(), "pending");

        tx.delivered_tag = true;
        tx.deliver_date = Some(now);
        assert_eq!(tx.delivery_status(), "delivered");
    }

    #[test]
    fn test_product_price() {
        let product = Product {
            product_id: 3,
            name: "Espresso Beans".to_string(),
            rec_price_cents: 1250,
            product_type: "grocery".to_string(),
        };
        assert_eq!(format!("{}", product.price()), "$12.50");
    }
}
