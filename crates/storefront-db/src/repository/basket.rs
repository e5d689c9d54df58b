//! # Basket Repository
//!
//! Database operations for baskets and their line items.
//!
//! ## Basket Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Basket Lifecycle                                  │
//! │                                                                         │
//! │  1. OPEN                                                                │
//! │     └── create() → BASKET row, Date_closed = NULL, totals at zero       │
//! │                                                                         │
//! │  2. FILL                                                                │
//! │     └── add_line() → FILLED row keyed by the basket's Date_created      │
//! │     └── add_line() → ... running totals folded into the BASKET row      │
//! │                                                                         │
//! │  3. CLOSE (order placement, see order.rs)                               │
//! │     └── Date_closed set; totals snapshotted into TRANSACT               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The menu never creates a basket implicitly: adding a product to a
//! customer with no open basket is reported as an ordinary failure and
//! writes nothing. Baskets are opened by the seed binary and by tests.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use storefront_core::{Basket, BasketLine, Product};

/// Repository for basket database operations.
#[derive(Debug, Clone)]
pub struct BasketRepository {
    pool: SqlitePool,
}

impl BasketRepository {
    /// Creates a new BasketRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BasketRepository { pool }
    }

    /// Opens a new basket for a customer at the given creation timestamp.
    ///
    /// The timestamp is the basket's identity together with the customer, so
    /// callers control it (the seed binary backdates historical baskets).
    pub async fn create(
        &self,
        customer_id: i64,
        date_created: DateTime<Utc>,
    ) -> DbResult<Basket> {
        debug!(customer_id, "Opening basket");

        sqlx::query(
            r#"
            INSERT INTO BASKET (Customer_ID, Date_created, Date_closed, Total_amount, Quantity_items)
            VALUES (?1, ?2, NULL, 0, 0)
            "#,
        )
        .bind(customer_id)
        .bind(date_created)
        .execute(&self.pool)
        .await?;

        Ok(Basket {
            customer_id,
            date_created,
            date_closed: None,
            total_amount_cents: 0,
            quantity_items: 0,
        })
    }

    /// Finds a customer's most recently created open basket.
    ///
    /// An open basket has Date_closed IS NULL. Each customer is assumed to
    /// have at most one; ordering by Date_created resolves any ambiguity in
    /// favour of the newest.
    ///
    /// ## Returns
    /// * `Ok(Some(Basket))` - The open basket
    /// * `Ok(None)` - The customer has no open basket
    pub async fn find_open(&self, customer_id: i64) -> DbResult<Option<Basket>> {
        let basket = sqlx::query_as::<_, Basket>(
            r#"
            SELECT
                Customer_ID    AS customer_id,
                Date_created   AS date_created,
                Date_closed    AS date_closed,
                Total_amount   AS total_amount_cents,
                Quantity_items AS quantity_items
            FROM BASKET
            WHERE Customer_ID = ?1 AND Date_closed IS NULL
            ORDER BY Date_created DESC
            LIMIT 1
            "#,
        )
        .bind(customer_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(basket)
    }

    /// Adds a line item to an open basket.
    ///
    /// ## Snapshot Pattern
    /// The line's Final_price freezes unit price times quantity at the
    /// moment the line is added, so later catalog price changes do not
    /// rewrite basket history. The basket's running Total_amount and
    /// Quantity_items are folded forward in the same transaction.
    ///
    /// ## Arguments
    /// * `basket` - The open basket (from [`Self::find_open`])
    /// * `product` - The product being added (price source for the snapshot)
    /// * `quantity` - Units of the product
    pub async fn add_line(
        &self,
        basket: &Basket,
        product: &Product,
        quantity: i64,
    ) -> DbResult<BasketLine> {
        let final_price = product.price().multiply_quantity(quantity);

        debug!(
            customer_id = basket.customer_id,
            product_id = product.product_id,
            quantity,
            final_price = %final_price,
            "Adding basket line"
        );

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO FILLED (Date_created, Customer_ID, Product_ID, Quantity_product, Final_price)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(basket.date_created)
        .bind(basket.customer_id)
        .bind(product.product_id)
        .bind(quantity)
        .bind(final_price.cents())
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE BASKET
            SET Total_amount = Total_amount + ?3,
                Quantity_items = Quantity_items + ?4
            WHERE Customer_ID = ?1 AND Date_created = ?2
            "#,
        )
        .bind(basket.customer_id)
        .bind(basket.date_created)
        .bind(final_price.cents())
        .bind(quantity)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(BasketLine {
            date_created: basket.date_created,
            customer_id: basket.customer_id,
            product_id: product.product_id,
            quantity_product: quantity,
            final_price_cents: final_price.cents(),
        })
    }

    /// Gets all line items for a basket, ordered by product.
    pub async fn lines(&self, basket: &Basket) -> DbResult<Vec<BasketLine>> {
        let lines = sqlx::query_as::<_, BasketLine>(
            r#"
            SELECT
                Date_created     AS date_created,
                Customer_ID      AS customer_id,
                Product_ID       AS product_id,
                Quantity_product AS quantity_product,
                Final_price      AS final_price_cents
            FROM FILLED
            WHERE Customer_ID = ?1 AND Date_created = ?2
            ORDER BY Product_ID
            "#,
        )
        .bind(basket.customer_id)
        .bind(basket.date_created)
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
