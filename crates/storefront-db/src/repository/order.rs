//! # Order Repository
//!
//! Order placement and transaction history.
//!
//! ## Placement
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Order Placement                                   │
//! │                                                                         │
//! │  Open basket (customer, Date_created, running totals)                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BEGIN                                                                  │
//! │    INSERT TRANSACT ← snapshot of Total_amount / Quantity_items,         │
//! │    │                 credit card, ship date = now, delivered = false    │
//! │    ▼                                                                    │
//! │    UPDATE BASKET SET Date_closed = now                                  │
//! │  COMMIT (or roll back both on any failure)                              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The snapshot copies the basket's stored totals verbatim; nothing is
//! recomputed from line items at placement time.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use storefront_core::{Basket, Money, Transaction};

/// Repository for order placement and transaction history.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

/// One printed line of transaction history: a (transaction, product line)
/// pair joined to the customer and product names.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct HistoryEntry {
    pub transact_id: i64,
    pub first_name: String,
    pub surname: String,
    pub product_name: String,
    pub quantity_product: i64,
    pub final_price_cents: i64,
    pub transact_date: DateTime<Utc>,
    pub delivered_tag: bool,
}

impl HistoryEntry {
    /// Returns the line price as Money.
    #[inline]
    pub fn final_price(&self) -> Money {
        Money::from_cents(self.final_price_cents)
    }

    /// Human-readable delivery status.
    pub fn delivery_status(&self) -> &'static str {
        if self.delivered_tag {
            "delivered"
        } else {
            "pending"
        }
    }
}

const HISTORY_SELECT: &str = r#"
    SELECT
        t.Transact_ID      AS transact_id,
        c.First_name       AS first_name,
        c.Surname          AS surname,
        p.Name             AS product_name,
        f.Quantity_product AS quantity_product,
        f.Final_price      AS final_price_cents,
        t.Transact_date    AS transact_date,
        t.Delivered_tag    AS delivered_tag
    FROM TRANSACT t
    JOIN CUSTOMER c ON c.Customer_ID = t.Customer_ID
    JOIN FILLED f ON f.Date_created = t.Date_created AND f.Customer_ID = t.Customer_ID
    JOIN PRODUCT_ALL p ON p.Product_ID = f.Product_ID
"#;

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Places an order from an open basket.
    ///
    /// ## What This Does, Atomically
    /// 1. Inserts a TRANSACT row snapshotting the basket's stored totals,
    ///    with the current timestamp as both transaction date and ship date,
    ///    delivered = false and no delivery date
    /// 2. Closes the basket (Date_closed = now), matched by its
    ///    (customer, creation timestamp) key
    ///
    /// Both statements run in one database transaction; a failure in either
    /// rolls back both, so a transaction row can never exist alongside a
    /// still-open basket.
    ///
    /// ## Returns
    /// * `Ok(i64)` - The generated Transact_ID
    /// * `Err(DbError::NotFound)` - The basket was no longer open
    pub async fn place(&self, basket: &Basket, credit_card: &str) -> DbResult<i64> {
        let now = Utc::now();

        debug!(
            customer_id = basket.customer_id,
            total = basket.total_amount_cents,
            items = basket.quantity_items,
            "Placing order"
        );

        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO TRANSACT (
                Transact_date, Total_amount, Num_items, Credit_card,
                Delivered_tag, Deliver_date, Ship_date, Date_created, Customer_ID
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(now)
        .bind(basket.total_amount_cents)
        .bind(basket.quantity_items)
        .bind(credit_card)
        .bind(false)
        .bind(Option::<DateTime<Utc>>::None)
        .bind(now)
        .bind(basket.date_created)
        .bind(basket.customer_id)
        .execute(&mut *tx)
        .await?;

        let transact_id = inserted.last_insert_rowid();

        let closed = sqlx::query(
            r#"
            UPDATE BASKET
            SET Date_closed = ?3
            WHERE Customer_ID = ?1 AND Date_created = ?2 AND Date_closed IS NULL
            "#,
        )
        .bind(basket.customer_id)
        .bind(basket.date_created)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        // The basket was read as open moments ago; zero rows here means it
        // was closed underneath us. Dropping the transaction rolls back the
        // TRANSACT insert as well.
        if closed.rows_affected() == 0 {
            return Err(DbError::not_found(
                "Open basket",
                format!("customer {}", basket.customer_id),
            ));
        }

        tx.commit().await?;

        info!(
            transact_id,
            customer_id = basket.customer_id,
            "Order placed"
        );
        Ok(transact_id)
    }

    /// Gets a transaction by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Transaction>> {
        let transaction = sqlx::query_as::<_, Transaction>(
            r#"
            SELECT
                Transact_ID   AS transact_id,
                Transact_date AS transact_date,
                Total_amount  AS total_amount_cents,
                Num_items     AS num_items,
                Credit_card   AS credit_card,
                Delivered_tag AS delivered_tag,
                Deliver_date  AS deliver_date,
                Ship_date     AS ship_date,
                Date_created  AS date_created,
                Customer_ID   AS customer_id
            FROM TRANSACT
            WHERE Transact_ID = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(transaction)
    }

    /// Fetches transaction history, one entry per (transaction, line) pair.
    ///
    /// With `customer_id` set the history is filtered to that customer;
    /// without it, every transaction of every customer is returned. All
    /// matching rows are fetched; there is no paging.
    pub async fn history(&self, customer_id: Option<i64>) -> DbResult<Vec<HistoryEntry>> {
        let entries = match customer_id {
            Some(id) => {
                sqlx::query_as::<_, HistoryEntry>(&format!(
                    "{HISTORY_SELECT} WHERE c.Customer_ID = ?1 ORDER BY t.Transact_ID, p.Product_ID"
                ))
                .bind(id)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, HistoryEntry>(&format!(
                    "{HISTORY_SELECT} ORDER BY t.Transact_ID, p.Product_ID"
                ))
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(entries)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use storefront_core::{NewCustomer, Product};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn register_customer(db: &Database, first_name: &str) -> i64 {
        db.customers()
            .insert(&NewCustomer {
                first_name: first_name.to_string(),
                surname: "Shopper".to_string(),
                email_address: format!("{}@example.com", first_name.to_lowercase()),
                home_address: "1 Test Lane".to_string(),
                area_code: "212".to_string(),
                prefix: "555".to_string(),
                line_number: "0100".to_string(),
                membership: "basic".to_string(),
            })
            .await
            .unwrap()
    }

    async fn insert_product(db: &Database, name: &str, cents: i64) -> Product {
        let id = db
            .products()
            .insert(name, Money::from_cents(cents), "grocery")
            .await
            .unwrap();
        db.products().get_by_id(id).await.unwrap().unwrap()
    }

    /// The worked scenario: an open basket with one product twice at $10.00
    /// becomes a transaction carrying the basket's stored totals.
    #[tokio::test]
    async fn test_place_order_snapshots_basket_and_closes_it() {
        let db = test_db().await;
        let customer = register_customer(&db, "Ada").await;
        let product = insert_product(&db, "Espresso Beans", 1000).await;

        let basket = db.baskets().create(customer, Utc::now()).await.unwrap();
        db.baskets().add_line(&basket, &product, 2).await.unwrap();
        let basket = db.baskets().find_open(customer).await.unwrap().unwrap();
        assert_eq!(basket.total_amount_cents, 2000);
        assert_eq!(basket.quantity_items, 2);

        let transact_id = db
            .orders()
            .place(&basket, "4111111111111111")
            .await
            .unwrap();

        let stored = db.orders().get_by_id(transact_id).await.unwrap().unwrap();
        assert_eq!(stored.total_amount_cents, 2000);
        assert_eq!(stored.num_items, 2);
        assert_eq!(stored.customer_id, customer);
        assert_eq!(stored.date_created, basket.date_created);
        assert_eq!(stored.credit_card, "4111111111111111");
        assert!(!stored.delivered_tag);
        assert!(stored.deliver_date.is_none());

        // The basket is closed now
        assert!(db.baskets().find_open(customer).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_place_rolls_back_when_basket_already_closed() {
        let db = test_db().await;
        let customer = register_customer(&db, "Ada").await;
        let product = insert_product(&db, "Espresso Beans", 1000).await;

        let basket = db.baskets().create(customer, Utc::now()).await.unwrap();
        db.baskets().add_line(&basket, &product, 1).await.unwrap();
        let basket = db.baskets().find_open(customer).await.unwrap().unwrap();

        // First placement closes the basket
        let first = db.orders().place(&basket, "4111111111111111").await.unwrap();

        // Replaying the same basket must fail and write nothing
        let err = db.orders().place(&basket, "4111111111111111").await;
        assert!(matches!(err, Err(DbError::NotFound { .. })));

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM TRANSACT")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(count, 1, "rolled-back insert must not persist");

        assert!(db.orders().get_by_id(first).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_history_with_and_without_filter() {
        let db = test_db().await;
        let ada = register_customer(&db, "Ada").await;
        let tom = register_customer(&db, "Tom").await;
        let beans = insert_product(&db, "Espresso Beans", 1000).await;
        let mug = insert_product(&db, "Stoneware Mug", 800).await;

        for (customer, product, qty) in [(ada, &beans, 2), (tom, &mug, 1)] {
            let basket = db.baskets().create(customer, Utc::now()).await.unwrap();
            db.baskets().add_line(&basket, product, qty).await.unwrap();
            let basket = db.baskets().find_open(customer).await.unwrap().unwrap();
            db.orders().place(&basket, "4111111111111111").await.unwrap();
        }

        let all = db.orders().history(None).await.unwrap();
        assert_eq!(all.len(), 2);

        let ada_only = db.orders().history(Some(ada)).await.unwrap();
        assert_eq!(ada_only.len(), 1);
        assert_eq!(ada_only[0].first_name, "Ada");
        assert_eq!(ada_only[0].product_name, "Espresso Beans");
        assert_eq!(ada_only[0].quantity_product, 2);
        assert_eq!(ada_only[0].final_price_cents, 2000);
        assert_eq!(ada_only[0].delivery_status(), "pending");
    }

    #[tokio::test]
    async fn test_history_empty() {
        let db = test_db().await;

        assert!(db.orders().history(None).await.unwrap().is_empty());
    }
}
