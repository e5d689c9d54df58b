//! # Report Repository
//!
//! Read-only aggregate reports over a date range.
//!
//! Every report takes an inclusive [`DateRange`] of `YYYY-MM-DD` strings and
//! runs one aggregate query; the engine does the joining, grouping and
//! sorting. The range strings are bound as-is with no client-side parsing,
//! and are compared against the calendar-day prefix of the stored timestamp,
//! so a transaction at any time on the end date is still in range.

use serde::Serialize;
use sqlx::SqlitePool;
use storefront_core::Money;

use crate::error::DbResult;

/// An inclusive date range, both ends `YYYY-MM-DD`.
///
/// The strings are passed to the query engine untouched; a malformed date
/// simply matches nothing, exactly as an out-of-range one would.
#[derive(Debug, Clone)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

impl DateRange {
    /// Creates a new date range.
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        DateRange {
            start: start.into(),
            end: end.into(),
        }
    }
}

// =============================================================================
// Report Rows
// =============================================================================

/// A customer and their summed transaction spend within the range.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CustomerSpend {
    pub customer_id: i64,
    pub first_name: String,
    pub surname: String,
    pub total_spent_cents: i64,
}

impl CustomerSpend {
    /// Returns the summed spend as Money.
    #[inline]
    pub fn total_spent(&self) -> Money {
        Money::from_cents(self.total_spent_cents)
    }
}

/// A product and the units of it sold within the range.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ProductSales {
    pub product_id: i64,
    pub name: String,
    pub total_quantity: i64,
}

/// A product and how many distinct customers bought it within the range.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ProductReach {
    pub product_id: i64,
    pub name: String,
    pub buyer_count: i64,
}

/// A shipping zip code and its shipment count within the range.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ZipShipments {
    pub zip_code: String,
    pub shipments: i64,
}

/// A product type and its average per-unit selling price in dollars,
/// rounded to two decimals.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct TypeAveragePrice {
    pub product_type: String,
    pub average_price: f64,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for the five aggregate reports.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    /// Creates a new ReportRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReportRepository { pool }
    }

    /// Top 10 customers by total spend in the range, descending.
    pub async fn top_customers(&self, range: &DateRange) -> DbResult<Vec<CustomerSpend>> {
        let rows = sqlx::query_as::<_, CustomerSpend>(
            r#"
            SELECT
                c.Customer_ID       AS customer_id,
                c.First_name        AS first_name,
                c.Surname           AS surname,
                SUM(t.Total_amount) AS total_spent_cents
            FROM CUSTOMER c
            JOIN TRANSACT t ON t.Customer_ID = c.Customer_ID
            WHERE substr(t.Transact_date, 1, 10) BETWEEN ?1 AND ?2
            GROUP BY c.Customer_ID
            ORDER BY total_spent_cents DESC
            LIMIT 10
            "#,
        )
        .bind(&range.start)
        .bind(&range.end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Units sold per product in the range, descending, unlimited.
    pub async fn frequent_products(&self, range: &DateRange) -> DbResult<Vec<ProductSales>> {
        let rows = sqlx::query_as::<_, ProductSales>(
            r#"
            SELECT
                f.Product_ID            AS product_id,
                p.Name                  AS name,
                SUM(f.Quantity_product) AS total_quantity
            FROM FILLED f
            JOIN TRANSACT t ON t.Date_created = f.Date_created AND t.Customer_ID = f.Customer_ID
            JOIN PRODUCT_ALL p ON p.Product_ID = f.Product_ID
            WHERE substr(t.Transact_date, 1, 10) BETWEEN ?1 AND ?2
            GROUP BY f.Product_ID, p.Name
            ORDER BY total_quantity DESC
            "#,
        )
        .bind(&range.start)
        .bind(&range.end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Distinct buyers per product in the range, descending, unlimited.
    pub async fn products_by_unique_buyers(
        &self,
        range: &DateRange,
    ) -> DbResult<Vec<ProductReach>> {
        let rows = sqlx::query_as::<_, ProductReach>(
            r#"
            SELECT
                f.Product_ID                    AS product_id,
                p.Name                          AS name,
                COUNT(DISTINCT f.Customer_ID)   AS buyer_count
            FROM FILLED f
            JOIN TRANSACT t ON t.Date_created = f.Date_created AND t.Customer_ID = f.Customer_ID
            JOIN PRODUCT_ALL p ON p.Product_ID = f.Product_ID
            WHERE substr(t.Transact_date, 1, 10) BETWEEN ?1 AND ?2
            GROUP BY f.Product_ID, p.Name
            ORDER BY buyer_count DESC
            "#,
        )
        .bind(&range.start)
        .bind(&range.end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Top 5 shipping zip codes by shipment count in the range, descending.
    pub async fn top_zip_codes(&self, range: &DateRange) -> DbResult<Vec<ZipShipments>> {
        let rows = sqlx::query_as::<_, ZipShipments>(
            r#"
            SELECT
                a.Zip_code AS zip_code,
                COUNT(*)   AS shipments
            FROM TRANSACT t
            JOIN SHIP_CUST sc ON sc.Customer_ID = t.Customer_ID
            JOIN SHIP_ADDR a ON a.Addr_name = sc.Addr_name
            WHERE substr(t.Transact_date, 1, 10) BETWEEN ?1 AND ?2
            GROUP BY a.Zip_code
            ORDER BY shipments DESC
            LIMIT 5
            "#,
        )
        .bind(&range.start)
        .bind(&range.end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Average per-unit selling price per product type in the range,
    /// in dollars rounded to two decimals, descending.
    ///
    /// Each line contributes its unit price (line total divided by
    /// quantity); the average is over lines, not units.
    pub async fn average_price_by_type(
        &self,
        range: &DateRange,
    ) -> DbResult<Vec<TypeAveragePrice>> {
        let rows = sqlx::query_as::<_, TypeAveragePrice>(
            r#"
            SELECT
                p.Product_type AS product_type,
                ROUND(AVG(CAST(f.Final_price AS REAL) / f.Quantity_product / 100.0), 2)
                    AS average_price
            FROM FILLED f
            JOIN TRANSACT t ON t.Date_created = f.Date_created AND t.Customer_ID = f.Customer_ID
            JOIN PRODUCT_ALL p ON p.Product_ID = f.Product_ID
            WHERE substr(t.Transact_date, 1, 10) BETWEEN ?1 AND ?2
            GROUP BY p.Product_type
            ORDER BY average_price DESC
            "#,
        )
        .bind(&range.start)
        .bind(&range.end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::{DateTime, Duration, Utc};
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

    async fn insert_product(db: &Database, name: &str, cents: i64, ptype: &str) -> Product {
        let id = db
            .products()
            .insert(name, Money::from_cents(cents), ptype)
            .await
            .unwrap();
        db.products().get_by_id(id).await.unwrap().unwrap()
    }

    async fn give_address(db: &Database, customer: i64, addr_name: &str, zip: &str) {
        sqlx::query("INSERT OR IGNORE INTO SHIP_ADDR (Addr_name, Zip_code) VALUES (?1, ?2)")
            .bind(addr_name)
            .bind(zip)
            .execute(db.pool())
            .await
            .unwrap();
        sqlx::query("INSERT INTO SHIP_CUST (Customer_ID, Addr_name) VALUES (?1, ?2)")
            .bind(customer)
            .bind(addr_name)
            .execute(db.pool())
            .await
            .unwrap();
    }

    /// Opens a basket at `when`, fills it with the given (product, quantity)
    /// lines and records the matching transaction dated `when` as well.
    async fn closed_basket_at(
        db: &Database,
        customer: i64,
        when: DateTime<Utc>,
        lines: &[(&Product, i64)],
    ) {
        let basket = db.baskets().create(customer, when).await.unwrap();
        for (product, qty) in lines {
            db.baskets().add_line(&basket, product, *qty).await.unwrap();
        }
        let basket = db.baskets().find_open(customer).await.unwrap().unwrap();

        sqlx::query(
            r#"
            INSERT INTO TRANSACT (
                Transact_date, Total_amount, Num_items, Credit_card,
                Delivered_tag, Deliver_date, Ship_date, Date_created, Customer_ID
            ) VALUES (?1, ?2, ?3, '4111111111111111', 0, NULL, ?1, ?4, ?5)
            "#,
        )
        .bind(when)
        .bind(basket.total_amount_cents)
        .bind(basket.quantity_items)
        .bind(basket.date_created)
        .bind(customer)
        .execute(db.pool())
        .await
        .unwrap();

        sqlx::query(
            "UPDATE BASKET SET Date_closed = ?3 WHERE Customer_ID = ?1 AND Date_created = ?2",
        )
        .bind(customer)
        .bind(basket.date_created)
        .bind(when)
        .execute(db.pool())
        .await
        .unwrap();
    }

    fn day(dt: DateTime<Utc>) -> String {
        dt.format("%Y-%m-%d").to_string()
    }

    /// Shared fixture spanning two product types, two customers and three
    /// in-range transactions (plus one old transaction outside the range).
    ///
    /// In-range lines:
    ///   ada, 10 days ago: Coffee x2 ($20.00), Mug x1 ($8.00)   total $28.00
    ///   tom,  9 days ago: Tea x4 ($20.00), Coffee x1 ($10.00)  total $30.00
    ///   ada,  8 days ago: Coffee x2 ($20.00), Mug x2 ($16.00)  total $36.00
    /// Out of range:
    ///   tom, 40 days ago: Tea x1 ($5.00)
    struct Fixture {
        db: Database,
        ada: i64,
        tom: i64,
        in_range: DateRange,
        wide_range: DateRange,
    }

    async fn build_fixture() -> Fixture {
        let db = test_db().await;
        let ada = register_customer(&db, "Ada").await;
        let tom = register_customer(&db, "Tom").await;
        give_address(&db, ada, "ada-home", "10001").await;
        give_address(&db, tom, "tom-home", "60601").await;

        let coffee = insert_product(&db, "Coffee", 1000, "grocery").await;
        let tea = insert_product(&db, "Tea", 500, "grocery").await;
        let mug = insert_product(&db, "Mug", 800, "homeware").await;

        let now = Utc::now();
        closed_basket_at(&db, ada, now - Duration::days(10), &[(&coffee, 2), (&mug, 1)]).await;
        closed_basket_at(&db, tom, now - Duration::days(9), &[(&tea, 4), (&coffee, 1)]).await;
        closed_basket_at(&db, ada, now - Duration::days(8), &[(&coffee, 2), (&mug, 2)]).await;
        closed_basket_at(&db, tom, now - Duration::days(40), &[(&tea, 1)]).await;

        let in_range = DateRange::new(day(now - Duration::days(20)), day(now));
        let wide_range = DateRange::new(day(now - Duration::days(60)), day(now));

        Fixture {
            db,
            ada,
            tom,
            in_range,
            wide_range,
        }
    }

    #[tokio::test]
    async fn test_top_customers_sums_and_orders() {
        let fx = build_fixture().await;

        let rows = fx.db.reports().top_customers(&fx.in_range).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].customer_id, fx.ada);
        assert_eq!(rows[0].total_spent_cents, 2800 + 3600);
        assert_eq!(rows[1].customer_id, fx.tom);
        assert_eq!(rows[1].total_spent_cents, 3000);

        // The 40-day-old transaction only counts in the wide range
        let wide = fx.db.reports().top_customers(&fx.wide_range).await.unwrap();
        assert_eq!(wide[1].total_spent_cents, 3000 + 500);
    }

    #[tokio::test]
    async fn test_top_customers_caps_at_ten() {
        let db = test_db().await;
        let product = insert_product(&db, "Coffee", 1000, "grocery").await;
        let now = Utc::now();

        for i in 1..=12_i64 {
            let customer = register_customer(&db, &format!("Shopper{i}")).await;
            // Increasing spend: customer 12 buys the most
            closed_basket_at(&db, customer, now - Duration::days(i), &[(&product, i)]).await;
        }

        let range = DateRange::new(day(now - Duration::days(20)), day(now));
        let rows = db.reports().top_customers(&range).await.unwrap();

        assert_eq!(rows.len(), 10);
        for pair in rows.windows(2) {
            assert!(pair[0].total_spent_cents >= pair[1].total_spent_cents);
        }
        assert_eq!(rows[0].total_spent_cents, 12_000);
    }

    #[tokio::test]
    async fn test_frequent_products() {
        let fx = build_fixture().await;

        let rows = fx
            .db
            .reports()
            .frequent_products(&fx.in_range)
            .await
            .unwrap();
        let counts: Vec<(&str, i64)> = rows
            .iter()
            .map(|r| (r.name.as_str(), r.total_quantity))
            .collect();
        assert_eq!(counts, vec![("Coffee", 5), ("Tea", 4), ("Mug", 3)]);
    }

    #[tokio::test]
    async fn test_products_by_unique_buyers() {
        let fx = build_fixture().await;

        let rows = fx
            .db
            .reports()
            .products_by_unique_buyers(&fx.in_range)
            .await
            .unwrap();
        assert_eq!(rows.len(), 3);
        // Coffee was bought by both customers, the rest by one each
        assert_eq!(rows[0].name, "Coffee");
        assert_eq!(rows[0].buyer_count, 2);
        for row in &rows[1..] {
            assert_eq!(row.buyer_count, 1);
        }
    }

    #[tokio::test]
    async fn test_top_zip_codes() {
        let fx = build_fixture().await;

        let rows = fx.db.reports().top_zip_codes(&fx.in_range).await.unwrap();
        assert_eq!(rows.len(), 2);
        // Ada shipped twice in range, Tom once
        assert_eq!(rows[0].zip_code, "10001");
        assert_eq!(rows[0].shipments, 2);
        assert_eq!(rows[1].zip_code, "60601");
        assert_eq!(rows[1].shipments, 1);
    }

    /// Hand-computed: grocery lines have unit prices 10, 5, 10, 10 dollars
    /// (average 8.75), homeware lines 8 and 8 (average 8.00).
    #[tokio::test]
    async fn test_average_price_by_type_hand_computed() {
        let fx = build_fixture().await;

        let rows = fx
            .db
            .reports()
            .average_price_by_type(&fx.in_range)
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].product_type, "grocery");
        assert!((rows[0].average_price - 8.75).abs() < 1e-9);
        assert_eq!(rows[1].product_type, "homeware");
        assert!((rows[1].average_price - 8.00).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_empty_range_matches_nothing() {
        let fx = build_fixture().await;

        // A range entirely in the past, and a malformed date string, both
        // simply match no rows
        let stale = DateRange::new("1999-01-01", "1999-12-31");
        assert!(fx.db.reports().top_customers(&stale).await.unwrap().is_empty());

        let malformed = DateRange::new("not-a-date", "also-not");
        assert!(fx
            .db
            .reports()
            .frequent_products(&malformed)
            .await
            .unwrap()
            .is_empty());
    }
}
