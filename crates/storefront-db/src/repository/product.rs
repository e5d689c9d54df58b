//! # Product Repository
//!
//! Database operations for the product catalog.
//!
//! The menu application treats PRODUCT_ALL as read-only reference data: the
//! full catalog is listed before adding to a basket, and single products are
//! fetched to snapshot their price into a line item. Inserts exist for the
//! seed binary and tests.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use storefront_core::{Money, Product};

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

const SELECT_COLUMNS: &str = r#"
    Product_ID   AS product_id,
    Name         AS name,
    Rec_price    AS rec_price_cents,
    Product_type AS product_type
"#;

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists the whole catalog, ordered by identifier.
    ///
    /// Shown as a reference listing before the add-to-basket prompts.
    pub async fn list_all(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {SELECT_COLUMNS} FROM PRODUCT_ALL ORDER BY Product_ID"
        ))
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {SELECT_COLUMNS} FROM PRODUCT_ALL WHERE Product_ID = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Inserts a product and returns the generated identifier.
    ///
    /// Used by the seed binary and tests; the menu never writes the catalog.
    pub async fn insert(
        &self,
        name: &str,
        price: Money,
        product_type: &str,
    ) -> DbResult<i64> {
        let result = sqlx::query(
            "INSERT INTO PRODUCT_ALL (Name, Rec_price, Product_type) VALUES (?1, ?2, ?3)",
        )
        .bind(name)
        .bind(price.cents())
        .bind(product_type)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_insert_and_list() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        let coffee = repo
            .insert("Espresso Beans", Money::from_cents(1250), "grocery")
            .await
            .unwrap();
        let mug = repo
            .insert("Stoneware Mug", Money::from_cents(800), "homeware")
            .await
            .unwrap();

        let all = repo.list_all().await.unwrap();
        assert_eq!(all.len(), 2);
        // Ordered by identifier
        assert_eq!(all[0].product_id, coffee);
        assert_eq!(all[1].product_id, mug);
        assert_eq!(all[0].name, "Espresso Beans");
        assert_eq!(all[0].price().cents(), 1250);
        assert_eq!(all[1].product_type, "homeware");
    }

    #[tokio::test]
    async fn test_get_missing_product() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        assert!(db.products().get_by_id(99).await.unwrap().is_none());
    }
}
