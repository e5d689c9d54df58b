//! # Customer Repository
//!
//! Database operations for customers.
//!
//! Registration is the only write this application performs on CUSTOMER:
//! customers are never updated or deleted here. The generated identifier is
//! read back after the insert and reported to the operator.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use storefront_core::{Customer, NewCustomer};

/// Repository for customer database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = CustomerRepository::new(pool);
///
/// let id = repo.insert(&new_customer).await?;
/// let stored = repo.get_by_id(id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Inserts a new customer and returns the generated identifier.
    ///
    /// The eight registration fields are stored exactly as collected; no
    /// format validation happens at this layer.
    ///
    /// ## Returns
    /// * `Ok(i64)` - The generated Customer_ID
    /// * `Err(DbError)` - Insert failed, nothing was stored
    pub async fn insert(&self, customer: &NewCustomer) -> DbResult<i64> {
        debug!(surname = %customer.surname, "Inserting customer");

        let result = sqlx::query(
            r#"
            INSERT INTO CUSTOMER (
                First_name, Surname, Email_address, Home_address,
                Area_code, Prefix, Line_number, Membership
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&customer.first_name)
        .bind(&customer.surname)
        .bind(&customer.email_address)
        .bind(&customer.home_address)
        .bind(&customer.area_code)
        .bind(&customer.prefix)
        .bind(&customer.line_number)
        .bind(&customer.membership)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        debug!(customer_id = id, "Customer inserted");
        Ok(id)
    }

    /// Gets a customer by ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Customer))` - Customer found
    /// * `Ok(None)` - Customer not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            SELECT
                Customer_ID   AS customer_id,
                First_name    AS first_name,
                Surname       AS surname,
                Email_address AS email_address,
                Home_address  AS home_address,
                Area_code     AS area_code,
                Prefix        AS prefix,
                Line_number   AS line_number,
                Membership    AS membership
            FROM CUSTOMER
            WHERE Customer_ID = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    fn sample() -> NewCustomer {
        NewCustomer {
            first_name: "Grace".to_string(),
            surname: "Hopper".to_string(),
            email_address: "grace@example.com".to_string(),
            home_address: "90 Compiler Court".to_string(),
            area_code: "703".to_string(),
            prefix: "555".to_string(),
            line_number: "0142".to_string(),
            membership: "gold".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_returns_fresh_id_and_roundtrips_fields() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.customers();

        let id = repo.insert(&sample()).await.unwrap();
        assert!(id > 0);

        let stored = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.customer_id, id);
        assert_eq!(stored.first_name, "Grace");
        assert_eq!(stored.surname, "Hopper");
        assert_eq!(stored.email_address, "grace@example.com");
        assert_eq!(stored.home_address, "90 Compiler Court");
        assert_eq!(stored.area_code, "703");
        assert_eq!(stored.prefix, "555");
        assert_eq!(stored.line_number, "0142");
        assert_eq!(stored.membership, "gold");
    }

    #[tokio::test]
    async fn test_ids_are_never_reused() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.customers();

        let first = repo.insert(&sample()).await.unwrap();
        let second = repo.insert(&sample()).await.unwrap();
        assert!(second > first);
    }

    #[tokio::test]
    async fn test_get_missing_customer() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.customers();

        assert!(repo.get_by_id(424242).await.unwrap().is_none());
    }
}
