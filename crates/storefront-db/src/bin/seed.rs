//! # Seed Data Generator
//!
//! Populates the database with demo data for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default database
//! cargo run -p storefront-db --bin seed
//!
//! # Specify database path
//! cargo run -p storefront-db --bin seed -- --db ./data/storefront.db
//! ```
//!
//! ## Generated Data
//! - A product catalog across several product types
//! - A handful of customers with shipping addresses
//! - Closed baskets with backdated transactions (so the date-ranged
//!   reports have history to aggregate)
//! - One open basket per returning customer (so add-to-basket and
//!   place-order have something to work on)

use chrono::{Duration, Utc};
use std::env;

use storefront_core::{Money, NewCustomer};
use storefront_db::{Database, DbConfig};

/// Product catalog: (name, price cents, product type)
const PRODUCTS: &[(&str, i64, &str)] = &[
    ("Coffee Beans 1kg", 1250, "grocery"),
    ("Loose Leaf Tea", 650, "grocery"),
    ("Olive Oil 500ml", 899, "grocery"),
    ("Sourdough Loaf", 450, "grocery"),
    ("Stoneware Mug", 800, "homeware"),
    ("Linen Tea Towel", 550, "homeware"),
    ("Cast Iron Pan", 3900, "homeware"),
    ("Notebook A5", 700, "stationery"),
    ("Fountain Pen", 2400, "stationery"),
    ("Desk Calendar", 950, "stationery"),
];

/// Customers: (first name, surname, membership, address name, zip code)
const CUSTOMERS: &[(&str, &str, &str, &str, &str)] = &[
    ("Ada", "Lovelace", "gold", "ada-home", "10001"),
    ("Tom", "Kowalski", "basic", "tom-home", "60601"),
    ("Ines", "Marques", "silver", "ines-home", "94110"),
    ("Noor", "Haddad", "basic", "noor-home", "10001"),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let db_path = database_path();
    println!("Seeding database at {db_path}");

    let db = Database::new(DbConfig::new(&db_path)).await?;

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM PRODUCT_ALL")
        .fetch_one(db.pool())
        .await?;
    if existing > 0 {
        println!("Database already has {existing} products, nothing to do.");
        db.close().await;
        return Ok(());
    }

    // Catalog
    let mut product_ids = Vec::new();
    for (name, cents, product_type) in PRODUCTS {
        let id = db
            .products()
            .insert(name, Money::from_cents(*cents), product_type)
            .await?;
        product_ids.push(id);
    }
    println!("Inserted {} products", product_ids.len());

    // Customers with shipping addresses
    let mut customer_ids = Vec::new();
    for (first_name, surname, membership, addr_name, zip) in CUSTOMERS {
        let id = db
            .customers()
            .insert(&NewCustomer {
                first_name: first_name.to_string(),
                surname: surname.to_string(),
                email_address: format!(
                    "{}.{}@example.com",
                    first_name.to_lowercase(),
                    surname.to_lowercase()
                ),
                home_address: format!("{} {} Street", id_hint(&customer_ids), surname),
                area_code: "212".to_string(),
                prefix: "555".to_string(),
                line_number: format!("01{:02}", customer_ids.len()),
                membership: membership.to_string(),
            })
            .await?;

        sqlx::query("INSERT INTO SHIP_ADDR (Addr_name, Zip_code) VALUES (?1, ?2)")
            .bind(*addr_name)
            .bind(*zip)
            .execute(db.pool())
            .await?;
        sqlx::query("INSERT INTO SHIP_CUST (Customer_ID, Addr_name) VALUES (?1, ?2)")
            .bind(id)
            .bind(*addr_name)
            .execute(db.pool())
            .await?;

        customer_ids.push(id);
    }
    println!("Inserted {} customers", customer_ids.len());

    // Order history: each customer gets a few closed baskets spread over the
    // last weeks, cycling through the catalog.
    let now = Utc::now();
    let mut transactions = 0;
    for (c_idx, customer) in customer_ids.iter().enumerate() {
        for order in 0..3usize {
            let when = now - Duration::days(3 + 7 * order as i64 + c_idx as i64);

            let basket = db.baskets().create(*customer, when).await?;
            for pick in 0..2usize {
                let product_id = product_ids[(c_idx * 3 + order * 2 + pick) % product_ids.len()];
                let product = db
                    .products()
                    .get_by_id(product_id)
                    .await?
                    .ok_or("seeded product missing")?;
                db.baskets()
                    .add_line(&basket, &product, 1 + ((order + pick) % 3) as i64)
                    .await?;
            }

            let basket = db
                .baskets()
                .find_open(*customer)
                .await?
                .ok_or("basket just created must be open")?;
            let transact_id = db.orders().place(&basket, "4111111111111111").await?;

            // Backdate the transaction to the basket's day so the reports
            // have a spread of dates to range over
            sqlx::query(
                "UPDATE TRANSACT SET Transact_date = ?2, Ship_date = ?2 WHERE Transact_ID = ?1",
            )
            .bind(transact_id)
            .bind(when)
            .execute(db.pool())
            .await?;
            transactions += 1;
        }
    }
    println!("Inserted {transactions} historical transactions");

    // Open baskets, ready for add-to-basket and place-order
    let mut open_baskets = 0;
    for customer in customer_ids.iter().take(2) {
        let basket = db.baskets().create(*customer, Utc::now()).await?;
        let product = db
            .products()
            .get_by_id(product_ids[open_baskets])
            .await?
            .ok_or("seeded product missing")?;
        db.baskets().add_line(&basket, &product, 1).await?;
        open_baskets += 1;
    }
    println!("Opened {open_baskets} baskets");

    db.close().await;
    println!("Done.");
    Ok(())
}

/// Resolves the database path from `--db <path>`, the `STOREFRONT_DB`
/// environment variable, or the working-directory default, in that order.
fn database_path() -> String {
    let args: Vec<String> = env::args().collect();
    if let Some(pos) = args.iter().position(|a| a == "--db") {
        if let Some(path) = args.get(pos + 1) {
            return path.clone();
        }
    }

    env::var("STOREFRONT_DB").unwrap_or_else(|_| "./storefront.db".to_string())
}

/// House numbers for the seeded addresses, just to vary the data.
fn id_hint(seen: &[i64]) -> usize {
    10 + seen.len() * 4
}
