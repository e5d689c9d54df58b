//! # Basket Commands
//!
//! Adding a product first lists the whole catalog as a reference, then
//! prompts for customer, product and quantity.
//!
//! ## Outcomes
//! ```text
//! no open basket  → reported, nothing written (baskets are never created
//!                   implicitly)
//! unknown product → reported, nothing written
//! line inserted   → price snapshot taken, basket totals folded forward
//! insert fails    → database error reported by the menu loop
//! ```

use tracing::debug;

use storefront_db::Database;

use crate::error::AppResult;
use crate::prompt;

/// Adds a product to the customer's open basket.
pub async fn add_product(db: &Database) -> AppResult<()> {
    println!("[ Add Item to Basket ]");

    println!("Available products:");
    for product in db.products().list_all().await? {
        println!(
            "  {:>4}  {:<28} {:>8}",
            product.product_id,
            product.name,
            product.price().to_string()
        );
    }

    let customer_id = prompt::integer("Customer ID: ")?;
    let product_id = prompt::integer("Product ID: ")?;
    let quantity = prompt::integer("Quantity: ")?;
    debug!(customer_id, product_id, quantity, "add_product command");

    let Some(basket) = db.baskets().find_open(customer_id).await? else {
        println!("✖ No open basket found.");
        return Ok(());
    };

    let Some(product) = db.products().get_by_id(product_id).await? else {
        println!("✖ No such product: {product_id}");
        return Ok(());
    };

    db.baskets().add_line(&basket, &product, quantity).await?;
    println!("✔ Product added to basket.");

    Ok(())
}
