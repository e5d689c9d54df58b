//! # Order Commands
//!
//! Placing an order snapshots the customer's open basket into a transaction
//! and closes the basket, atomically (see `storefront-db`'s order
//! repository). History joins transactions to customers, line items and
//! products and prints one line per (transaction, product line) pair; all
//! matching rows are fetched, with no paging.

use tracing::debug;

use storefront_db::Database;

use crate::error::AppResult;
use crate::prompt;

/// Places an order from the customer's open basket.
pub async fn place(db: &Database) -> AppResult<()> {
    println!("[ Place Order ]");

    let customer_id = prompt::integer("Customer ID: ")?;

    let Some(basket) = db.baskets().find_open(customer_id).await? else {
        println!("✖ No active basket found.");
        return Ok(());
    };

    let credit_card = prompt::line("Credit card number: ")?;
    debug!(customer_id, "place command");

    let transact_id = db.orders().place(&basket, &credit_card).await?;
    println!(
        "✔ Order placed successfully. Transaction ID: {transact_id} ({} for {} items)",
        basket.total_amount(),
        basket.quantity_items
    );

    Ok(())
}

/// Prints transaction history, optionally filtered to one customer.
///
/// Empty input skips the filter: every transaction of every customer is
/// returned.
pub async fn history(db: &Database) -> AppResult<()> {
    println!("[ Transaction History ]");

    let filter = prompt::optional_integer("Customer ID (blank for all): ")?;
    debug!(?filter, "history command");

    let entries = db.orders().history(filter).await?;
    if entries.is_empty() {
        println!("✖ No matching transactions found.");
        return Ok(());
    }

    for entry in entries {
        println!(
            "#{:<6} {:<22} {:<28} x{:<4} {:>9}  {}  {}",
            entry.transact_id,
            format!("{} {}", entry.first_name, entry.surname),
            entry.product_name,
            entry.quantity_product,
            entry.final_price().to_string(),
            entry.transact_date.format("%Y-%m-%d"),
            entry.delivery_status()
        );
    }

    Ok(())
}
