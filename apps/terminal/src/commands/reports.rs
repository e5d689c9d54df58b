//! # Report Commands
//!
//! The five statistics handlers. Each prompts for an inclusive start/end
//! date pair, runs one aggregate query, and prints the result rows. The
//! date strings go to the engine as typed; a malformed or empty range just
//! matches nothing.

use tracing::debug;

use storefront_db::Database;

use crate::error::AppResult;
use crate::prompt;

const NO_ROWS: &str = "(no matching records)";

/// Top 10 customers by total spend in the range.
pub async fn top_customers(db: &Database) -> AppResult<()> {
    println!("[ Top 10 Customers by Spending ]");
    let range = prompt::date_range()?;
    debug!(?range, "top_customers report");

    let rows = db.reports().top_customers(&range).await?;
    if rows.is_empty() {
        println!("{NO_ROWS}");
        return Ok(());
    }

    for row in rows {
        println!(
            "  {:<26} {:>10}",
            format!("{} {}", row.first_name, row.surname),
            row.total_spent().to_string()
        );
    }
    Ok(())
}

/// Units sold per product in the range, most sold first.
pub async fn frequent_products(db: &Database) -> AppResult<()> {
    println!("[ Most Frequently Sold Products ]");
    let range = prompt::date_range()?;
    debug!(?range, "frequent_products report");

    let rows = db.reports().frequent_products(&range).await?;
    if rows.is_empty() {
        println!("{NO_ROWS}");
        return Ok(());
    }

    for row in rows {
        println!("  {:>4}  {:<28} {:>6} sold", row.product_id, row.name, row.total_quantity);
    }
    Ok(())
}

/// Distinct buyers per product in the range, widest reach first.
pub async fn unique_buyers(db: &Database) -> AppResult<()> {
    println!("[ Products Sold to Most Unique Customers ]");
    let range = prompt::date_range()?;
    debug!(?range, "unique_buyers report");

    let rows = db.reports().products_by_unique_buyers(&range).await?;
    if rows.is_empty() {
        println!("{NO_ROWS}");
        return Ok(());
    }

    for row in rows {
        println!("  {:>4}  {:<28} {:>6} buyers", row.product_id, row.name, row.buyer_count);
    }
    Ok(())
}

/// Top 5 shipping zip codes by shipment count in the range.
pub async fn top_zip_codes(db: &Database) -> AppResult<()> {
    println!("[ Top 5 Zip Codes by Shipments ]");
    let range = prompt::date_range()?;
    debug!(?range, "top_zip_codes report");

    let rows = db.reports().top_zip_codes(&range).await?;
    if rows.is_empty() {
        println!("{NO_ROWS}");
        return Ok(());
    }

    for row in rows {
        println!("  {:<10} {:>6} shipments", row.zip_code, row.shipments);
    }
    Ok(())
}

/// Average per-unit selling price per product type in the range.
pub async fn average_price_by_type(db: &Database) -> AppResult<()> {
    println!("[ Average Selling Price per Product Type ]");
    let range = prompt::date_range()?;
    debug!(?range, "average_price_by_type report");

    let rows = db.reports().average_price_by_type(&range).await?;
    if rows.is_empty() {
        println!("{NO_ROWS}");
        return Ok(());
    }

    for row in rows {
        println!("  {:<16} ${:.2}", row.product_type, row.average_price);
    }
    Ok(())
}
