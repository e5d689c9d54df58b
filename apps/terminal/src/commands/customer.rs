//! # Customer Commands
//!
//! Registration collects the eight named fields into a [`NewCustomer`] and
//! inserts it in one statement. Nothing is validated beyond trimming; the
//! fields are stored as entered. On success the generated identifier is
//! reported; on a database error the operation aborts with nothing stored.

use tracing::debug;

use storefront_core::NewCustomer;
use storefront_db::Database;

use crate::error::AppResult;
use crate::prompt;

/// Registers a new customer from prompted fields.
pub async fn register(db: &Database) -> AppResult<()> {
    println!("[ Registering New Customer ]");

    let customer = NewCustomer {
        first_name: prompt::line("First name: ")?,
        surname: prompt::line("Surname: ")?,
        email_address: prompt::line("Email: ")?,
        home_address: prompt::line("Home address: ")?,
        area_code: prompt::line("Area code: ")?,
        prefix: prompt::line("Phone prefix: ")?,
        line_number: prompt::line("Line number: ")?,
        membership: prompt::line("Membership level: ")?,
    };
    debug!(surname = %customer.surname, "register command");

    let id = db.customers().insert(&customer).await?;
    println!("✔ Customer registered successfully. Assigned customer ID: {id}");

    Ok(())
}
