//! # Menu Controller
//!
//! Two nested single-threaded loops: the main menu and the statistics
//! submenu. Each reads one line, trims and uppercases it, and dispatches on
//! an exact single-character match; anything else reprints the menu with an
//! error.
//!
//! ## Control Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Main Menu                                                              │
//! │  [A] Register customer     ──► commands::customer::register             │
//! │  [B] Add product to basket ──► commands::basket::add_product            │
//! │  [C] Place order           ──► commands::order::place                   │
//! │  [D] Transaction history   ──► commands::order::history                 │
//! │  [E] Statistics ──┐                                                     │
//! │  [X] Exit         │                                                     │
//! │                   ▼                                                     │
//! │  Statistics Submenu                                                     │
//! │  [A] Most frequently sold products                                      │
//! │  [B] Products sold to most unique customers                             │
//! │  [C] Top 10 customers by spending                                       │
//! │  [D] Top 5 zip codes by shipments                                       │
//! │  [E] Average price per product type                                     │
//! │  [X] Return to main menu                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! One command is fully processed, prompts and database round trips
//! included, before the next line is read. Database errors are printed and
//! the loop continues; fatal errors propagate to `main`. Exhausted stdin
//! behaves like the exit command at any level.

use storefront_db::Database;
use tracing::debug;

use crate::commands;
use crate::error::{AppError, AppResult};
use crate::prompt;

const MAIN_MENU: &str = "\
═══════════════════════════════════
  STOREFRONT MENU
═══════════════════════════════════
  [A] Register a new customer
  [B] Add product to basket
  [C] Place order
  [D] View transaction history
  [E] View statistics
  [X] Exit
═══════════════════════════════════";

const STATS_MENU: &str = "\
═══════════════════════════════════
  STATISTICS SUBMENU
═══════════════════════════════════
  [A] Most frequently sold products
  [B] Products sold to most unique customers
  [C] Top 10 customers by spending
  [D] Top 5 zip codes by shipments
  [E] Average price per product type
  [X] Return to main menu
═══════════════════════════════════";

// =============================================================================
// Choices
// =============================================================================

/// Main menu commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainChoice {
    Register,
    AddToBasket,
    PlaceOrder,
    History,
    Statistics,
    Exit,
}

impl MainChoice {
    /// Parses one input line: trimmed, uppercased, exact single-character
    /// match. Returns None for anything else.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_uppercase().as_str() {
            "A" => Some(MainChoice::Register),
            "B" => Some(MainChoice::AddToBasket),
            "C" => Some(MainChoice::PlaceOrder),
            "D" => Some(MainChoice::History),
            "E" => Some(MainChoice::Statistics),
            "X" => Some(MainChoice::Exit),
            _ => None,
        }
    }
}

/// Statistics submenu commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsChoice {
    FrequentProducts,
    UniqueBuyers,
    TopCustomers,
    ZipCodes,
    AveragePrice,
    Back,
}

impl StatsChoice {
    /// Same parsing rules as [`MainChoice::parse`].
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_uppercase().as_str() {
            "A" => Some(StatsChoice::FrequentProducts),
            "B" => Some(StatsChoice::UniqueBuyers),
            "C" => Some(StatsChoice::TopCustomers),
            "D" => Some(StatsChoice::ZipCodes),
            "E" => Some(StatsChoice::AveragePrice),
            "X" => Some(StatsChoice::Back),
            _ => None,
        }
    }
}

// =============================================================================
// Loops
// =============================================================================

/// Runs the main menu until exit, exhausted input, or a fatal error.
pub async fn run(db: &Database) -> AppResult<()> {
    loop {
        println!("\n{MAIN_MENU}");

        let raw = match prompt::line("Select an option: ") {
            Ok(raw) => raw,
            Err(AppError::InputExhausted) => break,
            Err(err) => return Err(err),
        };

        let Some(choice) = MainChoice::parse(&raw) else {
            println!("Invalid selection. Try again.");
            continue;
        };
        debug!(?choice, "Dispatching main menu choice");

        let outcome = match choice {
            MainChoice::Register => commands::customer::register(db).await,
            MainChoice::AddToBasket => commands::basket::add_product(db).await,
            MainChoice::PlaceOrder => commands::order::place(db).await,
            MainChoice::History => commands::order::history(db).await,
            MainChoice::Statistics => statistics(db).await,
            MainChoice::Exit => break,
        };

        if handle_outcome(outcome)? {
            break;
        }
    }

    Ok(())
}

/// Runs the statistics submenu until return, exhausted input, or a fatal
/// error.
async fn statistics(db: &Database) -> AppResult<()> {
    loop {
        println!("\n{STATS_MENU}");

        // Exhausted input propagates as-is; the main loop turns it into a
        // clean shutdown
        let raw = prompt::line("Choose (A-E or X): ")?;

        let Some(choice) = StatsChoice::parse(&raw) else {
            println!("Invalid selection. Try again.");
            continue;
        };
        debug!(?choice, "Dispatching statistics choice");

        let outcome = match choice {
            StatsChoice::FrequentProducts => commands::reports::frequent_products(db).await,
            StatsChoice::UniqueBuyers => commands::reports::unique_buyers(db).await,
            StatsChoice::TopCustomers => commands::reports::top_customers(db).await,
            StatsChoice::ZipCodes => commands::reports::top_zip_codes(db).await,
            StatsChoice::AveragePrice => commands::reports::average_price_by_type(db).await,
            StatsChoice::Back => return Ok(()),
        };

        if let Err(err) = outcome {
            if err.is_fatal() || matches!(err, AppError::InputExhausted) {
                return Err(err);
            }
            println!("✖ Error: {err}");
        }
    }
}

/// Applies the per-operation error policy. Returns Ok(true) when the loop
/// should end cleanly (exhausted input).
fn handle_outcome(outcome: AppResult<()>) -> AppResult<bool> {
    match outcome {
        Ok(()) => Ok(false),
        Err(AppError::InputExhausted) => Ok(true),
        Err(err) if err.is_fatal() => Err(err),
        Err(err) => {
            println!("✖ Error: {err}");
            Ok(false)
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_db::DbError;

    #[test]
    fn test_main_choice_normalizes_case_and_whitespace() {
        assert_eq!(MainChoice::parse("a"), Some(MainChoice::Register));
        assert_eq!(MainChoice::parse("  B  "), Some(MainChoice::AddToBasket));
        assert_eq!(MainChoice::parse("x"), Some(MainChoice::Exit));
    }

    #[test]
    fn test_main_choice_rejects_everything_else() {
        for bad in ["", "AB", "1", "register", "?"] {
            assert_eq!(MainChoice::parse(bad), None, "{bad:?} must not dispatch");
        }
    }

    #[test]
    fn test_stats_choice_parse() {
        assert_eq!(StatsChoice::parse("e"), Some(StatsChoice::AveragePrice));
        assert_eq!(StatsChoice::parse("X"), Some(StatsChoice::Back));
        assert_eq!(StatsChoice::parse("y"), None);
    }

    #[test]
    fn test_outcome_policy() {
        // Success and recoverable database errors keep the loop running
        assert!(!handle_outcome(Ok(())).unwrap());
        let db_err = AppError::Db(DbError::QueryFailed("boom".to_string()));
        assert!(!handle_outcome(Err(db_err)).unwrap());

        // Exhausted input ends the loop cleanly
        assert!(handle_outcome(Err(AppError::InputExhausted)).unwrap());

        // Input-shape failures abort
        let fatal = AppError::Input("letters".to_string());
        assert!(handle_outcome(Err(fatal)).is_err());
    }
}
