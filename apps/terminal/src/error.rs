//! # Terminal Application Errors
//!
//! Unified error type for the menu loop and command handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Storefront                             │
//! │                                                                         │
//! │  Command handler                                                        │
//! │  Result<(), AppError>                                                   │
//! │       │                                                                 │
//! │       ├── Db(..)            → print message, menu loop continues        │
//! │       │                                                                 │
//! │       ├── Input(..)         → FATAL: a value that had to parse as a     │
//! │       │                       number did not; propagates out of the     │
//! │       │                       menu loop and aborts the program          │
//! │       │                                                                 │
//! │       ├── InputExhausted    → stdin closed; behaves like the exit       │
//! │       │                       command (clean shutdown)                  │
//! │       │                                                                 │
//! │       └── Io(..)            → FATAL: the terminal itself failed         │
//! │                                                                         │
//! │  "No open basket" and "no matching records" are not errors at all:      │
//! │  they are ordinary reported outcomes (Option / empty result sets).      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use storefront_db::DbError;

/// Errors surfaced by the terminal application.
#[derive(Debug, Error)]
pub enum AppError {
    /// A database operation failed. Recoverable: the message is printed and
    /// the menu loop continues.
    #[error("{0}")]
    Db(#[from] DbError),

    /// Input that had to parse as a number did not. Not recovered; aborts
    /// the whole program.
    #[error("invalid input: {0}")]
    Input(String),

    /// Stdin reached end of file. Treated like the exit command.
    #[error("input exhausted")]
    InputExhausted,

    /// The terminal itself failed (stdout/stdin error). Not recovered.
    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Whether this error aborts the program instead of returning to the
    /// menu.
    pub fn is_fatal(&self) -> bool {
        matches!(self, AppError::Input(_) | AppError::Io(_))
    }
}

/// Result type for terminal operations.
pub type AppResult<T> = Result<T, AppError>;
