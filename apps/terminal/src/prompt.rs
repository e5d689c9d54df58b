//! # Prompt Helpers
//!
//! Line-oriented input: print a label, flush, read one line, trim.
//!
//! Every prompt distinguishes three outcomes:
//! - a line was read (possibly empty after trimming)
//! - stdin is exhausted ([`AppError::InputExhausted`], clean shutdown)
//! - the terminal failed ([`AppError::Io`], fatal)
//!
//! Numeric prompts add a fourth: the line did not parse
//! ([`AppError::Input`], fatal by design; see `error.rs`).

use std::io::{self, BufRead, Write};

use storefront_db::DateRange;

use crate::error::{AppError, AppResult};

/// Prints a label and reads one trimmed line from stdin.
pub fn line(label: &str) -> AppResult<String> {
    print!("{label}");
    io::stdout().flush()?;

    let mut buffer = String::new();
    let read = io::stdin().lock().read_line(&mut buffer)?;
    if read == 0 {
        return Err(AppError::InputExhausted);
    }

    Ok(buffer.trim().to_string())
}

/// Reads a line that must parse as an integer.
pub fn integer(label: &str) -> AppResult<i64> {
    let raw = line(label)?;
    parse_integer(&raw)
}

/// Reads a line that may be empty (None) or must parse as an integer.
pub fn optional_integer(label: &str) -> AppResult<Option<i64>> {
    let raw = line(label)?;
    if raw.is_empty() {
        Ok(None)
    } else {
        parse_integer(&raw).map(Some)
    }
}

/// Reads the inclusive start/end date pair used by every report.
///
/// The strings go to the query engine as typed; no validation here.
pub fn date_range() -> AppResult<DateRange> {
    let start = line("Start date [YYYY-MM-DD]: ")?;
    let end = line("End date [YYYY-MM-DD]: ")?;
    Ok(DateRange::new(start, end))
}

fn parse_integer(raw: &str) -> AppResult<i64> {
    raw.parse::<i64>()
        .map_err(|_| AppError::Input(format!("expected a whole number, got '{raw}'")))
}
