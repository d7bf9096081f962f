//! Calendar-date parsing for the `YYYY-MM-DD` entry format.

use chrono::{Local, NaiveDate};

use crate::errors::LedgerError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a date string leniently: empty or malformed input yields `None`.
pub fn parse_iso(date: &str) -> Option<NaiveDate> {
    let trimmed = date.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).ok()
}

pub fn today_iso() -> String {
    Local::now().date_naive().format(DATE_FORMAT).to_string()
}

/// Validates a user-entered transaction date. Empty input defaults to the
/// current calendar date; anything else must parse as `YYYY-MM-DD`.
pub fn resolve_entry_date(date: &str) -> Result<String, LedgerError> {
    let trimmed = date.trim();
    if trimmed.is_empty() {
        return Ok(today_iso());
    }
    if parse_iso(trimmed).is_none() {
        return Err(LedgerError::InvalidDate);
    }
    Ok(trimmed.to_string())
}
