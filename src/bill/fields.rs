//! Parsing of the amount and date form fields.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::error::{Error, Result};

/// Date format accepted for bills.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

fn date_shape() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date regex"))
}

/// Parse a bill amount. Only whole numbers are accepted.
pub fn parse_amount(input: &str) -> Result<i64> {
    input
        .trim()
        .parse::<i64>()
        .map_err(|_| Error::InvalidAmount(input.to_string()))
}

/// Parse a bill date in `YYYY-MM-DD` form.
///
/// The shape is checked before chrono sees it, since `%m` and `%d` would
/// otherwise also accept single digits.
pub fn parse_bill_date(input: &str) -> Result<NaiveDate> {
    let input = input.trim();
    if !date_shape().is_match(input) {
        return Err(Error::InvalidDate(input.to_string()));
    }

    NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|_| Error::InvalidDate(input.to_string()))
}
