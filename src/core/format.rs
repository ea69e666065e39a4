//! Canonical text forms for amounts, dates and tax identifiers.
//!
//! Formatting is locale-independent: `.` as decimal point, no digit
//! grouping. All monetary rounding is half away from zero.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use super::error::InvoiceError;

/// Fractional digits kept for unit prices and quantities.
pub const MAX_PRICE_SCALE: u32 = 8;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const DATETIME_UTC_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// NIP checksum weights over the first nine digits.
const NIP_WEIGHTS: [u32; 9] = [6, 5, 7, 2, 3, 4, 5, 6, 7];

/// Round to `dp` fractional digits, half away from zero (0.005 → 0.01).
pub fn round_half_away(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Round a monetary amount to grosze.
pub fn round_amount(value: Decimal) -> Decimal {
    round_half_away(value, 2)
}

/// Monetary total with exactly two fractional digits.
pub fn format_amount(value: Decimal) -> String {
    let mut rounded = round_amount(value);
    rounded.rescale(2);
    rounded.to_string()
}

/// Unit price: up to eight fractional digits, trailing zeros trimmed to two.
///
/// `10.50000000` → `"10.50"`, `0.12345678` → `"0.12345678"`.
pub fn format_price(value: Decimal) -> String {
    trimmed(value, 2)
}

/// Quantity: up to eight fractional digits, trailing zeros trimmed away.
///
/// `3.00000000` → `"3"`, `2.5` → `"2.5"`.
pub fn format_quantity(value: Decimal) -> String {
    trimmed(value, 0)
}

fn trimmed(value: Decimal, min_scale: u32) -> String {
    let mut d = round_half_away(value, MAX_PRICE_SCALE).normalize();
    if d.scale() < min_scale {
        d.rescale(min_scale);
    }
    d.to_string()
}

/// Parse a decimal written with `.` as the separator.
pub fn parse_amount(text: &str) -> Result<Decimal, InvoiceError> {
    Decimal::from_str(text.trim())
        .map_err(|e| InvoiceError::Format(format!("invalid amount '{text}': {e}")))
}

/// `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_date(text: &str) -> Result<NaiveDate, InvoiceError> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
        .map_err(|e| InvoiceError::Format(format!("invalid date '{text}': {e}")))
}

/// `YYYY-MM-DDTHH:MM:SS`, no zone designator.
pub fn format_datetime(value: NaiveDateTime) -> String {
    value.format(DATETIME_FORMAT).to_string()
}

/// `YYYY-MM-DDTHH:MM:SSZ`, for elements the schema requires in UTC.
pub fn format_datetime_utc(value: DateTime<Utc>) -> String {
    value.format(DATETIME_UTC_FORMAT).to_string()
}

/// Parse a timestamp into UTC.
///
/// Accepts RFC 3339 (with `Z` or an offset, optional fractions) and a bare
/// `YYYY-MM-DDTHH:MM:SS`, which is taken as UTC.
pub fn parse_datetime(text: &str) -> Result<DateTime<Utc>, InvoiceError> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(text, DATETIME_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f"))
        .map(|naive| naive.and_utc())
        .map_err(|e| InvoiceError::Format(format!("invalid timestamp '{text}': {e}")))
}

/// Strip everything but ASCII digits ("526-025-02-74" → "5260250274").
pub fn normalize_nip(nip: &str) -> String {
    nip.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Modulo-11 checksum check of a NIP.
///
/// Separators are ignored. Never fails: anything that is not ten digits
/// after normalization is simply invalid.
pub fn is_valid_nip(nip: &str) -> bool {
    let digits: Vec<u32> = normalize_nip(nip)
        .chars()
        .filter_map(|c| c.to_digit(10))
        .collect();
    if digits.len() != 10 {
        return false;
    }
    let sum: u32 = digits
        .iter()
        .zip(NIP_WEIGHTS.iter())
        .map(|(d, w)| d * w)
        .sum();
    let check = match sum % 11 {
        10 => 0,
        c => c,
    };
    check == digits[9]
}
