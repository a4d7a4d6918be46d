//! crates/receipt_processor_core/src/grammar.rs
//!
//! The fixed grammar every receipt field must match, plus the parsers that
//! turn matching strings into typed values.
//!
//! The patterns are public so other collaborators can validate with exactly
//! the same rules.

use crate::domain::Cents;
use chrono::{NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

/// Letters, digits, whitespace, `-` and `&`.
///
/// `\w` is Unicode-aware: besides letters and digits it accepts combining
/// marks and connector punctuation, so `_` is allowed.
pub const RETAILER_PATTERN: &str = r"^[\w\s\-&]+$";

/// Letters, digits, whitespace and `-`. Same `\w` class as the retailer, `_` included.
pub const DESCRIPTION_PATTERN: &str = r"^[\w\s\-]+$";

/// One or more ASCII digits, a dot, exactly two ASCII digits.
pub const MONEY_PATTERN: &str = r"^[0-9]+\.[0-9]{2}$";

/// ISO `YYYY-MM-DD`.
pub const DATE_PATTERN: &str = r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$";

/// 24-hour `HH:MM`.
pub const TIME_PATTERN: &str = r"^[0-9]{2}:[0-9]{2}$";

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

static RETAILER_RE: Lazy<Regex> = Lazy::new(|| compile(RETAILER_PATTERN));
static DESCRIPTION_RE: Lazy<Regex> = Lazy::new(|| compile(DESCRIPTION_PATTERN));
static MONEY_RE: Lazy<Regex> = Lazy::new(|| compile(MONEY_PATTERN));
static DATE_RE: Lazy<Regex> = Lazy::new(|| compile(DATE_PATTERN));
static TIME_RE: Lazy<Regex> = Lazy::new(|| compile(TIME_PATTERN));

// The patterns are constants, `patterns_compile` below keeps them honest.
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("grammar pattern must compile")
}

pub fn is_valid_retailer(s: &str) -> bool {
    RETAILER_RE.is_match(s)
}

pub fn is_valid_description(s: &str) -> bool {
    DESCRIPTION_RE.is_match(s)
}

/// Parses a `G_money` string into cents.
///
/// Returns `None` when the string does not match the grammar or the amount
/// does not fit in a `u64` number of cents.
pub fn parse_money(s: &str) -> Option<Cents> {
    if !MONEY_RE.is_match(s) {
        return None;
    }
    let (dollars, cents) = s.split_once('.')?;
    let dollars: u64 = dollars.parse().ok()?;
    let cents: u64 = cents.parse().ok()?;
    dollars.checked_mul(100)?.checked_add(cents).map(Cents)
}

/// Parses `HH:MM` into a real time of day (00:00 through 23:59).
pub fn parse_time(s: &str) -> Option<NaiveTime> {
    if !TIME_RE.is_match(s) {
        return None;
    }
    NaiveTime::parse_from_str(s, TIME_FORMAT).ok()
}

/// Parses `YYYY-MM-DD` into a real calendar date, leap years included.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    if !DATE_RE.is_match(s) {
        return None;
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}
