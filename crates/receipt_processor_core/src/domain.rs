//! crates/receipt_processor_core/src/domain.rs
//!
//! Defines the pure, core data structures for the receipt processor.
//! These structs are independent of any storage or serialization format.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use std::fmt;
use std::str::FromStr;

/// One purchased line entry, exactly as submitted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Item {
    pub short_description: String,
    pub price: String,
}

/// A submitted receipt document, exactly as submitted.
///
/// Every field is kept as the raw string the client sent. Nothing here has
/// been checked; see [`crate::validation::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Receipt {
    pub retailer: String,
    pub purchase_date: String,
    pub purchase_time: String,
    pub items: Vec<Item>,
    pub total: String,
}

/// A currency amount as a whole number of cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cents(pub u64);

impl Cents {
    pub fn is_whole_dollars(self) -> bool {
        self.0 % 100 == 0
    }

    pub fn is_multiple_of_quarter(self) -> bool {
        self.0 % 25 == 0
    }
}

impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// An item whose price has been parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedItem {
    pub short_description: String,
    pub price: Cents,
}

/// A receipt that passed every grammar and structural check.
///
/// Only [`crate::validation::validate`] can build one, so holding a
/// `ValidatedReceipt` proves the fields are well-formed. The parsed values
/// are kept next to the original document so scoring never re-parses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedReceipt {
    pub(crate) receipt: Receipt,
    pub(crate) purchase_date: NaiveDate,
    pub(crate) purchase_time: NaiveTime,
    pub(crate) items: Vec<ValidatedItem>,
    pub(crate) total: Cents,
}

impl ValidatedReceipt {
    pub fn receipt(&self) -> &Receipt {
        &self.receipt
    }

    pub fn retailer(&self) -> &str {
        &self.receipt.retailer
    }

    pub fn purchase_date(&self) -> NaiveDate {
        self.purchase_date
    }

    pub fn purchase_time(&self) -> NaiveTime {
        self.purchase_time
    }

    pub fn items(&self) -> &[ValidatedItem] {
        &self.items
    }

    pub fn total(&self) -> Cents {
        self.total
    }

    /// Gives back the original document, dropping the parsed values.
    pub fn into_receipt(self) -> Receipt {
        self.receipt
    }
}

/// Opaque identifier handed out for a stored receipt.
///
/// Rendered as a decimal string. Ids come from a counter and are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReceiptId(u64);

impl ReceiptId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }

    /// The id that follows this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for ReceiptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a receipt id")]
pub struct MalformedReceiptId(pub String);

impl FromStr for ReceiptId {
    type Err = MalformedReceiptId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // u64::from_str accepts a leading '+', ids never carry one.
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(MalformedReceiptId(s.to_string()));
        }
        s.parse::<u64>()
            .map(Self)
            .map_err(|_| MalformedReceiptId(s.to_string()))
    }
}

/// The stored association of an id, the original receipt and its points.
#[derive(Debug, Clone)]
pub struct ScoredReceipt {
    pub id: ReceiptId,
    pub receipt: Receipt,
    pub points: u64,
    pub processed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cents_display_pads_fraction() {
        assert_eq!(Cents(905).to_string(), "9.05");
        assert_eq!(Cents(1000).to_string(), "10.00");
        assert_eq!(Cents(7).to_string(), "0.07");
    }

    #[test]
    fn receipt_id_parses_only_plain_digits() {
        assert_eq!("0".parse::<ReceiptId>(), Ok(ReceiptId::new(0)));
        assert_eq!("42".parse::<ReceiptId>(), Ok(ReceiptId::new(42)));
        assert!("".parse::<ReceiptId>().is_err());
        assert!("+1".parse::<ReceiptId>().is_err());
        assert!("-1".parse::<ReceiptId>().is_err());
        assert!("invalid-id".parse::<ReceiptId>().is_err());
        assert!("99999999999999999999999".parse::<ReceiptId>().is_err());
    }

    #[test]
    fn receipt_id_round_trips_through_display() {
        let id = ReceiptId::new(17).next();
        assert_eq!(id.to_string().parse::<ReceiptId>(), Ok(id));
    }
}
