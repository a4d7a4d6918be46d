//! crates/receipt_processor_core/src/validation.rs
//!
//! Checks an incoming receipt against the grammar and turns it into a
//! [`ValidatedReceipt`]. Checks run in a fixed order and stop at the first
//! violation.

use crate::domain::{Receipt, ValidatedItem, ValidatedReceipt};
use crate::grammar;

/// The first rule a rejected receipt broke.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    #[error("The receipt is invalid: {0}")]
    MalformedInput(String),
    #[error("The receipt is invalid: missing {0}")]
    MissingField(&'static str),
    #[error("The retailer name is invalid")]
    InvalidRetailer,
    #[error("The total is invalid")]
    InvalidTotal,
    #[error("The short description for item {index} is invalid")]
    InvalidItemDescription { index: usize },
    #[error("The price for item {index} is invalid")]
    InvalidItemPrice { index: usize },
    #[error("The purchase time is invalid")]
    InvalidTime,
    #[error("The purchase date is invalid")]
    InvalidDate,
}

impl Violation {
    /// A stable, machine-readable name for the violation kind.
    pub fn code(&self) -> &'static str {
        match self {
            Violation::MalformedInput(_) => "MalformedInput",
            Violation::MissingField(_) => "MissingField",
            Violation::InvalidRetailer => "InvalidRetailer",
            Violation::InvalidTotal => "InvalidTotal",
            Violation::InvalidItemDescription { .. } => "InvalidItemDescription",
            Violation::InvalidItemPrice { .. } => "InvalidItemPrice",
            Violation::InvalidTime => "InvalidTime",
            Violation::InvalidDate => "InvalidDate",
        }
    }
}

/// Validates a receipt, returning the parsed form or the first violation.
///
/// Order: required fields, retailer, total, items (description then price,
/// item by item), purchase time, purchase date.
pub fn validate(receipt: &Receipt) -> Result<ValidatedReceipt, Violation> {
    check_required(receipt)?;

    if !grammar::is_valid_retailer(&receipt.retailer) {
        return Err(Violation::InvalidRetailer);
    }

    let total = grammar::parse_money(&receipt.total).ok_or(Violation::InvalidTotal)?;

    let items = receipt
        .items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            if !grammar::is_valid_description(&item.short_description) {
                return Err(Violation::InvalidItemDescription { index });
            }
            let price =
                grammar::parse_money(&item.price).ok_or(Violation::InvalidItemPrice { index })?;
            Ok(ValidatedItem {
                short_description: item.short_description.clone(),
                price,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let purchase_time = grammar::parse_time(&receipt.purchase_time).ok_or(Violation::InvalidTime)?;
    let purchase_date = grammar::parse_date(&receipt.purchase_date).ok_or(Violation::InvalidDate)?;

    Ok(ValidatedReceipt {
        receipt: receipt.clone(),
        purchase_date,
        purchase_time,
        items,
        total,
    })
}

fn check_required(receipt: &Receipt) -> Result<(), Violation> {
    let fields = [
        ("retailer", receipt.retailer.is_empty()),
        ("purchaseDate", receipt.purchase_date.is_empty()),
        ("purchaseTime", receipt.purchase_time.is_empty()),
        ("items", receipt.items.is_empty()),
        ("total", receipt.total.is_empty()),
    ];
    match fields.into_iter().find(|(_, missing)| *missing) {
        Some((name, _)) => Err(Violation::MissingField(name)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Cents, Item};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn item(description: &str, price: &str) -> Item {
        Item {
            short_description: description.to_string(),
            price: price.to_string(),
        }
    }

    fn store_receipt() -> Receipt {
        Receipt {
            retailer: "Store".to_string(),
            purchase_date: "2022-01-01".to_string(),
            purchase_time: "14:00".to_string(),
            items: vec![item("Mountain Dew 12PK", "6.49")],
            total: "10.00".to_string(),
        }
    }

    #[test]
    fn accepts_a_well_formed_receipt() {
        let validated = validate(&store_receipt()).unwrap();
        assert_eq!(validated.total(), Cents(1000));
        assert_eq!(validated.items()[0].price, Cents(649));
        assert_eq!(validated.receipt(), &store_receipt());
    }

    #[test]
    fn empty_receipt_is_missing_fields() {
        assert_eq!(
            validate(&Receipt::default()),
            Err(Violation::MissingField("retailer"))
        );
    }

    #[test]
    fn empty_items_is_missing_field() {
        let mut receipt = store_receipt();
        receipt.items.clear();
        assert_eq!(validate(&receipt), Err(Violation::MissingField("items")));
    }

    #[test]
    fn rejection_scenarios() {
        let cases: [(fn(&mut Receipt), &str); 6] = [
            (|r| r.retailer = "Invalid@".into(), "InvalidRetailer"),
            (|r| r.purchase_date = "01-01-2022".into(), "InvalidDate"),
            (|r| r.purchase_time = "1400".into(), "InvalidTime"),
            (
                |r| r.items[0].short_description = "Mountain@ Dew 12PK".into(),
                "InvalidItemDescription",
            ),
            (|r| r.items[0].price = "649".into(), "InvalidItemPrice"),
            (|r| r.total = "1000".into(), "InvalidTotal"),
        ];
        for (mutate, expected) in cases {
            let mut receipt = store_receipt();
            mutate(&mut receipt);
            let err = validate(&receipt).unwrap_err();
            assert_eq!(err.code(), expected, "{receipt:?}");
        }
    }

    #[test]
    fn reports_only_the_first_violation() {
        let mut receipt = store_receipt();
        receipt.retailer = "Bad@".into();
        receipt.total = "nope".into();
        receipt.purchase_date = "2022-02-30".into();
        assert_eq!(validate(&receipt), Err(Violation::InvalidRetailer));
    }

    #[test]
    fn time_is_checked_before_date() {
        let mut receipt = store_receipt();
        receipt.purchase_time = "25:00".into();
        receipt.purchase_date = "2022-02-30".into();
        assert_eq!(validate(&receipt), Err(Violation::InvalidTime));
    }

    #[test]
    fn items_are_checked_in_order() {
        let mut receipt = store_receipt();
        receipt.items = vec![
            item("Fine", "1.00"),
            item("Also fine", "1.0"),
            item("Bad!", "1.00"),
        ];
        assert_eq!(
            validate(&receipt),
            Err(Violation::InvalidItemPrice { index: 1 })
        );
    }

    #[test]
    fn description_is_checked_before_price() {
        let mut receipt = store_receipt();
        receipt.items = vec![item("Bad!", "bad")];
        assert_eq!(
            validate(&receipt),
            Err(Violation::InvalidItemDescription { index: 0 })
        );
    }

    #[test]
    fn rejects_impossible_calendar_dates() {
        let mut receipt = store_receipt();
        receipt.purchase_date = "2023-02-29".into();
        assert_eq!(validate(&receipt), Err(Violation::InvalidDate));
        receipt.purchase_date = "2024-02-29".into();
        assert!(validate(&receipt).is_ok());
    }

    proptest! {
        #[test]
        fn validation_is_idempotent(
            retailer in "[A-Za-z0-9 &-]{1,20}",
            cents in 0u64..1_000_000,
            day in 1u32..=28,
            hour in 0u32..24,
        ) {
            let receipt = Receipt {
                retailer,
                purchase_date: format!("2022-05-{day:02}"),
                purchase_time: format!("{hour:02}:30"),
                items: vec![item("Widget", &Cents(cents).to_string())],
                total: Cents(cents).to_string(),
            };
            let first = validate(&receipt);
            let second = validate(&receipt);
            prop_assert!(first.is_ok());
            prop_assert_eq!(first, second);
        }
    }
}
