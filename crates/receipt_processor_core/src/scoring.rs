//! crates/receipt_processor_core/src/scoring.rs
//!
//! Derives the point total for a validated receipt. Seven independent rules
//! each contribute a non-negative amount and the score is their sum.

use crate::domain::ValidatedReceipt;
use chrono::{Datelike, Timelike};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// +1 per letter or digit in the retailer name.
    RetailerName,
    /// +50 when the total has no cents.
    RoundTotal,
    /// +25 when the total is a multiple of 0.25.
    QuarterTotal,
    /// +5 per two items.
    ItemPairs,
    /// ceil(0.2 * price) per item whose trimmed description length is a multiple
    /// of 3. A whitespace-only description trims to length 0 and counts.
    ItemDescriptions,
    /// +6 when the purchase day is odd.
    OddPurchaseDay,
    /// +10 when purchased after 14:00 and before 16:00.
    AfternoonPurchase,
}

impl Rule {
    pub const ALL: [Rule; 7] = [
        Rule::RetailerName,
        Rule::RoundTotal,
        Rule::QuarterTotal,
        Rule::ItemPairs,
        Rule::ItemDescriptions,
        Rule::OddPurchaseDay,
        Rule::AfternoonPurchase,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Rule::RetailerName => "retailer name",
            Rule::RoundTotal => "round total",
            Rule::QuarterTotal => "quarter total",
            Rule::ItemPairs => "item pairs",
            Rule::ItemDescriptions => "item descriptions",
            Rule::OddPurchaseDay => "odd purchase day",
            Rule::AfternoonPurchase => "afternoon purchase",
        }
    }

    /// Points this rule awards for `receipt`.
    pub fn apply(self, receipt: &ValidatedReceipt) -> u64 {
        match self {
            Rule::RetailerName => receipt
                .retailer()
                .chars()
                .filter(|c| c.is_alphanumeric())
                .count() as u64,
            Rule::RoundTotal => {
                if receipt.total().is_whole_dollars() {
                    50
                } else {
                    0
                }
            }
            Rule::QuarterTotal => {
                if receipt.total().is_multiple_of_quarter() {
                    25
                } else {
                    0
                }
            }
            Rule::ItemPairs => 5 * (receipt.items().len() as u64 / 2),
            Rule::ItemDescriptions => receipt
                .items()
                .iter()
                .filter(|item| {
                    let len = item.short_description.trim().chars().count();
                    len % 3 == 0
                })
                // 0.2 * price rounded up, in whole cents: ceil(cents / 500).
                .map(|item| item.price.0.div_ceil(500))
                .sum(),
            Rule::OddPurchaseDay => {
                if receipt.purchase_date().day() % 2 == 1 {
                    6
                } else {
                    0
                }
            }
            Rule::AfternoonPurchase => {
                let time = receipt.purchase_time();
                let (hour, minute) = (time.hour(), time.minute());
                if (hour == 14 && minute > 0) || hour == 15 {
                    10
                } else {
                    0
                }
            }
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-rule contributions, in [`Rule::ALL`] order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointsBreakdown {
    pub contributions: Vec<(Rule, u64)>,
}

impl PointsBreakdown {
    pub fn total(&self) -> u64 {
        self.contributions.iter().map(|(_, points)| points).sum()
    }

    pub fn points_for(&self, rule: Rule) -> u64 {
        self.contributions
            .iter()
            .find(|(r, _)| *r == rule)
            .map_or(0, |(_, points)| *points)
    }
}

impl fmt::Display for PointsBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .contributions
            .iter()
            .filter(|(_, points)| *points > 0)
            .map(|(rule, points)| format!("{rule} +{points}"))
            .collect();
        if parts.is_empty() {
            write!(f, "no rules matched")
        } else {
            write!(f, "{}", parts.join(", "))
        }
    }
}

pub fn breakdown(receipt: &ValidatedReceipt) -> PointsBreakdown {
    PointsBreakdown {
        contributions: Rule::ALL
            .iter()
            .map(|rule| (*rule, rule.apply(receipt)))
            .collect(),
    }
}

/// Computes the points for a validated receipt.
pub fn score(receipt: &ValidatedReceipt) -> u64 {
    Rule::ALL.iter().map(|rule| rule.apply(receipt)).sum()
}
