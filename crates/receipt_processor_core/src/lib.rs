pub mod domain;
pub mod grammar;
pub mod ports;
pub mod scoring;
pub mod validation;

pub use domain::{
    Cents, Item, MalformedReceiptId, Receipt, ReceiptId, ScoredReceipt, ValidatedItem,
    ValidatedReceipt,
};
pub use ports::{PortError, PortResult, ReceiptStore};
pub use scoring::{breakdown, score, PointsBreakdown, Rule};
pub use validation::{validate, Violation};
