//! crates/receipt_processor_core/src/ports.rs
//!
//! Defines the service contracts (traits) the core expects from the outside
//! world. Storage is injected through these traits, the core never owns a
//! global map or counter.

use crate::domain::{Receipt, ReceiptId, ScoredReceipt};
use async_trait::async_trait;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait ReceiptStore: Send + Sync {
    /// Stores a scored receipt under a freshly assigned id.
    ///
    /// Assigning the id and inserting the record must happen as one atomic
    /// step: two concurrent calls never observe or hand out the same id.
    async fn put(&self, receipt: Receipt, points: u64) -> PortResult<ScoredReceipt>;

    /// Looks up a previously stored receipt.
    async fn get(&self, id: ReceiptId) -> PortResult<ScoredReceipt>;
}
