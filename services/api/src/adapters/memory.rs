//! services/api/src/adapters/memory.rs
//!
//! The in-memory implementation of the `ReceiptStore` port. Receipts live for
//! the lifetime of the process; nothing is persisted or evicted.

use async_trait::async_trait;
use chrono::Utc;
use receipt_processor_core::domain::{Receipt, ReceiptId, ScoredReceipt};
use receipt_processor_core::ports::{PortError, PortResult, ReceiptStore};
use std::collections::HashMap;
use tokio::sync::RwLock;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A receipt store backed by a `HashMap`.
///
/// The id counter and the map sit behind the same lock so that assigning an
/// id and inserting the record are one step.
#[derive(Default)]
pub struct InMemoryReceiptStore {
    inner: RwLock<Inner>,
}

struct Inner {
    next_id: ReceiptId,
    receipts: HashMap<ReceiptId, ScoredReceipt>,
}

impl Default for Inner {
    fn default() -> Self {
        Self {
            next_id: ReceiptId::new(0),
            receipts: HashMap::new(),
        }
    }
}

impl InMemoryReceiptStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.receipts.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

//=========================================================================================
// `ReceiptStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl ReceiptStore for InMemoryReceiptStore {
    async fn put(&self, receipt: Receipt, points: u64) -> PortResult<ScoredReceipt> {
        let mut inner = self.inner.write().await;
        let id = inner.next_id;
        if id.get() == u64::MAX {
            return Err(PortError::Unexpected("receipt ids exhausted".to_string()));
        }
        inner.next_id = id.next();

        let record = ScoredReceipt {
            id,
            receipt,
            points,
            processed_at: Utc::now(),
        };
        inner.receipts.insert(id, record.clone());
        Ok(record)
    }

    async fn get(&self, id: ReceiptId) -> PortResult<ScoredReceipt> {
        self.inner
            .read()
            .await
            .receipts
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::NotFound(format!("Receipt {} not found", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    fn receipt(retailer: &str) -> Receipt {
        Receipt {
            retailer: retailer.to_string(),
            ..Receipt::default()
        }
    }

    #[tokio::test]
    async fn ids_start_at_zero_and_increase() {
        let store = InMemoryReceiptStore::new();
        let first = store.put(receipt("A"), 1).await.unwrap();
        let second = store.put(receipt("B"), 2).await.unwrap();
        assert_eq!(first.id, ReceiptId::new(0));
        assert_eq!(second.id, ReceiptId::new(1));
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn get_returns_what_was_put() {
        let store = InMemoryReceiptStore::new();
        let stored = store.put(receipt("Target"), 28).await.unwrap();
        let fetched = store.get(stored.id).await.unwrap();
        assert_eq!(fetched.points, 28);
        assert_eq!(fetched.receipt.retailer, "Target");
        assert_eq!(fetched.processed_at, stored.processed_at);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let store = InMemoryReceiptStore::new();
        assert!(store.is_empty().await);
        let err = store.get(ReceiptId::new(7)).await.unwrap_err();
        assert!(matches!(err, PortError::NotFound(_)));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_puts_never_share_an_id() {
        let store = Arc::new(InMemoryReceiptStore::new());
        let handles: Vec<_> = (0..200)
            .map(|n| {
                let store = store.clone();
                tokio::spawn(async move { store.put(receipt("Shop"), n).await.unwrap().id })
            })
            .collect();

        let mut ids = HashSet::new();
        for handle in handles {
            assert!(ids.insert(handle.await.unwrap()));
        }
        assert_eq!(ids.len(), 200);
        assert_eq!(store.len().await, 200);
        assert!(ids.iter().all(|id| id.get() < 200));
    }
}
