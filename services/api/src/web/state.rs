//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use receipt_processor_core::ports::ReceiptStore;
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ReceiptStore>,
    pub config: Arc<Config>,
}
