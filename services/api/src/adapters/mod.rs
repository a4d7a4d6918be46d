pub mod memory;

pub use memory::InMemoryReceiptStore;
