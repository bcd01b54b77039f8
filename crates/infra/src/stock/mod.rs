//! Stock repository adapters

pub mod memory;

pub use memory::{InMemoryStockRepository, StockSnapshot};
