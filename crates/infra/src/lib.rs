//! # StockSync Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - HTTP client and the Magento catalog client
//! - Bounded-retry decorator and the cached client provider
//! - Configuration loading (environment, JSON/TOML files)
//! - In-memory stock repository
//! - Tracing initialisation
//!
//! ## Architecture
//! - Implements traits defined in `stocksync-core`
//! - Contains all "impure" code (network, files, environment)

pub mod catalog;
pub mod config;
pub mod errors;
pub mod http;
pub mod observability;
pub mod stock;

// Re-export commonly used items
pub use catalog::{MagentoCatalogClient, MagentoCatalogProvider, RetryingCatalogClient};
pub use config::{DefaultConfigSource, FileConfigSource};
pub use http::HttpClient;
pub use stock::InMemoryStockRepository;
