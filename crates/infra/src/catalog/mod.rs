//! Catalog adapters
//!
//! - [`magento`]: single-attempt Magento 2 REST client
//! - [`retry`]: bounded-retry decorator for any catalog client
//! - [`provider`]: builds and caches clients per configuration snapshot

pub mod magento;
pub mod provider;
pub mod retry;

pub use magento::MagentoCatalogClient;
pub use provider::MagentoCatalogProvider;
pub use retry::{RetryPolicy, RetryingCatalogClient};
