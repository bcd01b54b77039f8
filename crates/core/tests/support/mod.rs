//! Shared test helpers for `stocksync-core` integration tests.
//!
//! These helpers provide in-memory stand-ins for the stock source and the
//! catalog so that engine tests can focus on behaviour instead of plumbing.

#![allow(dead_code)]

pub mod catalog;
pub mod repositories;

use std::sync::Arc;

use stocksync_core::{ReconciliationEngine, StaticConfigSource};
use stocksync_domain::SyncConfig;

pub use catalog::{MockCatalog, MockCatalogProvider};
pub use repositories::MockStockRepository;

/// Configuration with credentials set and default flags.
pub fn configured() -> SyncConfig {
    SyncConfig::new("https://shop.example.com", "integration-token")
}

/// Engine wired to the given mocks and a fixed configuration.
pub fn engine(
    config: SyncConfig,
    stock: &MockStockRepository,
    catalog: &MockCatalog,
) -> ReconciliationEngine {
    engine_with_provider(config, stock, catalog).0
}

/// Like [`engine`], also returning the provider so tests can count client
/// requests.
pub fn engine_with_provider(
    config: SyncConfig,
    stock: &MockStockRepository,
    catalog: &MockCatalog,
) -> (ReconciliationEngine, MockCatalogProvider) {
    let provider = MockCatalogProvider::new(catalog.clone());
    let engine = ReconciliationEngine::new(
        Arc::new(StaticConfigSource::new(config)),
        Arc::new(stock.clone()),
        Arc::new(provider.clone()),
    );
    (engine, provider)
}
