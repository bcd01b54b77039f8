//! Port interfaces for reconciliation
//!
//! These traits define the boundaries between the reconciliation logic and
//! the systems it talks to: the stock source of truth, the catalog and the
//! settings store.

use std::sync::Arc;

use async_trait::async_trait;
use stocksync_domain::{Part, PartId, Result, StockUnit, StockUnitId, SyncConfig};

/// Read-only view of the stock-management system
#[async_trait]
pub trait StockRepository: Send + Sync {
    /// Look up a stock unit; `None` if it no longer exists
    async fn find_stock_unit(&self, id: StockUnitId) -> Result<Option<StockUnit>>;

    /// Look up a part; `None` if it no longer exists
    async fn find_part(&self, id: PartId) -> Result<Option<Part>>;

    /// All stock units currently attached to a part, at every location
    async fn stock_units_for_part(&self, part_id: PartId) -> Result<Vec<StockUnit>>;
}

/// Single-attempt catalog operations
///
/// Implementations map "SKU unknown" to `SyncError::SkuNotFoundInCatalog` and
/// everything else that goes wrong on the wire to `SyncError::Transport`.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Current catalog quantity for a SKU
    async fn get_quantity(&self, sku: &str) -> Result<f64>;

    /// Overwrite the catalog quantity for a SKU
    async fn set_quantity(&self, sku: &str, quantity: f64) -> Result<()>;

    /// Verify endpoint and credential
    async fn test_connection(&self) -> Result<()>;
}

/// Hands out a catalog client matching a configuration snapshot
pub trait CatalogProvider: Send + Sync {
    fn client(&self, config: &SyncConfig) -> Result<Arc<dyn CatalogClient>>;
}

/// Source of configuration snapshots, read once per reconciliation attempt
pub trait ConfigSource: Send + Sync {
    fn snapshot(&self) -> Result<SyncConfig>;
}

/// Fixed configuration, for embedding and tests
#[derive(Debug, Clone, Default)]
pub struct StaticConfigSource {
    config: SyncConfig,
}

impl StaticConfigSource {
    pub fn new(config: SyncConfig) -> Self {
        Self { config }
    }
}

impl ConfigSource for StaticConfigSource {
    fn snapshot(&self) -> Result<SyncConfig> {
        Ok(self.config.clone())
    }
}
