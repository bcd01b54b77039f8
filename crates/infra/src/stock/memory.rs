//! In-memory stock repository
//!
//! Holds a snapshot of parts and stock units, typically loaded from a JSON
//! export of the stock system:
//!
//! ```json
//! {
//!   "parts": [{"id": 1, "name": "WIDGET-001"}],
//!   "stock_units": [{"id": 10, "part_id": 1, "quantity": 4, "location": "WH-1"}]
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use stocksync_core::StockRepository;
use stocksync_domain::{Part, PartId, Result, StockUnit, StockUnitId, SyncError};

/// Serializable stock export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockSnapshot {
    #[serde(default)]
    pub parts: Vec<Part>,
    #[serde(default, alias = "stock_items")]
    pub stock_units: Vec<StockUnit>,
}

#[derive(Default)]
struct StockTables {
    parts: HashMap<PartId, Part>,
    units: HashMap<StockUnitId, StockUnit>,
}

/// `StockRepository` over an in-memory snapshot.
#[derive(Default)]
pub struct InMemoryStockRepository {
    tables: RwLock<StockTables>,
}

impl InMemoryStockRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: StockSnapshot) -> Self {
        let repository = Self::new();
        for part in snapshot.parts {
            repository.upsert_part(part);
        }
        for unit in snapshot.stock_units {
            repository.upsert_unit(unit);
        }
        repository
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let snapshot: StockSnapshot = serde_json::from_str(json)
            .map_err(|e| SyncError::Repository(format!("invalid stock snapshot: {e}")))?;
        Ok(Self::from_snapshot(snapshot))
    }

    pub fn load_json(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            SyncError::Repository(format!("failed to read stock snapshot {}: {e}", path.display()))
        })?;
        Self::from_json_str(&contents)
    }

    pub fn upsert_part(&self, part: Part) {
        self.tables.write().parts.insert(part.id, part);
    }

    pub fn upsert_unit(&self, unit: StockUnit) {
        self.tables.write().units.insert(unit.id, unit);
    }

    /// Remove a unit outright. Returns the removed unit, if any.
    pub fn remove_unit(&self, id: StockUnitId) -> Option<StockUnit> {
        self.tables.write().units.remove(&id)
    }

    /// Keep the row but flag it deleted, as a soft-deleting source would.
    pub fn mark_deleted(&self, id: StockUnitId) -> bool {
        match self.tables.write().units.get_mut(&id) {
            Some(unit) => {
                unit.deleted = true;
                true
            }
            None => false,
        }
    }

    pub fn snapshot(&self) -> StockSnapshot {
        let tables = self.tables.read();
        let mut parts: Vec<Part> = tables.parts.values().cloned().collect();
        let mut stock_units: Vec<StockUnit> = tables.units.values().cloned().collect();
        parts.sort_by_key(|part| part.id);
        stock_units.sort_by_key(|unit| unit.id);
        StockSnapshot { parts, stock_units }
    }
}

#[async_trait]
impl StockRepository for InMemoryStockRepository {
    async fn find_stock_unit(&self, id: StockUnitId) -> Result<Option<StockUnit>> {
        Ok(self.tables.read().units.get(&id).cloned())
    }

    async fn find_part(&self, id: PartId) -> Result<Option<Part>> {
        Ok(self.tables.read().parts.get(&id).cloned())
    }

    async fn stock_units_for_part(&self, part_id: PartId) -> Result<Vec<StockUnit>> {
        let tables = self.tables.read();
        let mut units: Vec<StockUnit> =
            tables.units.values().filter(|unit| unit.part_id == part_id).cloned().collect();
        units.sort_by_key(|unit| unit.id);
        Ok(units)
    }
}
