//! Mock stock repository for testing
//!
//! Holds parts and stock units in memory behind a shared lock so tests can
//! change stock between two engine calls.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use stocksync_core::StockRepository;
use stocksync_domain::{Part, PartId, Result as DomainResult, StockUnit, StockUnitId};

#[derive(Default)]
struct StockState {
    parts: HashMap<PartId, Part>,
    units: Vec<StockUnit>,
}

/// In-memory mock for `StockRepository`.
#[derive(Default, Clone)]
pub struct MockStockRepository {
    state: Arc<Mutex<StockState>>,
}

impl MockStockRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience helper for registering a part.
    pub fn with_part(self, id: u64, name: &str) -> Self {
        self.add_part(id, name);
        self
    }

    /// Convenience helper for adding a stock unit.
    pub fn with_unit(self, id: u64, part: u64, quantity: f64) -> Self {
        self.add_unit(id, part, quantity);
        self
    }

    pub fn add_part(&self, id: u64, name: &str) {
        let part = Part { id: PartId(id), name: name.to_string() };
        self.state.lock().unwrap().parts.insert(part.id, part);
    }

    pub fn add_unit(&self, id: u64, part: u64, quantity: f64) {
        self.state.lock().unwrap().units.push(StockUnit {
            id: StockUnitId(id),
            part_id: PartId(part),
            quantity,
            location: Some("WH-1".to_string()),
            deleted: false,
        });
    }

    /// Drop a unit entirely, as if the deletion committed before the event ran.
    pub fn remove_unit(&self, id: u64) {
        self.state.lock().unwrap().units.retain(|unit| unit.id != StockUnitId(id));
    }
}

#[async_trait]
impl StockRepository for MockStockRepository {
    async fn find_stock_unit(&self, id: StockUnitId) -> DomainResult<Option<StockUnit>> {
        Ok(self.state.lock().unwrap().units.iter().find(|unit| unit.id == id).cloned())
    }

    async fn find_part(&self, id: PartId) -> DomainResult<Option<Part>> {
        Ok(self.state.lock().unwrap().parts.get(&id).cloned())
    }

    async fn stock_units_for_part(&self, part_id: PartId) -> DomainResult<Vec<StockUnit>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .units
            .iter()
            .filter(|unit| unit.part_id == part_id)
            .cloned()
            .collect())
    }
}
