//! Mock catalog for testing
//!
//! Behaves like a tiny catalog: known SKUs hold a quantity, unknown SKUs read
//! as not found, and every call is recorded for later assertions.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use stocksync_core::{CatalogClient, CatalogProvider};
use stocksync_domain::{Result as DomainResult, SyncConfig, SyncError, TransportKind};

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogCall {
    Get(String),
    Set(String, f64),
    TestConnection,
}

#[derive(Default)]
struct CatalogState {
    quantities: HashMap<String, f64>,
    calls: Vec<CatalogCall>,
    fail_writes: Option<TransportKind>,
    fail_reads: Option<TransportKind>,
    vanish_on_write: bool,
}

/// In-memory mock for `CatalogClient`.
#[derive(Default, Clone)]
pub struct MockCatalog {
    state: Arc<Mutex<CatalogState>>,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a SKU with a catalog quantity.
    pub fn with_sku(self, sku: &str, quantity: f64) -> Self {
        self.state.lock().unwrap().quantities.insert(sku.to_string(), quantity);
        self
    }

    /// Make every write fail with the given transport kind.
    pub fn failing_writes(self, kind: TransportKind) -> Self {
        self.state.lock().unwrap().fail_writes = Some(kind);
        self
    }

    /// Make every read fail with the given transport kind.
    pub fn failing_reads(self, kind: TransportKind) -> Self {
        self.state.lock().unwrap().fail_reads = Some(kind);
        self
    }

    /// Drop the SKU just before any write lands, as a concurrent catalog
    /// deletion would.
    pub fn vanishing_on_write(self) -> Self {
        self.state.lock().unwrap().vanish_on_write = true;
        self
    }

    /// Remove a SKU, as if it were deleted from the catalog.
    pub fn forget(&self, sku: &str) {
        self.state.lock().unwrap().quantities.remove(sku);
    }

    pub fn quantity(&self, sku: &str) -> Option<f64> {
        self.state.lock().unwrap().quantities.get(sku).copied()
    }

    pub fn calls(&self) -> Vec<CatalogCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn writes(&self) -> Vec<(String, f64)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                CatalogCall::Set(sku, quantity) => Some((sku, quantity)),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl CatalogClient for MockCatalog {
    async fn get_quantity(&self, sku: &str) -> DomainResult<f64> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(CatalogCall::Get(sku.to_string()));
        if let Some(kind) = state.fail_reads {
            return Err(SyncError::transport(kind, "injected read failure"));
        }
        state
            .quantities
            .get(sku)
            .copied()
            .ok_or_else(|| SyncError::SkuNotFoundInCatalog(sku.to_string()))
    }

    async fn set_quantity(&self, sku: &str, quantity: f64) -> DomainResult<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(CatalogCall::Set(sku.to_string(), quantity));
        if let Some(kind) = state.fail_writes {
            return Err(SyncError::transport(kind, "injected write failure"));
        }
        if state.vanish_on_write {
            state.quantities.remove(sku);
        }
        match state.quantities.get_mut(sku) {
            Some(current) => {
                *current = quantity;
                Ok(())
            }
            None => Err(SyncError::SkuNotFoundInCatalog(sku.to_string())),
        }
    }

    async fn test_connection(&self) -> DomainResult<()> {
        self.state.lock().unwrap().calls.push(CatalogCall::TestConnection);
        Ok(())
    }
}

/// Provider that always hands out the same mock and counts requests.
#[derive(Clone)]
pub struct MockCatalogProvider {
    catalog: MockCatalog,
    requests: Arc<Mutex<usize>>,
}

impl MockCatalogProvider {
    pub fn new(catalog: MockCatalog) -> Self {
        Self { catalog, requests: Arc::new(Mutex::new(0)) }
    }

    pub fn requests(&self) -> usize {
        *self.requests.lock().unwrap()
    }
}

impl CatalogProvider for MockCatalogProvider {
    fn client(&self, _config: &SyncConfig) -> DomainResult<Arc<dyn CatalogClient>> {
        *self.requests.lock().unwrap() += 1;
        Ok(Arc::new(self.catalog.clone()))
    }
}
