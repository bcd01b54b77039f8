//! # StockSync Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port/adapter interfaces (traits) for the stock source, the catalog and
//!   configuration
//! - The event router, quantity resolver and reconciliation engine
//! - Outcome reporting
//!
//! ## Architecture Principles
//! - Only depends on `stocksync-domain`
//! - No HTTP, file or environment access
//! - All external dependencies via traits

pub mod ports;
pub mod reconcile;
pub mod resolver;
pub mod router;

pub use ports::{CatalogClient, CatalogProvider, ConfigSource, StaticConfigSource, StockRepository};
pub use reconcile::{report, ReconciliationEngine};
pub use resolver::QuantityResolver;
pub use router::{EventRouter, IdLocation, InboundEvent, Routing, StockEventKind, StockTarget};
