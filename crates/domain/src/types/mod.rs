//! Domain types and models

pub mod outcome;
pub mod stock;

pub use outcome::{SyncAction, SyncOutcome};
pub use stock::{quantities_match, Part, PartId, ResolvedQuantity, StockUnit, StockUnitId};
