//! # StockSync Domain
//!
//! Business domain types and models for StockSync.
//!
//! This crate contains:
//! - Stock data as seen from the source system (`StockUnit`, `Part`)
//! - The per-event reconciliation result (`SyncOutcome`, `SyncAction`)
//! - The configuration snapshot (`SyncConfig`)
//! - Domain error types and Result definitions
//!
//! ## Architecture
//! - No dependencies on other StockSync crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
