//! Reconciliation of stock events against the catalog

pub mod engine;
pub mod report;

pub use engine::ReconciliationEngine;
