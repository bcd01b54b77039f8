//! Domain constants
//!
//! Centralized location for defaults and tolerances shared by the engine and
//! the catalog adapters.

// Configuration defaults
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1;
pub const MAX_ATTEMPTS_CAP: u32 = 10;

// Quantity comparison (InvenTree stores decimal stock, Magento echoes floats)
pub const QUANTITY_ABS_TOLERANCE: f64 = 0.001;
pub const QUANTITY_REL_TOLERANCE: f64 = 1e-9;

// Log prefixes
pub const LOG_ONLY_PREFIX: &str = "[LOG_ONLY]";
pub const CATALOG_NAME: &str = "Magento";
