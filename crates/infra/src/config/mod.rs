//! Configuration loading and management
//!
//! This module provides utilities for loading the sync configuration from
//! environment variables and files, and the `ConfigSource` implementations
//! that re-read it for every reconciliation attempt.

pub mod loader;
pub mod source;

// Re-export commonly used items
pub use loader::{load, load_from_env, load_from_file, probe_config_paths};
pub use source::{DefaultConfigSource, FileConfigSource};
