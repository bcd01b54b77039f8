//! `ConfigSource` implementations backed by the loader
//!
//! Both sources read afresh on every snapshot, so edits to the environment or
//! the file take effect on the next event without a restart.

use std::path::PathBuf;

use stocksync_core::ConfigSource;
use stocksync_domain::{Result, SyncConfig};

use super::loader;

/// Reads one specific JSON or TOML file.
#[derive(Debug, Clone)]
pub struct FileConfigSource {
    path: PathBuf,
}

impl FileConfigSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl ConfigSource for FileConfigSource {
    fn snapshot(&self) -> Result<SyncConfig> {
        loader::load_from_file(Some(self.path.clone()))
    }
}

/// Environment first, then the first config file found by probing.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultConfigSource;

impl ConfigSource for DefaultConfigSource {
    fn snapshot(&self) -> Result<SyncConfig> {
        loader::load()
    }
}

#[cfg(test)]
mod tests {
    use stocksync_domain::SyncError;
    use tempfile::TempDir;

    use super::*;
    use crate::config::loader::tests::ENV_LOCK;
    use crate::config::loader::{ENV_TOKEN, ENV_URL};

    #[test]
    fn file_source_picks_up_edits() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("stocksync.toml");
        std::fs::write(&path, "url = \"https://shop.example.com\"\ntoken = \"t\"\n").unwrap();

        let source = FileConfigSource::new(&path);
        assert!(!source.snapshot().unwrap().log_only);

        let edited = "url = \"https://shop.example.com\"\ntoken = \"t\"\nlog_only = true\n";
        std::fs::write(&path, edited).unwrap();
        assert!(source.snapshot().unwrap().log_only);
    }

    #[test]
    fn missing_file_is_a_configuration_error() {
        let source = FileConfigSource::new("/nonexistent/stocksync.json");
        assert!(matches!(source.snapshot(), Err(SyncError::Configuration(_))));
    }

    #[test]
    fn default_source_reads_environment() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        std::env::set_var(ENV_URL, "https://env.example.com");
        std::env::set_var(ENV_TOKEN, "env-token");

        let config = DefaultConfigSource.snapshot().unwrap();
        assert_eq!(config.base_url, "https://env.example.com");

        std::env::remove_var(ENV_URL);
        std::env::remove_var(ENV_TOKEN);
    }
}
