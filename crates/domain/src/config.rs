//! Configuration management

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MAX_ATTEMPTS, DEFAULT_TIMEOUT_SECS, MAX_ATTEMPTS_CAP};
use crate::errors::{Result, SyncError};

/// Sync configuration snapshot
///
/// Read once per reconciliation attempt and treated as immutable for the
/// duration of that attempt.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Magento base URL (e.g. `https://shop.example.com`)
    #[serde(alias = "url", alias = "magento_url")]
    pub base_url: String,
    /// Integration access token, sent as a bearer credential
    #[serde(alias = "token", alias = "magento_token", skip_serializing)]
    pub access_token: String,
    pub enabled: bool,
    /// Compute and report updates without writing them
    pub log_only: bool,
    pub timeout_secs: u64,
    /// Total attempts per catalog call (1 disables retries)
    pub max_attempts: u32,
}

impl SyncConfig {
    /// Snapshot with endpoint and credential set, everything else default.
    pub fn new(base_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), access_token: access_token.into(), ..Self::default() }
    }

    /// True when both URL and credential are present.
    pub fn is_configured(&self) -> bool {
        !self.base_url.trim().is_empty() && !self.access_token.trim().is_empty()
    }

    /// Fail with a configuration error unless URL and credential are present.
    pub fn ensure_configured(&self) -> Result<()> {
        if self.is_configured() {
            Ok(())
        } else {
            Err(SyncError::configuration("Magento URL or token not configured"))
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    /// Attempts clamped to `1..=MAX_ATTEMPTS_CAP`.
    pub fn attempts(&self) -> u32 {
        self.max_attempts.clamp(1, MAX_ATTEMPTS_CAP)
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            access_token: String::new(),
            enabled: true,
            log_only: false,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl fmt::Debug for SyncConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncConfig")
            .field("base_url", &self.base_url)
            .field("access_token", &if self.access_token.is_empty() { "" } else { "<redacted>" })
            .field("enabled", &self.enabled)
            .field("log_only", &self.log_only)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_attempts", &self.max_attempts)
            .finish()
    }
}
