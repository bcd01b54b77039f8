//! Cached catalog client provider
//!
//! Building an HTTP client is not free, so the provider keeps the last one it
//! built and hands it out again for as long as the connection settings stay
//! the same. Any change to URL, token, timeout or attempts builds a fresh one.

use std::sync::Arc;

use parking_lot::Mutex;
use stocksync_core::{CatalogClient, CatalogProvider};
use stocksync_domain::{Result, SyncConfig};
use tracing::info;

use super::magento::MagentoCatalogClient;
use super::retry::{RetryPolicy, RetryingCatalogClient};

/// Settings a built client depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ClientKey {
    base_url: String,
    access_token: String,
    timeout_secs: u64,
    attempts: u32,
}

impl From<&SyncConfig> for ClientKey {
    fn from(config: &SyncConfig) -> Self {
        Self {
            base_url: config.base_url.trim().to_string(),
            access_token: config.access_token.trim().to_string(),
            timeout_secs: config.timeout().as_secs(),
            attempts: config.attempts(),
        }
    }
}

struct CachedClient {
    key: ClientKey,
    client: Arc<dyn CatalogClient>,
}

/// Provider of Magento clients, wrapped in the retry decorator when the
/// configuration asks for more than one attempt.
#[derive(Default)]
pub struct MagentoCatalogProvider {
    cache: Mutex<Option<CachedClient>>,
    retry: RetryPolicy,
}

impl MagentoCatalogProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override backoff timing; attempts always come from the configuration.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    fn build(&self, config: &SyncConfig) -> Result<Arc<dyn CatalogClient>> {
        let client: Arc<dyn CatalogClient> = Arc::new(MagentoCatalogClient::from_config(config)?);
        let attempts = config.attempts();
        if attempts > 1 {
            let policy = RetryPolicy { max_attempts: attempts, ..self.retry };
            Ok(Arc::new(RetryingCatalogClient::new(client, policy)))
        } else {
            Ok(client)
        }
    }
}

impl CatalogProvider for MagentoCatalogProvider {
    fn client(&self, config: &SyncConfig) -> Result<Arc<dyn CatalogClient>> {
        let key = ClientKey::from(config);
        let mut cache = self.cache.lock();

        if let Some(cached) = cache.as_ref().filter(|cached| cached.key == key) {
            return Ok(Arc::clone(&cached.client));
        }

        let client = self.build(config)?;
        info!(base_url = %key.base_url, attempts = key.attempts, "Built Magento client");
        *cache = Some(CachedClient { key, client: Arc::clone(&client) });
        Ok(client)
    }
}
