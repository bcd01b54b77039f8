//! Bounded-retry decorator
//!
//! Wraps any [`CatalogClient`] and repeats calls that failed with a transient
//! transport error (timeout, connection, 429, 5xx). "SKU not found" and every
//! other error are returned on the first occurrence. The error from the last
//! attempt is the one the caller sees.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use stocksync_core::CatalogClient;
use stocksync_domain::constants::MAX_ATTEMPTS_CAP;
use stocksync_domain::Result;
use tracing::warn;

/// Attempts and backoff for [`RetryingCatalogClient`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_attempts: u32,
    /// Delay before the first retry; doubled for each further retry
    pub base_backoff: Duration,
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_backoff: Duration::from_millis(200),
            max_backoff: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    pub fn with_attempts(max_attempts: u32) -> Self {
        Self { max_attempts: max_attempts.clamp(1, MAX_ATTEMPTS_CAP), ..Self::default() }
    }

    /// Delay before retry number `retry_number` (1-based).
    pub fn backoff_delay(&self, retry_number: u32) -> Duration {
        let shift = retry_number.saturating_sub(1).min(8);
        let multiplier = 1u32 << shift;
        self.base_backoff.saturating_mul(multiplier).min(self.max_backoff)
    }
}

/// Catalog client decorator with bounded exponential-backoff retries
pub struct RetryingCatalogClient {
    inner: Arc<dyn CatalogClient>,
    policy: RetryPolicy,
}

impl RetryingCatalogClient {
    pub fn new(inner: Arc<dyn CatalogClient>, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    async fn run<T, F, Fut>(&self, operation: &'static str, mut call: F) -> Result<T>
    where
        F: FnMut() -> Fut + Send,
        Fut: Future<Output = Result<T>> + Send,
        T: Send,
    {
        let attempts = self.policy.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match call().await {
                Err(err) if err.is_retryable() && attempt < attempts => {
                    let delay = self.policy.backoff_delay(attempt);
                    warn!(
                        operation,
                        attempt,
                        max_attempts = attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "Catalog call failed, retrying"
                    );
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                    attempt += 1;
                }
                result => return result,
            }
        }
    }
}

#[async_trait]
impl CatalogClient for RetryingCatalogClient {
    async fn get_quantity(&self, sku: &str) -> Result<f64> {
        self.run("get_quantity", || self.inner.get_quantity(sku)).await
    }

    async fn set_quantity(&self, sku: &str, quantity: f64) -> Result<()> {
        self.run("set_quantity", || self.inner.set_quantity(sku, quantity)).await
    }

    async fn test_connection(&self) -> Result<()> {
        self.run("test_connection", || self.inner.test_connection()).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use stocksync_domain::{SyncError, TransportKind};
    use tokio::sync::Mutex as TokioMutex;

    use super::*;

    type ResponseQueue = TokioMutex<VecDeque<Result<f64>>>;

    struct ScriptedCatalog {
        responses: ResponseQueue,
        calls: TokioMutex<usize>,
    }

    impl ScriptedCatalog {
        fn new(responses: Vec<Result<f64>>) -> Arc<Self> {
            let responses = TokioMutex::new(responses.into());
            Arc::new(Self { responses, calls: TokioMutex::new(0) })
        }

        async fn calls(&self) -> usize {
            *self.calls.lock().await
        }
    }

    #[async_trait]
    impl CatalogClient for ScriptedCatalog {
        async fn get_quantity(&self, _sku: &str) -> Result<f64> {
            *self.calls.lock().await += 1;
            self.responses.lock().await.pop_front().unwrap_or(Ok(0.0))
        }

        async fn set_quantity(&self, _sku: &str, _quantity: f64) -> Result<()> {
            *self.calls.lock().await += 1;
            self.responses.lock().await.pop_front().unwrap_or(Ok(0.0)).map(|_| ())
        }

        async fn test_connection(&self) -> Result<()> {
            Ok(())
        }
    }

    fn fast_policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            base_backoff: Duration::from_millis(1),
            max_backoff: Duration::from_millis(5),
        }
    }

    #[tokio::test]
    async fn retries_transient_failures_until_success() {
        let inner = ScriptedCatalog::new(vec![
            Err(SyncError::from_status(503, "busy")),
            Err(SyncError::transport(TransportKind::Timeout, "slow")),
            Ok(12.0),
        ]);
        let client = RetryingCatalogClient::new(inner.clone(), fast_policy(3));

        assert_eq!(client.get_quantity("A").await.unwrap(), 12.0);
        assert_eq!(inner.calls().await, 3);
    }

    #[tokio::test]
    async fn gives_up_after_max_attempts_with_last_error() {
        let inner = ScriptedCatalog::new(vec![
            Err(SyncError::from_status(500, "first")),
            Err(SyncError::from_status(429, "second")),
            Ok(1.0),
        ]);
        let client = RetryingCatalogClient::new(inner.clone(), fast_policy(2));

        let err = client.get_quantity("A").await.unwrap_err();
        assert_eq!(err.transport_kind(), Some(TransportKind::RateLimited));
        assert_eq!(inner.calls().await, 2);
    }

    #[tokio::test]
    async fn never_retries_not_found() {
        let inner =
            ScriptedCatalog::new(vec![Err(SyncError::SkuNotFoundInCatalog("A".into())), Ok(1.0)]);
        let client = RetryingCatalogClient::new(inner.clone(), fast_policy(5));

        let err = client.get_quantity("A").await.unwrap_err();
        assert!(matches!(err, SyncError::SkuNotFoundInCatalog(_)));
        assert_eq!(inner.calls().await, 1);
    }

    #[tokio::test]
    async fn never_retries_auth_failures() {
        let inner =
            ScriptedCatalog::new(vec![Err(SyncError::from_status(401, "bad token")), Ok(1.0)]);
        let client = RetryingCatalogClient::new(inner.clone(), fast_policy(5));

        assert!(client.set_quantity("A", 3.0).await.is_err());
        assert_eq!(inner.calls().await, 1);
    }

    #[test]
    fn backoff_doubles_and_caps() {
        let policy = RetryPolicy {
            max_attempts: 10,
            base_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_millis(350),
        };
        assert_eq!(policy.backoff_delay(1), Duration::from_millis(100));
        assert_eq!(policy.backoff_delay(2), Duration::from_millis(200));
        assert_eq!(policy.backoff_delay(3), Duration::from_millis(350));
    }

    #[test]
    fn attempts_are_clamped() {
        assert_eq!(RetryPolicy::with_attempts(0).max_attempts, 1);
        assert_eq!(RetryPolicy::with_attempts(50).max_attempts, MAX_ATTEMPTS_CAP);
    }
}
