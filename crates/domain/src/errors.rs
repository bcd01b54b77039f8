//! Error types used throughout the application
//!
//! Every variant is resolved into a `SyncOutcome` by the reconciliation engine;
//! none of them is meant to cross the public `handle` boundary.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::impl_domain_status_conversions;

/// Main error type for StockSync
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "detail")]
pub enum SyncError {
    /// Catalog URL or credential missing, or an invalid setting.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Event payload did not have the expected shape.
    #[error("Payload error: {0}")]
    Extraction(String),

    /// The stock unit named by the event no longer exists.
    #[error("Stock unit vanished: {0}")]
    StockUnitNotFound(String),

    /// The part has no name, so there is no SKU to sync.
    #[error("Missing SKU: {0}")]
    MissingSku(String),

    /// The SKU is unknown to the catalog.
    #[error("SKU '{0}' not found in catalog")]
    SkuNotFoundInCatalog(String),

    /// Network or HTTP failure talking to the catalog.
    #[error("Transport error ({kind}): {detail}")]
    Transport {
        kind: TransportKind,
        status: Option<u16>,
        detail: String,
    },

    /// The stock source failed to answer.
    #[error("Stock repository error: {0}")]
    Repository(String),

    /// Anything uncategorized, including panics caught at the handler boundary.
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl SyncError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn extraction(msg: impl Into<String>) -> Self {
        Self::Extraction(msg.into())
    }

    pub fn transport(kind: TransportKind, detail: impl Into<String>) -> Self {
        Self::Transport { kind, status: None, detail: detail.into() }
    }

    /// Classify a non-success HTTP status into a transport error.
    pub fn from_status(status: u16, detail: impl Into<String>) -> Self {
        Self::Transport {
            kind: TransportKind::from_status(status),
            status: Some(status),
            detail: detail.into(),
        }
    }

    /// Transport classification, if this is a transport error.
    pub fn transport_kind(&self) -> Option<TransportKind> {
        match self {
            Self::Transport { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Returns true if a fresh attempt could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        self.transport_kind().is_some_and(|kind| kind.is_retryable())
    }

    /// Expected conditions that should not page anyone.
    ///
    /// Deletion races, mapping gaps and malformed payloads from event kinds we
    /// only partially understand are part of normal operation.
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::Extraction(_) | Self::StockUnitNotFound(_) | Self::SkuNotFoundInCatalog(_)
        )
    }
}

/// Sub-classification of catalog transport failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransportKind {
    /// Request exceeded the configured timeout
    Timeout,
    /// Connection could not be established
    Connect,
    /// Credential rejected (401, 403)
    Auth,
    /// Rate limit exceeded (429)
    RateLimited,
    /// Catalog server error (5xx)
    Server,
    /// Request rejected (4xx other than 401, 403, 404, 429)
    Client,
    /// Response body could not be decoded
    Decode,
    /// Anything else reqwest reports
    Other,
}

impl_domain_status_conversions!(TransportKind {
    Timeout => "timeout",
    Connect => "connect",
    Auth => "auth",
    RateLimited => "rate-limited",
    Server => "server",
    Client => "client",
    Decode => "decode",
    Other => "other",
});

impl TransportKind {
    /// Classify HTTP status code into a transport kind
    pub fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => Self::Auth,
            429 => Self::RateLimited,
            400..=499 => Self::Client,
            500..=599 => Self::Server,
            _ => Self::Other,
        }
    }

    /// Returns true if this failure should be retried
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout | Self::Connect | Self::RateLimited | Self::Server)
    }
}

/// Result type alias for StockSync operations
pub type Result<T> = std::result::Result<T, SyncError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_classify() {
        assert_eq!(TransportKind::from_status(401), TransportKind::Auth);
        assert_eq!(TransportKind::from_status(403), TransportKind::Auth);
        assert_eq!(TransportKind::from_status(429), TransportKind::RateLimited);
        assert_eq!(TransportKind::from_status(400), TransportKind::Client);
        assert_eq!(TransportKind::from_status(503), TransportKind::Server);
        assert_eq!(TransportKind::from_status(302), TransportKind::Other);
    }

    #[test]
    fn only_transient_transport_errors_are_retryable() {
        assert!(SyncError::from_status(500, "boom").is_retryable());
        assert!(SyncError::from_status(429, "slow down").is_retryable());
        assert!(SyncError::transport(TransportKind::Timeout, "t").is_retryable());
        assert!(!SyncError::from_status(401, "nope").is_retryable());
        assert!(!SyncError::SkuNotFoundInCatalog("X".into()).is_retryable());
        assert!(!SyncError::configuration("missing").is_retryable());
    }

    #[test]
    fn transport_display_includes_kind_and_detail() {
        let err = SyncError::from_status(502, "HTTP 502 Bad Gateway");
        assert_eq!(err.to_string(), "Transport error (server): HTTP 502 Bad Gateway");
    }

    #[test]
    fn expected_conditions_are_flagged() {
        assert!(SyncError::StockUnitNotFound("12".into()).is_expected());
        assert!(SyncError::SkuNotFoundInCatalog("X".into()).is_expected());
        assert!(!SyncError::Unexpected("panic".into()).is_expected());
        assert!(!SyncError::from_status(500, "x").is_expected());
    }

    #[test]
    fn serializes_with_type_tag() {
        let json = serde_json::to_value(SyncError::configuration("no url")).unwrap();
        assert_eq!(json["type"], "Configuration");
        assert_eq!(json["detail"], "no url");
    }
}
