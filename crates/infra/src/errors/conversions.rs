//! Conversions from external infrastructure errors into domain errors.

use reqwest::Error as HttpError;
use reqwest::StatusCode;
use stocksync_domain::{SyncError, TransportKind};

/// Longest slice of a response body carried into an error detail.
const MAX_BODY_DETAIL: usize = 200;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub SyncError);

impl From<InfraError> for SyncError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<SyncError> for InfraError {
    fn from(value: SyncError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoSyncError {
    fn into_sync_error(self) -> SyncError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → SyncError */
/* -------------------------------------------------------------------------- */

impl IntoSyncError for HttpError {
    fn into_sync_error(self) -> SyncError {
        if self.is_timeout() {
            return SyncError::transport(TransportKind::Timeout, "HTTP request timed out");
        }

        if self.is_connect() {
            return SyncError::transport(
                TransportKind::Connect,
                format!("HTTP connection failure: {self}"),
            );
        }

        if self.is_decode() {
            return SyncError::transport(
                TransportKind::Decode,
                format!("invalid response body: {self}"),
            );
        }

        if let Some(status) = self.status() {
            return status_error(status, "");
        }

        SyncError::transport(TransportKind::Other, self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_sync_error())
    }
}

/// Transport error for a non-success status, with a trimmed body excerpt.
pub fn status_error(status: StatusCode, body: &str) -> SyncError {
    let code = status.as_u16();
    let reason = status.canonical_reason().unwrap_or("unknown status");
    let mut detail = format!("HTTP {code} {reason}");

    let body = body.trim();
    if !body.is_empty() {
        let excerpt: String = body.chars().take(MAX_BODY_DETAIL).collect();
        detail.push_str(": ");
        detail.push_str(&excerpt);
    }

    SyncError::from_status(code, detail)
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
