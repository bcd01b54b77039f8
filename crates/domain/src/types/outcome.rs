//! Reconciliation outcome
//!
//! One `SyncOutcome` is produced per handled event, reported, then dropped.
//! Nothing here is persisted.

use serde::{Deserialize, Serialize};

use crate::errors::SyncError;
use crate::impl_domain_status_conversions;

/// What the engine did for one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SyncAction {
    /// Catalog quantity was (or in log-only mode would have been) written
    Updated,
    /// Catalog already held the resolved quantity
    SkippedNoChange,
    /// SKU has no catalog counterpart
    SkippedNotFound,
    /// Sync switched off in configuration
    SkippedDisabled,
    /// Event kind is not one the router handles
    SkippedNotApplicable,
    /// Anything that went wrong; see `SyncOutcome::error`
    Failed,
}

impl_domain_status_conversions!(SyncAction {
    Updated => "updated",
    SkippedNoChange => "skipped-no-change",
    SkippedNotFound => "skipped-not-found",
    SkippedDisabled => "skipped-disabled",
    SkippedNotApplicable => "skipped-not-applicable",
    Failed => "failed",
});

/// Result of one reconciliation attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncOutcome {
    pub event_kind: String,
    pub sku: Option<String>,
    /// Catalog quantity observed before any write.
    pub previous_quantity: Option<f64>,
    /// Quantity resolved from the stock system.
    pub new_quantity: Option<f64>,
    pub action: SyncAction,
    pub error: Option<SyncError>,
    /// Set when the update was computed in log-only mode and not written.
    #[serde(default)]
    pub dry_run: bool,
}

impl SyncOutcome {
    fn bare(event_kind: impl Into<String>, action: SyncAction) -> Self {
        Self {
            event_kind: event_kind.into(),
            sku: None,
            previous_quantity: None,
            new_quantity: None,
            action,
            error: None,
            dry_run: false,
        }
    }

    pub fn disabled(event_kind: impl Into<String>) -> Self {
        Self::bare(event_kind, SyncAction::SkippedDisabled)
    }

    pub fn not_applicable(event_kind: impl Into<String>) -> Self {
        Self::bare(event_kind, SyncAction::SkippedNotApplicable)
    }

    pub fn failed(event_kind: impl Into<String>, error: SyncError) -> Self {
        Self { error: Some(error), ..Self::bare(event_kind, SyncAction::Failed) }
    }

    pub fn not_found(event_kind: impl Into<String>, sku: impl Into<String>, quantity: f64) -> Self {
        let sku = sku.into();
        Self {
            error: Some(SyncError::SkuNotFoundInCatalog(sku.clone())),
            sku: Some(sku),
            new_quantity: Some(quantity),
            ..Self::bare(event_kind, SyncAction::SkippedNotFound)
        }
    }

    pub fn unchanged(
        event_kind: impl Into<String>,
        sku: impl Into<String>,
        remote: f64,
        resolved: f64,
    ) -> Self {
        Self {
            sku: Some(sku.into()),
            previous_quantity: Some(remote),
            new_quantity: Some(resolved),
            ..Self::bare(event_kind, SyncAction::SkippedNoChange)
        }
    }

    pub fn updated(
        event_kind: impl Into<String>,
        sku: impl Into<String>,
        previous: f64,
        new: f64,
        dry_run: bool,
    ) -> Self {
        Self {
            sku: Some(sku.into()),
            previous_quantity: Some(previous),
            new_quantity: Some(new),
            dry_run,
            ..Self::bare(event_kind, SyncAction::Updated)
        }
    }

    /// Attach the SKU to a failure once it is known.
    #[must_use]
    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = Some(sku.into());
        self
    }

    /// Attach the observed quantities to a failure.
    #[must_use]
    pub fn with_quantities(mut self, previous: Option<f64>, new: Option<f64>) -> Self {
        self.previous_quantity = previous;
        self.new_quantity = new;
        self
    }

    pub fn is_failure(&self) -> bool {
        self.action == SyncAction::Failed
    }

    /// Human-readable error detail, if any.
    pub fn error_detail(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }
}
