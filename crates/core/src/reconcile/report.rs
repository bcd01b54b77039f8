//! Outcome reporting
//!
//! Every outcome is logged exactly once, at a level that depends on what
//! happened. The message text is built separately so it can be checked
//! without a subscriber.

use stocksync_domain::constants::{CATALOG_NAME, LOG_ONLY_PREFIX};
use stocksync_domain::{SyncAction, SyncOutcome};
use tracing::{debug, error, info, warn, Level};

/// Log level an outcome is reported at.
pub fn severity(outcome: &SyncOutcome) -> Level {
    match outcome.action {
        SyncAction::Updated | SyncAction::SkippedNoChange => Level::INFO,
        SyncAction::SkippedNotFound => Level::WARN,
        SyncAction::SkippedDisabled | SyncAction::SkippedNotApplicable => Level::DEBUG,
        SyncAction::Failed => match &outcome.error {
            Some(err) if err.is_expected() => Level::WARN,
            _ => Level::ERROR,
        },
    }
}

/// Human-readable message for an outcome.
pub fn log_line(outcome: &SyncOutcome) -> String {
    let kind = &outcome.event_kind;
    let sku = outcome.sku.as_deref().unwrap_or("?");

    match outcome.action {
        SyncAction::Updated => {
            let line = format!(
                "[{kind}] Synced SKU '{sku}': {} -> {}",
                quantity(outcome.previous_quantity),
                quantity(outcome.new_quantity)
            );
            if outcome.dry_run {
                format!("{LOG_ONLY_PREFIX} {line}")
            } else {
                line
            }
        }
        SyncAction::SkippedNoChange => {
            let current = quantity(outcome.new_quantity);
            format!("[{kind}] SKU '{sku}' already at {current}, nothing to do")
        }
        SyncAction::SkippedNotFound => {
            format!("[{kind}] SKU '{sku}' not found in {CATALOG_NAME}, skipping sync")
        }
        SyncAction::SkippedDisabled => format!("[{kind}] Sync disabled, skipping"),
        SyncAction::SkippedNotApplicable => format!("[{kind}] Not a stock event, ignoring"),
        SyncAction::Failed => {
            let detail = outcome.error_detail().unwrap_or_else(|| "unknown error".to_string());
            match &outcome.sku {
                Some(sku) => format!("[{kind}] Failed to sync SKU '{sku}': {detail}"),
                None => format!("[{kind}] Sync failed: {detail}"),
            }
        }
    }
}

/// Emit the outcome through `tracing`.
pub fn report(outcome: &SyncOutcome) {
    let line = log_line(outcome);
    let event_kind = outcome.event_kind.as_str();
    let sku = outcome.sku.as_deref().unwrap_or_default();
    let action = outcome.action.as_str();

    let level = severity(outcome);
    if level == Level::ERROR {
        error!(event_kind, sku, action, "{line}");
    } else if level == Level::WARN {
        warn!(event_kind, sku, action, "{line}");
    } else if level == Level::INFO {
        info!(event_kind, sku, action, dry_run = outcome.dry_run, "{line}");
    } else {
        debug!(event_kind, sku, action, "{line}");
    }
}

fn quantity(value: Option<f64>) -> String {
    value.map_or_else(|| "?".to_string(), |q| q.to_string())
}
