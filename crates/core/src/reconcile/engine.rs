//! Reconciliation engine - core business logic
//!
//! One call to [`ReconciliationEngine::handle`] takes a raw stock event to a
//! [`SyncOutcome`]: route, resolve the authoritative quantity, read the
//! catalog, write only on a real difference. Every failure along the way is
//! folded into the outcome; nothing is raised to the caller.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use serde_json::Value;
use stocksync_domain::{quantities_match, SyncError, SyncOutcome};
use tracing::{debug, instrument};

use super::report;
use crate::ports::{CatalogProvider, ConfigSource, StockRepository};
use crate::resolver::QuantityResolver;
use crate::router::{EventRouter, InboundEvent};

/// Event-driven stock reconciliation service
pub struct ReconciliationEngine {
    config: Arc<dyn ConfigSource>,
    router: EventRouter,
    resolver: QuantityResolver,
    catalog: Arc<dyn CatalogProvider>,
}

impl ReconciliationEngine {
    /// Create a new engine with the default event vocabulary
    pub fn new(
        config: Arc<dyn ConfigSource>,
        stock: Arc<dyn StockRepository>,
        catalog: Arc<dyn CatalogProvider>,
    ) -> Self {
        Self { config, router: EventRouter::new(), resolver: QuantityResolver::new(stock), catalog }
    }

    /// Replace the event router
    pub fn with_router(mut self, router: EventRouter) -> Self {
        self.router = router;
        self
    }

    /// Reconcile one event and report the outcome.
    ///
    /// Never fails and never panics: collaborator panics are caught and
    /// reported as an unexpected failure.
    #[instrument(skip(self, payload))]
    pub async fn handle(&self, event_kind: &str, payload: &Value) -> SyncOutcome {
        let reconcile = AssertUnwindSafe(self.reconcile(event_kind, payload));
        let outcome = match reconcile.catch_unwind().await {
            Ok(outcome) => outcome,
            Err(panic) => SyncOutcome::failed(
                event_kind,
                SyncError::Unexpected(format!("panic during sync: {}", panic_message(&*panic))),
            ),
        };
        report::report(&outcome);
        outcome
    }

    /// Reconcile events one after another.
    ///
    /// Each event is independent; a failure in one does not stop the rest.
    pub async fn handle_batch<I>(&self, events: I) -> Vec<SyncOutcome>
    where
        I: IntoIterator<Item = InboundEvent>,
    {
        let mut outcomes = Vec::new();
        for event in events {
            outcomes.push(self.handle(&event.event, &event.payload).await);
        }
        outcomes
    }

    async fn reconcile(&self, event_kind: &str, payload: &Value) -> SyncOutcome {
        let config = match self.config.snapshot() {
            Ok(config) => config,
            Err(err) => return SyncOutcome::failed(event_kind, err),
        };

        if !config.enabled {
            return SyncOutcome::disabled(event_kind);
        }

        let Some(kind) = self.router.route(event_kind) else {
            return SyncOutcome::not_applicable(event_kind);
        };

        if let Err(err) = config.ensure_configured() {
            return SyncOutcome::failed(event_kind, err);
        }

        let target = match self.router.extract(kind, payload) {
            Ok(target) => target,
            Err(err) => return SyncOutcome::failed(event_kind, err),
        };

        let resolved = match self.resolver.resolve_target(&target).await {
            Ok(resolved) => resolved,
            Err(err) => return SyncOutcome::failed(event_kind, err),
        };
        let sku = resolved.sku;
        let quantity = resolved.quantity;
        debug!(sku = %sku, quantity, stock_unit_id = %target.stock_unit_id, "Resolved quantity");

        let client = match self.catalog.client(&config) {
            Ok(client) => client,
            Err(err) => {
                return SyncOutcome::failed(event_kind, err)
                    .with_sku(sku)
                    .with_quantities(None, Some(quantity))
            }
        };

        let remote = match client.get_quantity(&sku).await {
            Ok(remote) => remote,
            Err(SyncError::SkuNotFoundInCatalog(_)) => {
                return SyncOutcome::not_found(event_kind, sku, quantity)
            }
            Err(err) => {
                return SyncOutcome::failed(event_kind, err)
                    .with_sku(sku)
                    .with_quantities(None, Some(quantity))
            }
        };

        if quantities_match(quantity, remote) {
            return SyncOutcome::unchanged(event_kind, sku, remote, quantity);
        }

        if config.log_only {
            return SyncOutcome::updated(event_kind, sku, remote, quantity, true);
        }

        match client.set_quantity(&sku, quantity).await {
            Ok(()) => SyncOutcome::updated(event_kind, sku, remote, quantity, false),
            Err(SyncError::SkuNotFoundInCatalog(_)) => {
                SyncOutcome::not_found(event_kind, sku, quantity)
                    .with_quantities(Some(remote), Some(quantity))
            }
            Err(err) => SyncOutcome::failed(event_kind, err)
                .with_sku(sku)
                .with_quantities(Some(remote), Some(quantity)),
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
