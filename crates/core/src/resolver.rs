//! Quantity resolution
//!
//! Turns a stock unit (or part) into the SKU and the authoritative on-hand
//! quantity. Totals are recomputed from the repository on every call.

use std::sync::Arc;

use stocksync_domain::{PartId, ResolvedQuantity, Result, StockUnitId, SyncError};
use tracing::debug;

use crate::ports::StockRepository;
use crate::router::StockTarget;

pub struct QuantityResolver {
    repository: Arc<dyn StockRepository>,
}

impl QuantityResolver {
    pub fn new(repository: Arc<dyn StockRepository>) -> Self {
        Self { repository }
    }

    /// Resolve the part owning `stock_unit_id` and its total quantity.
    ///
    /// Fails with `StockUnitNotFound` if the unit is gone.
    pub async fn resolve(&self, stock_unit_id: StockUnitId) -> Result<ResolvedQuantity> {
        self.resolve_excluding(stock_unit_id, false).await
    }

    /// Resolve directly by part, for events whose stock unit has already gone.
    pub async fn resolve_part(&self, part_id: PartId) -> Result<ResolvedQuantity> {
        self.sum_part(part_id, None).await
    }

    /// Resolve whatever an event targets.
    ///
    /// For deletions the triggering unit never counts towards the total, and a
    /// unit that has already vanished falls back to the part hint if present.
    pub async fn resolve_target(&self, target: &StockTarget) -> Result<ResolvedQuantity> {
        let deletion = target.kind.is_deletion();
        match self.resolve_excluding(target.stock_unit_id, deletion).await {
            Err(SyncError::StockUnitNotFound(detail)) => match target.part_hint {
                Some(part_id) => {
                    debug!(
                        stock_unit_id = %target.stock_unit_id,
                        part_id = %part_id,
                        "Stock unit gone, resolving by part"
                    );
                    if deletion {
                        self.sum_part(part_id, Some(target.stock_unit_id)).await
                    } else {
                        self.resolve_part(part_id).await
                    }
                }
                None => Err(SyncError::StockUnitNotFound(detail)),
            },
            other => other,
        }
    }

    async fn resolve_excluding(
        &self,
        stock_unit_id: StockUnitId,
        exclude_self: bool,
    ) -> Result<ResolvedQuantity> {
        let unit = self.repository.find_stock_unit(stock_unit_id).await?.ok_or_else(|| {
            SyncError::StockUnitNotFound(format!(
                "stock unit {stock_unit_id} not found (probably deleted before sync)"
            ))
        })?;
        self.sum_part(unit.part_id, exclude_self.then_some(stock_unit_id)).await
    }

    async fn sum_part(
        &self,
        part_id: PartId,
        exclude: Option<StockUnitId>,
    ) -> Result<ResolvedQuantity> {
        let part = self
            .repository
            .find_part(part_id)
            .await?
            .ok_or_else(|| SyncError::StockUnitNotFound(format!("part {part_id} not found")))?;

        if part.name.trim().is_empty() {
            return Err(SyncError::MissingSku(format!("part {part_id} has no name")));
        }

        let units = self.repository.stock_units_for_part(part_id).await?;
        let quantity =
            part.aggregate_quantity(units.iter().filter(|unit| Some(unit.id) != exclude));

        Ok(ResolvedQuantity { part_id, sku: part.name, quantity })
    }
}
