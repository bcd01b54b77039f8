//! Stock records as read from the source-of-truth system
//!
//! The core never creates or mutates these; they arrive through the
//! `StockRepository` port exactly as InvenTree reports them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{QUANTITY_ABS_TOLERANCE, QUANTITY_REL_TOLERANCE};

/// Primary key of a stock unit (InvenTree `StockItem`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StockUnitId(pub u64);

impl fmt::Display for StockUnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Primary key of a part (InvenTree `Part`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartId(pub u64);

impl fmt::Display for PartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// One physical stock record at a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockUnit {
    pub id: StockUnitId,
    pub part_id: PartId,
    pub quantity: f64,
    #[serde(default)]
    pub location: Option<String>,
    /// Tombstoned rows still visible to the repository.
    #[serde(default)]
    pub deleted: bool,
}

impl StockUnit {
    /// Quantity this unit contributes to its part's aggregate.
    ///
    /// Deleted units contribute nothing and negative values are clamped.
    pub fn on_hand(&self) -> f64 {
        if self.deleted || !self.quantity.is_finite() {
            return 0.0;
        }
        self.quantity.max(0.0)
    }
}

/// Catalog-level item. `name` is the external SKU, used verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    pub id: PartId,
    pub name: String,
}

impl Part {
    /// Sum of on-hand quantities of the given units that belong to this part.
    ///
    /// Always computed from the units passed in; there is no stored total.
    pub fn aggregate_quantity<'a>(&self, units: impl IntoIterator<Item = &'a StockUnit>) -> f64 {
        units.into_iter().filter(|unit| unit.part_id == self.id).map(StockUnit::on_hand).sum()
    }
}

/// Output of the quantity resolver: the SKU and its authoritative quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedQuantity {
    pub part_id: PartId,
    pub sku: String,
    pub quantity: f64,
}

/// Float comparison used to decide whether a catalog write is needed.
///
/// Equal when within a relative tolerance of 1e-9 or an absolute one of 0.001.
pub fn quantities_match(a: f64, b: f64) -> bool {
    if a == b {
        return true;
    }
    let diff = (a - b).abs();
    diff <= (QUANTITY_REL_TOLERANCE * a.abs().max(b.abs())).max(QUANTITY_ABS_TOLERANCE)
}
