//! Event routing
//!
//! Maps inbound event identifiers onto the stock events the engine handles
//! and pulls the stock-unit id out of each payload shape. Routing is a pure
//! lookup: every recognized kind carries a small table of places where its
//! payload may hold the id, tried in order.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use stocksync_domain::{impl_domain_status_conversions, PartId, Result, StockUnitId, SyncError};

/// Stock events that trigger a reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StockEventKind {
    Created,
    Saved,
    Deleted,
    QuantityUpdated,
    Counted,
    Moved,
    Split,
    AssignedToCustomer,
    ReturnedFromCustomer,
}

impl_domain_status_conversions!(StockEventKind {
    Created => "stock.created",
    Saved => "stock.saved",
    Deleted => "stock.deleted",
    QuantityUpdated => "stock.quantity_updated",
    Counted => "stock.counted",
    Moved => "stock.moved",
    Split => "stock.split",
    AssignedToCustomer => "stock.assigned_to_customer",
    ReturnedFromCustomer => "stock.returned_from_customer",
});

/// Where a payload may carry an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdLocation {
    /// `{"<field>": 12}`
    Field(&'static str),
    /// `{"<object>": {"<field>": 12}}`
    Nested { object: &'static str, field: &'static str },
}

impl IdLocation {
    fn lookup<'a>(&self, payload: &'a Value) -> Option<&'a Value> {
        let found = match self {
            Self::Field(field) => payload.get(field),
            Self::Nested { object, field } => {
                payload.get(object).and_then(|inner| inner.get(field))
            }
        };
        found.filter(|value| !value.is_null())
    }

    fn describe(&self) -> String {
        match self {
            Self::Field(field) => (*field).to_string(),
            Self::Nested { object, field } => format!("{object}.{field}"),
        }
    }
}

/// Model signals carry the primary key as `id`.
const MODEL_EVENT_IDS: &[IdLocation] = &[IdLocation::Field("id")];

/// Stock-item signals sometimes nest the item instead.
const STOCK_ITEM_EVENT_IDS: &[IdLocation] = &[
    IdLocation::Field("id"),
    IdLocation::Nested { object: "stock_item", field: "id" },
    IdLocation::Field("stock_item"),
];

const PART_HINTS: &[IdLocation] = &[
    IdLocation::Field("part_id"),
    IdLocation::Nested { object: "part", field: "id" },
    IdLocation::Field("part"),
];

impl StockEventKind {
    pub const ALL: [Self; 9] = [
        Self::Created,
        Self::Saved,
        Self::Deleted,
        Self::QuantityUpdated,
        Self::Counted,
        Self::Moved,
        Self::Split,
        Self::AssignedToCustomer,
        Self::ReturnedFromCustomer,
    ];

    /// InvenTree event names that mean the same thing.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Created => &["stock_stockitem.created"],
            Self::Saved => &["stock_stockitem.saved"],
            Self::Deleted => &["stock_stockitem.deleted"],
            Self::QuantityUpdated => &["stockitem.quantityupdated"],
            Self::Counted => &["stockitem.counted"],
            Self::Moved => &["stockitem.moved"],
            Self::Split => &["stockitem.split"],
            Self::AssignedToCustomer => &["stockitem.assignedtocustomer"],
            Self::ReturnedFromCustomer => &["stockitem.returnedfromcustomer"],
        }
    }

    pub fn is_deletion(&self) -> bool {
        matches!(self, Self::Deleted)
    }

    pub fn id_locations(&self) -> &'static [IdLocation] {
        match self {
            Self::Created | Self::Saved | Self::Deleted => MODEL_EVENT_IDS,
            _ => STOCK_ITEM_EVENT_IDS,
        }
    }
}

/// Stock unit (and, when the payload names it, owning part) an event is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockTarget {
    pub kind: StockEventKind,
    pub stock_unit_id: StockUnitId,
    pub part_hint: Option<PartId>,
}

/// Result of routing one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Routing {
    /// The event kind is not a stock change we care about.
    NotApplicable,
    Target(StockTarget),
}

/// One line of an event feed: `{"event": "stock.saved", "payload": {"id": 12}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InboundEvent {
    #[serde(alias = "event_kind", alias = "kind")]
    pub event: String,
    #[serde(default)]
    pub payload: Value,
}

impl InboundEvent {
    pub fn new(event: impl Into<String>, payload: Value) -> Self {
        Self { event: event.into(), payload }
    }
}

/// Maps event identifiers to stock events and extracts stock-unit ids.
#[derive(Debug, Clone)]
pub struct EventRouter {
    kinds: HashMap<String, StockEventKind>,
}

impl Default for EventRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl EventRouter {
    /// Router that knows the canonical names and the InvenTree aliases.
    pub fn new() -> Self {
        let mut kinds = HashMap::new();
        for kind in StockEventKind::ALL {
            kinds.insert(kind.as_str().to_string(), kind);
            for alias in kind.aliases() {
                kinds.insert((*alias).to_string(), kind);
            }
        }
        Self { kinds }
    }

    /// Register an extra identifier for a known kind.
    #[must_use]
    pub fn with_alias(mut self, event_kind: impl Into<String>, kind: StockEventKind) -> Self {
        self.kinds.insert(event_kind.into().trim().to_lowercase(), kind);
        self
    }

    pub fn route(&self, event_kind: &str) -> Option<StockEventKind> {
        self.kinds.get(event_kind.trim().to_lowercase().as_str()).copied()
    }

    /// Route and extract in one step.
    pub fn extract_stock_unit_id(&self, event_kind: &str, payload: &Value) -> Result<Routing> {
        match self.route(event_kind) {
            Some(kind) => self.extract(kind, payload).map(Routing::Target),
            None => Ok(Routing::NotApplicable),
        }
    }

    /// Pull the stock-unit id (and optional part hint) for an already routed kind.
    pub fn extract(&self, kind: StockEventKind, payload: &Value) -> Result<StockTarget> {
        if !payload.is_object() {
            return Err(SyncError::extraction(format!("{kind} payload is not a JSON object")));
        }

        let locations = kind.id_locations();
        let found = locations
            .iter()
            .find_map(|location| location.lookup(payload).map(|raw| (location, raw)));
        let Some((location, raw)) = found else {
            let looked_at: Vec<String> = locations.iter().map(IdLocation::describe).collect();
            return Err(SyncError::extraction(format!(
                "{kind} payload has no stock unit id (looked at {})",
                looked_at.join(", ")
            )));
        };

        let Some(id) = parse_id(raw) else {
            return Err(SyncError::extraction(format!(
                "{kind} payload field '{}' is not a stock unit id: {raw}",
                location.describe()
            )));
        };

        Ok(StockTarget { kind, stock_unit_id: StockUnitId(id), part_hint: part_hint(payload) })
    }
}

fn part_hint(payload: &Value) -> Option<PartId> {
    PART_HINTS.iter().find_map(|location| location.lookup(payload).and_then(parse_id)).map(PartId)
}

/// Accepts non-negative integers and numeric strings.
fn parse_id(value: &Value) -> Option<u64> {
    match value {
        Value::Number(number) => number.as_u64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}
