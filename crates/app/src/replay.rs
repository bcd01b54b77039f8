//! `stocksync replay`: run recorded events against a stock snapshot.
//!
//! The events file is JSON Lines, one `{"event": ..., "payload": {...}}` per
//! line. Blank lines and lines starting with `#` are skipped.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use stocksync_core::{ConfigSource, InboundEvent, ReconciliationEngine};
use stocksync_domain::{SyncAction, SyncOutcome};
use stocksync_infra::{InMemoryStockRepository, MagentoCatalogProvider};
use tracing::info;

pub async fn run(config: Arc<dyn ConfigSource>, events: &Path, stock: &Path) -> anyhow::Result<()> {
    let events = read_events(events)?;
    let stock = InMemoryStockRepository::load_json(stock)
        .with_context(|| format!("loading stock snapshot {}", stock.display()))?;

    info!(events = events.len(), "Replaying stock events");
    let engine =
        ReconciliationEngine::new(config, Arc::new(stock), Arc::new(MagentoCatalogProvider::new()));
    let outcomes = engine.handle_batch(events).await;

    let summary = summarize(&outcomes);
    for (action, count) in &summary {
        println!("{action:>24}  {count}");
    }

    let failed = summary.get(&SyncAction::Failed.to_string()).copied().unwrap_or(0);
    if failed > 0 {
        anyhow::bail!("{failed} of {} events failed", outcomes.len());
    }
    Ok(())
}

fn read_events(path: &Path) -> anyhow::Result<Vec<InboundEvent>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading events {}", path.display()))?;
    parse_events(&text).with_context(|| format!("parsing events {}", path.display()))
}

fn parse_events(text: &str) -> anyhow::Result<Vec<InboundEvent>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(index, line)| {
            serde_json::from_str::<InboundEvent>(line)
                .with_context(|| format!("line {}: not a stock event", index + 1))
        })
        .collect()
}

/// Count outcomes per action tag, sorted by tag.
fn summarize(outcomes: &[SyncOutcome]) -> BTreeMap<String, usize> {
    let mut summary = BTreeMap::new();
    for outcome in outcomes {
        *summary.entry(outcome.action.to_string()).or_insert(0) += 1;
    }
    summary
}
