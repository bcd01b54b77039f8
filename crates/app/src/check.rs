//! `stocksync check`: verify the configured Magento endpoint and token.

use std::sync::Arc;

use anyhow::Context;
use stocksync_core::{CatalogProvider, ConfigSource};
use stocksync_infra::MagentoCatalogProvider;

pub async fn run(config: Arc<dyn ConfigSource>) -> anyhow::Result<()> {
    let config = config.snapshot().context("loading configuration")?;
    config.ensure_configured()?;

    let client = MagentoCatalogProvider::new().client(&config)?;
    client
        .test_connection()
        .await
        .with_context(|| format!("connecting to {}", config.base_url))?;

    println!("Magento connection OK ({})", config.base_url);
    if !config.enabled {
        println!("Note: sync is disabled in the configuration");
    } else if config.log_only {
        println!("Note: log-only mode is on; catalog quantities will not be written");
    }
    Ok(())
}
