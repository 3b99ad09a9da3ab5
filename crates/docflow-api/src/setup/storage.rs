//! Storage backend setup

use anyhow::{Context, Result};
use docflow_core::Config;
use docflow_storage::Storage;
use std::sync::Arc;

/// Build the configured storage backend
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    let storage = docflow_storage::create_storage(config)
        .await
        .context("Failed to initialize storage backend")?;

    tracing::info!(
        backend = %storage.backend_type(),
        "Storage backend initialized"
    );

    Ok(storage)
}
