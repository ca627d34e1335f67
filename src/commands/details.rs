//! Catalog details command implementation.

use crate::catalog::index::fetch_index;
use crate::catalog::{CatalogClient, CatalogFetch};
use crate::config::Config;
use crate::format::Formatter;
use anyhow::{Context, Result};
use tracing::info;

/// Shows the catalog index metadata.
pub struct DetailsCommand {
    config: Config,
}

impl DetailsCommand {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Fetches the index and returns formatted output.
    pub async fn execute(&self) -> Result<String> {
        let client = CatalogClient::new(&self.config).context("Failed to create HTTP client")?;
        self.execute_with_client(&client).await
    }

    /// Fetches the index with a provided client (for testing).
    pub async fn execute_with_client(&self, client: &impl CatalogFetch) -> Result<String> {
        info!("Reading catalog index from {}", self.config.root_url);

        let index = fetch_index(client, &self.config.root_url)
            .await
            .context("Failed to load catalog index")?;
        let details = index.details();

        Ok(Formatter::new(self.config.format).format_details(&details))
    }
}
