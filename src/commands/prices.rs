//! Price query command implementation.

use crate::catalog::{CatalogClient, CatalogFetch};
use crate::config::Config;
use crate::context::PricingContext;
use crate::format::Formatter;
use crate::pricing::{get_details, get_prices};
use anyhow::{Context, Result};
use std::collections::BTreeMap;

/// Per-invocation query options layered over the configuration.
#[derive(Debug, Clone, Default)]
pub struct PriceQuery {
    pub service: String,
    /// Term as typed by the user; validated when applied
    pub term: Option<String>,
    pub sku: Option<String>,
    pub attributes: BTreeMap<String, String>,
}

/// Executes a price query for one service.
pub struct PricesCommand {
    config: Config,
}

impl PricesCommand {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Runs the query and returns formatted output.
    pub async fn execute(&self, query: &PriceQuery) -> Result<String> {
        let client = CatalogClient::new(&self.config).context("Failed to create HTTP client")?;
        self.execute_with_client(&client, query).await
    }

    /// Runs the query with a provided client (for testing).
    pub async fn execute_with_client(
        &self,
        client: &impl CatalogFetch,
        query: &PriceQuery,
    ) -> Result<String> {
        let mut pc = PricingContext::with_root(
            client,
            self.config.region,
            query.service.clone(),
            self.config.root_url.clone(),
        )
        .await?;

        pc.set_term(self.config.term);
        if let Some(term) = &query.term {
            pc.set_terms(term)?;
        }

        // Configured constraints first so command line values win
        pc.add_attribute(self.config.attributes.clone());
        pc.add_attribute(query.attributes.clone());

        if let Some(sku) = &query.sku {
            pc.set_sku(sku.trim());
        }

        get_details(&pc);
        let matches = get_prices(client, &pc).await?;

        Ok(Formatter::new(self.config.format).format_prices(&matches))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::testing::MockCatalog;
    use crate::config::OutputFormat;
    use crate::context::Term;
    use crate::error::PricingError;

    const ROOT: &str = "http://catalog.test";

    fn make_test_config() -> Config {
        Config {
            root_url: ROOT.to_string(),
            cache: false,
            format: OutputFormat::Csv,
            ..Config::default()
        }
    }

    fn query(service: &str) -> PriceQuery {
        PriceQuery { service: service.to_string(), ..PriceQuery::default() }
    }

    fn data_rows(output: &str) -> Vec<&str> {
        output.lines().skip(1).collect()
    }

    #[tokio::test]
    async fn test_prices_region_scan() {
        let cmd = PricesCommand::new(make_test_config());
        let output = cmd.execute_with_client(&MockCatalog::new(ROOT), &query("s3")).await.unwrap();

        let rows = data_rows(&output);
        assert_eq!(rows.len(), 4);
        assert!(rows[0].starts_with("S3API00003,"));
    }

    #[tokio::test]
    async fn test_prices_cli_attributes_override_config() {
        let mut config = make_test_config();
        config.attributes.insert("volumeType".into(), "Amazon Glacier".into());

        let mut q = query("s3");
        q.attributes.insert("volumeType".into(), "Standard".into());

        let output =
            PricesCommand::new(config).execute_with_client(&MockCatalog::new(ROOT), &q).await.unwrap();
        let rows = data_rows(&output);
        assert_eq!(rows.len(), 1);
        assert!(rows[0].starts_with("S3STD00001,"));
    }

    #[tokio::test]
    async fn test_prices_configured_term() {
        let config = Config { term: Term::Reserved, ..make_test_config() };
        let output =
            PricesCommand::new(config).execute_with_client(&MockCatalog::new(ROOT), &query("s3")).await.unwrap();

        let rows = data_rows(&output);
        assert_eq!(rows.len(), 1);
        assert!(rows[0].contains("0.019"));
    }

    #[tokio::test]
    async fn test_prices_term_flag_wins_over_config() {
        let config = Config { term: Term::Reserved, ..make_test_config() };
        let q = PriceQuery { term: Some("ONDEMAND".into()), ..query("s3") };

        let output =
            PricesCommand::new(config).execute_with_client(&MockCatalog::new(ROOT), &q).await.unwrap();
        assert_eq!(data_rows(&output).len(), 4);
    }

    #[tokio::test]
    async fn test_prices_invalid_term() {
        let q = PriceQuery { term: Some("spot".into()), ..query("s3") };
        let client = MockCatalog::new(ROOT);

        let err = PricesCommand::new(make_test_config()).execute_with_client(&client, &q).await.unwrap_err();
        assert_eq!(err.downcast_ref::<PricingError>(), Some(&PricingError::InvalidTerm("spot".into())));
        // Only the index was fetched
        assert_eq!(client.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_prices_sku() {
        let q = PriceQuery { sku: Some(" S3DTX00006 ".into()), ..query("s3") };
        let output = PricesCommand::new(make_test_config())
            .execute_with_client(&MockCatalog::new(ROOT), &q)
            .await
            .unwrap();

        let rows = data_rows(&output);
        assert_eq!(rows.len(), 1);
        assert!(rows[0].starts_with("S3DTX00006,"));
    }

    #[tokio::test]
    async fn test_prices_invalid_service() {
        let client = MockCatalog::new(ROOT);
        let err = PricesCommand::new(make_test_config())
            .execute_with_client(&client, &query("bogus"))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Invalid service: bogus"));
        assert_eq!(client.requests().len(), 1);
    }
}
