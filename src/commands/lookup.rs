//! Item lookup command implementation.

use crate::amazon::{Product, ProductAdvertisingApi};
use crate::config::Config;
use crate::format::Formatter;
use anyhow::{Context, Result};
use tracing::{info, warn};

/// Executes item lookups by ASIN.
pub struct LookupCommand {
    config: Config,
}

impl LookupCommand {
    /// Creates a new lookup command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Looks up one ASIN and returns formatted output.
    pub async fn execute(&self, asin: &str) -> Result<String> {
        let api = ProductAdvertisingApi::new(&self.config).context("Failed to create API client")?;
        self.execute_with_api(&api, asin).await
    }

    /// Looks up one ASIN with a provided client (for testing).
    pub async fn execute_with_api(&self, api: &ProductAdvertisingApi, asin: &str) -> Result<String> {
        let asin = normalize_asin(asin)?;

        let response = api
            .item_lookup(&asin)
            .await
            .with_context(|| format!("Item lookup failed for {}", asin))?;
        info!("{}", response);

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_product(&response.product))
    }

    /// Looks up several ASINs.
    pub async fn execute_batch(&self, asins: &[String]) -> Result<String> {
        let api = ProductAdvertisingApi::new(&self.config).context("Failed to create API client")?;
        self.execute_batch_with_api(&api, asins).await
    }

    /// Looks up several ASINs with a provided client (for testing).
    ///
    /// Invalid ASINs and failed lookups are reported and skipped.
    pub async fn execute_batch_with_api(
        &self,
        api: &ProductAdvertisingApi,
        asins: &[String],
    ) -> Result<String> {
        let mut products: Vec<Product> = Vec::new();

        for asin in asins {
            let asin = match normalize_asin(asin) {
                Ok(asin) => asin,
                Err(e) => {
                    warn!("Skipping: {}", e);
                    continue;
                }
            };

            match api.item_lookup(&asin).await {
                Ok(response) => products.push(response.product),
                Err(e) => warn!("Failed to look up {}: {}", asin, e),
            }
        }

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_products(&products))
    }
}

/// Uppercases and validates an ASIN (10 alphanumeric characters).
pub fn normalize_asin(asin: &str) -> Result<String> {
    let asin = asin.trim().to_uppercase();
    if asin.len() != 10 || !asin.chars().all(|c| c.is_ascii_alphanumeric()) {
        anyhow::bail!(
            "Invalid ASIN format: '{}'. ASIN should be 10 alphanumeric characters.",
            asin
        );
    }
    Ok(asin)
}
