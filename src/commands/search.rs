//! Search command implementation.

use crate::amazon::{ProductAdvertisingApi, SearchRequest};
use crate::config::Config;
use crate::format::Formatter;
use anyhow::{Context, Result};
use tracing::{debug, info};

/// Executes an item search.
pub struct SearchCommand {
    config: Config,
}

impl SearchCommand {
    /// Creates a new search command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Executes the search and returns formatted output.
    pub async fn execute(&self, request: &SearchRequest) -> Result<String> {
        let api = ProductAdvertisingApi::new(&self.config).context("Failed to create API client")?;
        self.execute_with_api(&api, request).await
    }

    /// Executes the search with a provided client (for testing).
    pub async fn execute_with_api(
        &self,
        api: &ProductAdvertisingApi,
        request: &SearchRequest,
    ) -> Result<String> {
        if request.keywords.is_none() && request.title.is_none() && request.browse_node.is_none() {
            anyhow::bail!("Search needs keywords, a title, or a browse node");
        }

        debug!("Search request: {:?}", request);

        let response = api.item_search(request).await.context("Item search failed")?;
        info!("{}", response);

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_search(&response))
    }
}
