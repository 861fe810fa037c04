//! Browse node lookup command implementation.

use crate::amazon::ProductAdvertisingApi;
use crate::config::Config;
use crate::format::Formatter;
use anyhow::{Context, Result};

/// Executes a browse node lookup.
pub struct BrowseCommand {
    config: Config,
}

impl BrowseCommand {
    /// Creates a new browse command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Looks up a browse node and returns formatted output.
    pub async fn execute(&self, node_id: u64) -> Result<String> {
        let api = ProductAdvertisingApi::new(&self.config).context("Failed to create API client")?;
        self.execute_with_api(&api, node_id).await
    }

    /// Looks up a browse node with a provided client (for testing).
    pub async fn execute_with_api(&self, api: &ProductAdvertisingApi, node_id: u64) -> Result<String> {
        let response = api
            .browse_node_lookup(node_id)
            .await
            .with_context(|| format!("Browse node lookup failed for {}", node_id))?;

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_browse(&response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amazon::Transport;
    use crate::config::OutputFormat;
    use async_trait::async_trait;
    use std::sync::Arc;

    const BROWSE_XML: &str = r#"<BrowseNodeLookupResponse xmlns="http://webservices.amazon.com/AWSECommerceService/2011-08-01">
        <OperationRequest><RequestId>browse-1</RequestId></OperationRequest>
        <BrowseNodes>
            <Request><IsValid>True</IsValid></Request>
            <BrowseNode>
                <BrowseNodeId>1000</BrowseNodeId>
                <Name>Subjects</Name>
                <IsCategoryRoot>1</IsCategoryRoot>
                <Children>
                    <BrowseNode><BrowseNodeId>17</BrowseNodeId><Name>Literature &amp; Fiction</Name></BrowseNode>
                </Children>
            </BrowseNode>
        </BrowseNodes>
    </BrowseNodeLookupResponse>"#;

    struct MockTransport;

    #[async_trait]
    impl Transport for MockTransport {
        async fn get(&self, url: &str) -> crate::error::Result<Vec<u8>> {
            assert!(url.contains("BrowseNodeId=1000"));
            assert!(url.contains("ResponseGroup=BrowseNodeInfo"));
            Ok(BROWSE_XML.as_bytes().to_vec())
        }
    }

    #[tokio::test]
    async fn test_browse_table_output() {
        let config = Config {
            access_key: "key".to_string(),
            secret_key: "secret".to_string(),
            format: OutputFormat::Table,
            ..Config::default()
        };
        let api = ProductAdvertisingApi::with_transport(&config, Arc::new(MockTransport)).unwrap();
        let cmd = BrowseCommand::new(config);

        let output = cmd.execute_with_api(&api, 1000).await.unwrap();
        // "1" is not a recognised truth value
        assert!(output.starts_with("Subjects (1000) (root: false)"));
        assert!(output.contains("Literature & Fiction (17) (root: Unknown)"));
    }
}
