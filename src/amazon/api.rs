//! Product Advertising API facade.
//!
//! Each operation signs a request, fetches it through the configured
//! [`Transport`], parses the body and hands it to the [`ResponseMapper`].

use crate::amazon::mapper::ResponseMapper;
use crate::amazon::models::{BrowseNodeLookupResponse, ItemLookupResponse, ItemSearchResponse};
use crate::amazon::signer::RequestSigner;
use crate::amazon::transport::{HttpTransport, Transport};
use crate::amazon::xml::Element;
use crate::config::Config;
use crate::error::{Error, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info};

const DEFAULT_LOOKUP_GROUP: &str = "Medium";
const DEFAULT_BROWSE_GROUP: &str = "BrowseNodeInfo";

/// Default deadline for [`ProductAdvertisingApi::spawn_item_search`].
pub const DEFAULT_SEARCH_DEADLINE: Duration = Duration::from_secs(5);

/// Parameters of an ItemSearch operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub keywords: Option<String>,
    pub title: Option<String>,
    pub browse_node: Option<String>,
    pub search_index: String,
    pub response_group: String,
    /// Result page to fetch; the service defaults to the first page
    pub page: Option<u32>,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            keywords: None,
            title: None,
            browse_node: None,
            search_index: "All".to_string(),
            response_group: "Medium".to_string(),
            page: None,
        }
    }
}

impl SearchRequest {
    /// Creates a keyword search across all search indices.
    pub fn keywords(keywords: impl Into<String>) -> Self {
        Self { keywords: Some(keywords.into()), ..Self::default() }
    }

    /// Restricts results to titles matching `title`.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Restricts results to a browse node.
    pub fn browse_node(mut self, node_id: impl ToString) -> Self {
        self.browse_node = Some(node_id.to_string());
        self
    }

    pub fn search_index(mut self, index: impl Into<String>) -> Self {
        self.search_index = index.into();
        self
    }

    pub fn response_group(mut self, group: impl Into<String>) -> Self {
        self.response_group = group.into();
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }
}

/// Client for the three catalog operations.
#[derive(Clone)]
pub struct ProductAdvertisingApi {
    signer: RequestSigner,
    transport: Arc<dyn Transport>,
    mapper: ResponseMapper,
    print_url: bool,
}

impl ProductAdvertisingApi {
    /// Creates a client that fetches over HTTP.
    pub fn new(config: &Config) -> Result<Self> {
        let transport = HttpTransport::new(config)?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Creates a client with a provided transport (for testing).
    pub fn with_transport(config: &Config, transport: Arc<dyn Transport>) -> Result<Self> {
        if !config.has_credentials() {
            return Err(Error::Config("access key and secret key are required".to_string()));
        }

        Ok(Self {
            signer: RequestSigner::new(
                config.access_key.clone(),
                config.secret_key.clone(),
                config.associate_tag.clone(),
                config.locale,
                config.api_version.clone(),
            ),
            transport,
            mapper: ResponseMapper::new(&config.api_version),
            print_url: config.print_url,
        })
    }

    /// Looks up a single item by ASIN with the `Medium` response group.
    pub async fn item_lookup(&self, asin: &str) -> Result<ItemLookupResponse> {
        self.item_lookup_with_group(asin, DEFAULT_LOOKUP_GROUP).await
    }

    /// Looks up a single item by ASIN with an explicit response group.
    pub async fn item_lookup_with_group(
        &self,
        asin: &str,
        response_group: &str,
    ) -> Result<ItemLookupResponse> {
        info!("Looking up item: {}", asin);

        let root = self
            .fetch_xml(
                "ItemLookup",
                &[
                    ("ItemId", Some(asin)),
                    ("Condition", Some("All")),
                    ("ResponseGroup", Some(response_group)),
                ],
            )
            .await?;

        self.mapper.item_lookup(&root)
    }

    /// Searches the catalog.
    pub async fn item_search(&self, request: &SearchRequest) -> Result<ItemSearchResponse> {
        info!(
            "Searching {} for {:?} (title {:?})",
            request.search_index, request.keywords, request.title
        );

        let page = request.page.map(|p| p.to_string());
        let root = self
            .fetch_xml(
                "ItemSearch",
                &[
                    ("BrowseNode", request.browse_node.as_deref()),
                    ("SearchIndex", Some(request.search_index.as_str())),
                    ("Condition", Some("All")),
                    ("ResponseGroup", Some(request.response_group.as_str())),
                    ("Keywords", request.keywords.as_deref()),
                    ("Title", request.title.as_deref()),
                    ("ItemPage", page.as_deref()),
                ],
            )
            .await?;

        self.mapper.item_search(&root)
    }

    /// Starts an item search in the background and returns a handle to wait on.
    ///
    /// The search fails with [`Error::Timeout`] if it has not finished within `deadline`.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn spawn_item_search(&self, request: SearchRequest, deadline: Duration) -> SearchHandle {
        let api = self.clone();
        let handle = tokio::spawn(async move {
            match tokio::time::timeout(deadline, api.item_search(&request)).await {
                Ok(result) => result,
                Err(_) => Err(Error::Timeout(deadline)),
            }
        });

        SearchHandle { handle }
    }

    /// Maps an ItemSearch document already in memory.
    pub fn item_search_from_xml(&self, xml: &[u8]) -> Result<ItemSearchResponse> {
        let root = Element::parse(xml)?;
        self.mapper.item_search(&root)
    }

    /// Looks up a browse node with the `BrowseNodeInfo` response group.
    pub async fn browse_node_lookup(&self, node_id: u64) -> Result<BrowseNodeLookupResponse> {
        self.browse_node_lookup_with_group(node_id, DEFAULT_BROWSE_GROUP).await
    }

    /// Looks up a browse node with an explicit response group.
    pub async fn browse_node_lookup_with_group(
        &self,
        node_id: u64,
        response_group: &str,
    ) -> Result<BrowseNodeLookupResponse> {
        info!("Looking up browse node: {}", node_id);

        let node_id = node_id.to_string();
        let root = self
            .fetch_xml(
                "BrowseNodeLookup",
                &[("BrowseNodeId", Some(node_id.as_str())), ("ResponseGroup", Some(response_group))],
            )
            .await?;

        self.mapper.browse_node_lookup(&root)
    }

    async fn fetch_xml(&self, operation: &str, params: &[(&str, Option<&str>)]) -> Result<Element> {
        let url = self.signer.sign(operation, params)?;

        if self.print_url {
            info!("{}", url);
        }

        let body = self.transport.get(&url).await?;
        debug!("{} returned {} bytes", operation, body.len());

        Element::parse(&body)
    }
}

/// Pending background item search.
pub struct SearchHandle {
    handle: JoinHandle<Result<ItemSearchResponse>>,
}

impl SearchHandle {
    /// Waits for the search to finish.
    pub async fn wait(self) -> Result<ItemSearchResponse> {
        self.handle.await.map_err(|e| Error::Transport(format!("search task failed: {}", e)))?
    }

    /// Returns true if the search has already completed.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Abandons the search; a later [`wait`](Self::wait) fails with [`Error::Transport`].
    pub fn abort(&self) {
        self.handle.abort();
    }
}
