//! Maps parsed API responses onto typed result objects.

use crate::amazon::elements::{self, browse, envelope, item, items};
use crate::amazon::models::{
    BrowseNode, BrowseNodeLookupResponse, ItemLookupResponse, ItemSearchResponse, Product,
};
use crate::amazon::xml::Element;
use crate::error::{Error, Result};
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::{debug, info, trace};

/// Extracts typed results from response documents of one API version.
#[derive(Debug, Clone)]
pub struct ResponseMapper {
    namespace: String,
}

impl ResponseMapper {
    /// Creates a mapper for responses in the namespace of `api_version`.
    pub fn new(api_version: &str) -> Self {
        Self { namespace: elements::namespace(api_version) }
    }

    /// Maps an ItemLookup document. The response must hold exactly one item.
    pub fn item_lookup(&self, root: &Element) -> Result<ItemLookupResponse> {
        let request_id = self.request_id(root)?;
        let container = self.required(root, items::ITEMS)?;
        let is_valid = self.check_valid(container, &request_id)?;

        let mut products = self.products(container)?;
        if products.len() != 1 {
            return Err(Error::UnexpectedItemCount(products.len()));
        }

        Ok(ItemLookupResponse { request_id, is_valid, product: products.remove(0) })
    }

    /// Maps an ItemSearch document.
    pub fn item_search(&self, root: &Element) -> Result<ItemSearchResponse> {
        let request_id = self.request_id(root)?;
        let container = self.required(root, items::ITEMS)?;
        let is_valid = self.check_valid(container, &request_id)?;

        let total_results = self.required_number(container, items::TOTAL_RESULTS)?;
        let total_pages = self.required_number(container, items::TOTAL_PAGES)?;
        let products = self.products(container)?;

        Ok(ItemSearchResponse { request_id, is_valid, total_results, total_pages, products })
    }

    /// Maps a BrowseNodeLookup document.
    pub fn browse_node_lookup(&self, root: &Element) -> Result<BrowseNodeLookupResponse> {
        let request_id = self.request_id(root)?;
        let container = self.required(root, browse::BROWSE_NODES)?;
        let is_valid = self.check_valid(container, &request_id)?;

        let element = self.required(container, browse::BROWSE_NODE)?;
        let node = self.browse_node(element)?;

        // Root nodes have no Ancestors block. Nested ancestors-of-ancestors are ignored.
        let ancestors = match element.find(&self.namespace, browse::ANCESTORS) {
            Some(ancestors) => self.browse_nodes(ancestors)?,
            None => Vec::new(),
        };

        let children = match element.find(&self.namespace, browse::CHILDREN) {
            Some(children) => self.browse_nodes(children)?,
            None => Vec::new(),
        };

        debug!(
            "Browse node {} has {} ancestors and {} children",
            node.node_id,
            ancestors.len(),
            children.len()
        );

        Ok(BrowseNodeLookupResponse { request_id, is_valid, node, ancestors, children })
    }

    /// Converts every `Item` inside an `Items` container, preserving order.
    pub fn products(&self, container: &Element) -> Result<Vec<Product>> {
        let products = container
            .find_all(&self.namespace, items::ITEM)
            .map(|element| self.product(element))
            .collect::<Result<Vec<_>>>()?;

        info!("Converted {} items to products", products.len());
        Ok(products)
    }

    fn product(&self, element: &Element) -> Result<Product> {
        let asin = self.required_text(element, item::ASIN)?;
        let detail_url = self.required_text(element, item::DETAIL_PAGE_URL)?;
        let sales_rank = self.optional_text(element, &[item::SALES_RANK]);

        let attributes = self.required(element, item::ITEM_ATTRIBUTES)?;

        let actors = self.all_text(attributes, item::ACTOR);
        let mut artists = self.all_text(attributes, item::ARTIST);
        if artists.is_empty() {
            artists.extend(self.optional_text(attributes, &[item::CREATOR]));
        }

        let category = self.required_text(attributes, item::PRODUCT_GROUP)?;
        let title = self.required_text(attributes, item::TITLE)?;
        let author = self.optional_text(attributes, &[item::AUTHOR]);

        let lowest_new_price = self.lowest_new_price(element, &asin)?;

        let product = Product {
            small_image_url: self.optional_text(element, &[item::SMALL_IMAGE, item::URL]),
            medium_image_url: self.optional_text(element, &[item::MEDIUM_IMAGE, item::URL]),
            large_image_url: self.optional_text(element, &[item::LARGE_IMAGE, item::URL]),
            asin,
            detail_url,
            category,
            title,
            author,
            actors,
            artists,
            lowest_new_price,
            sales_rank,
        };

        trace!("{}", product);
        Ok(product)
    }

    /// Reads `OfferSummary/LowestNewPrice/Amount`. Any missing step leaves the price unset.
    fn lowest_new_price(&self, element: &Element, asin: &str) -> Result<Option<Decimal>> {
        let Some(summary) = element.find(&self.namespace, item::OFFER_SUMMARY) else {
            info!("No offer summary for ASIN {}", asin);
            return Ok(None);
        };

        let Some(lowest) = summary.find(&self.namespace, item::LOWEST_NEW_PRICE) else {
            info!("No lowest new price for ASIN {}", asin);
            return Ok(None);
        };

        let Some(amount) = lowest.find(&self.namespace, item::AMOUNT) else {
            info!("Lowest new price has no amount for ASIN {}", asin);
            return Ok(None);
        };

        let cents = i64::from_str(amount.text().trim()).map_err(|_| Error::InvalidValue {
            element: format!("{}/{}/{}", item::OFFER_SUMMARY, item::LOWEST_NEW_PRICE, item::AMOUNT),
            value: amount.text().to_string(),
        })?;

        Ok(Some(Decimal::new(cents, 2)))
    }

    fn browse_nodes(&self, container: &Element) -> Result<Vec<BrowseNode>> {
        container
            .find_all(&self.namespace, browse::BROWSE_NODE)
            .map(|element| self.browse_node(element))
            .collect()
    }

    fn browse_node(&self, element: &Element) -> Result<BrowseNode> {
        let node_id = self.required_number(element, browse::BROWSE_NODE_ID)?;
        let name = self.required_text(element, browse::NAME)?;
        let category_root = self
            .optional_text(element, &[browse::IS_CATEGORY_ROOT])
            .map(|flag| parse_bool(&flag));

        Ok(BrowseNode { node_id, name, category_root })
    }

    fn request_id(&self, root: &Element) -> Result<String> {
        root.find_path(&self.namespace, &[envelope::OPERATION_REQUEST, envelope::REQUEST_ID])
            .map(|element| element.text().to_string())
            .ok_or_else(|| {
                Error::MissingElement(format!("{}/{}", envelope::OPERATION_REQUEST, envelope::REQUEST_ID))
            })
    }

    /// Reads `Request/IsValid` and fails with `InvalidRequest` if it is not true.
    fn check_valid(&self, container: &Element, request_id: &str) -> Result<bool> {
        let flag = container
            .find_path(&self.namespace, &[envelope::REQUEST, envelope::IS_VALID])
            .ok_or_else(|| {
                Error::MissingElement(format!(
                    "{}/{}/{}",
                    container.name(),
                    envelope::REQUEST,
                    envelope::IS_VALID
                ))
            })?;

        if !parse_bool(flag.text()) {
            return Err(Error::InvalidRequest { request_id: request_id.to_string() });
        }

        Ok(true)
    }

    fn required<'a>(&self, parent: &'a Element, name: &str) -> Result<&'a Element> {
        parent
            .find(&self.namespace, name)
            .ok_or_else(|| Error::MissingElement(format!("{}/{}", parent.name(), name)))
    }

    fn required_text(&self, parent: &Element, name: &str) -> Result<String> {
        self.required(parent, name).map(|element| element.text().to_string())
    }

    fn required_number(&self, parent: &Element, name: &str) -> Result<u64> {
        let text = self.required(parent, name)?.text();
        text.trim().parse().map_err(|_| Error::InvalidValue {
            element: format!("{}/{}", parent.name(), name),
            value: text.to_string(),
        })
    }

    fn optional_text(&self, parent: &Element, path: &[&str]) -> Option<String> {
        parent.find_path(&self.namespace, path).map(|element| element.text().to_string())
    }

    fn all_text(&self, parent: &Element, name: &str) -> Vec<String> {
        parent.find_all(&self.namespace, name).map(|element| element.text().to_string()).collect()
    }
}

fn parse_bool(text: &str) -> bool {
    matches!(text, "True" | "true")
}
