//! Typed results of catalog operations.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A catalog item as returned by ItemLookup or ItemSearch.
///
/// Optional fields are `None` when the service does not offer that attribute
/// for the item; that is not a failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Product {
    /// Amazon Standard Identification Number
    pub asin: String,
    /// Product detail page URL
    pub detail_url: String,
    /// Product group, e.g. Book, DVD, Apparel, Toy
    pub category: String,
    pub title: String,
    /// Mostly available for books
    pub author: Option<String>,
    pub actors: Vec<String>,
    pub artists: Vec<String>,
    /// Lowest price for a new offer, in major currency units
    pub lowest_new_price: Option<Decimal>,
    pub small_image_url: Option<String>,
    pub medium_image_url: Option<String>,
    pub large_image_url: Option<String>,
    /// Sales rank as reported; not always numeric
    pub sales_rank: Option<String>,
}

impl Product {
    /// Returns true if any image size is available.
    pub fn has_images(&self) -> bool {
        self.small_image_url.is_some()
            || self.medium_image_url.is_some()
            || self.large_image_url.is_some()
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ASIN {} {}\t{} (#{})",
            self.asin,
            self.category,
            self.title,
            self.sales_rank.as_deref().unwrap_or("None")
        )
    }
}

/// Result of an ItemLookup operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemLookupResponse {
    /// Service-assigned request id, for diagnostics
    pub request_id: String,
    pub is_valid: bool,
    pub product: Product,
}

impl fmt::Display for ItemLookupResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Request id: {}, valid: {}, product {}",
            self.request_id, self.is_valid, self.product.asin
        )
    }
}

/// Result of an ItemSearch operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSearchResponse {
    pub request_id: String,
    pub is_valid: bool,
    pub total_results: u64,
    pub total_pages: u64,
    /// Products in the order the service ranked them
    pub products: Vec<Product>,
}

impl ItemSearchResponse {
    /// Returns true if the page contained no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Returns the number of products on this page.
    pub fn count(&self) -> usize {
        self.products.len()
    }
}

impl fmt::Display for ItemSearchResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Request id: {}, valid: {}, num_results: {}, pages: {}",
            self.request_id, self.is_valid, self.total_results, self.total_pages
        )
    }
}

/// A node in the browse (category) hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowseNode {
    pub node_id: u64,
    pub name: String,
    /// `None` when the service did not say
    pub category_root: Option<bool>,
}

impl fmt::Display for BrowseNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Only a confirmed root is reported; false and absent both read as unknown
        let root = if self.category_root == Some(true) { "true" } else { "Unknown" };
        write!(f, "{} ({}) (root: {})", self.name, self.node_id, root)
    }
}

/// Result of a BrowseNodeLookup operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowseNodeLookupResponse {
    pub request_id: String,
    pub is_valid: bool,
    pub node: BrowseNode,
    /// Direct ancestor chain; empty for root nodes
    pub ancestors: Vec<BrowseNode>,
    /// Immediate children
    pub children: Vec<BrowseNode>,
}

impl BrowseNodeLookupResponse {
    /// Returns true if the node has no ancestors.
    pub fn is_root(&self) -> bool {
        self.ancestors.is_empty()
    }
}

impl fmt::Display for BrowseNodeLookupResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.node)?;
        write!(f, "  Ancestors:")?;
        for ancestor in &self.ancestors {
            write!(f, "\n    {}", ancestor)?;
        }
        write!(f, "\n  Children:")?;
        for child in &self.children {
            write!(f, "\n    {}", child)?;
        }
        Ok(())
    }
}
