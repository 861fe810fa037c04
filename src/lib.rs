//! amz-catalog - Signed client for the Amazon Product Advertising catalog API
//!
//! Builds HMAC-signed ItemLookup, ItemSearch, and BrowseNodeLookup requests
//! and maps the XML responses onto typed results.

pub mod amazon;
pub mod commands;
pub mod config;
pub mod error;
pub mod format;

pub use amazon::{
    BrowseNode, BrowseNodeLookupResponse, ItemLookupResponse, ItemSearchResponse, Locale, Product,
    ProductAdvertisingApi, SearchRequest,
};
pub use config::Config;
pub use error::{Error, Result};
