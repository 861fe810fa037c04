//! Product Advertising API modules for signing, transport, parsing, and data models.

pub mod api;
pub mod elements;
pub mod locale;
pub mod mapper;
pub mod models;
pub mod signer;
pub mod transport;
pub mod xml;

pub use api::{ProductAdvertisingApi, SearchHandle, SearchRequest};
pub use locale::Locale;
pub use mapper::ResponseMapper;
pub use models::{
    BrowseNode, BrowseNodeLookupResponse, ItemLookupResponse, ItemSearchResponse, Product,
};
pub use signer::RequestSigner;
pub use transport::{HttpTransport, Transport};
