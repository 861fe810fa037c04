//! Element names read from Product Advertising API responses.
//!
//! All names live in the versioned service namespace returned by
//! [`namespace`]. Update this file when the response schema changes.

/// Namespace URI for responses of the given API version.
pub fn namespace(api_version: &str) -> String {
    format!("http://webservices.amazon.com/AWSECommerceService/{}", api_version)
}

/// Elements shared by every response kind.
pub mod envelope {
    pub const OPERATION_REQUEST: &str = "OperationRequest";
    pub const REQUEST_ID: &str = "RequestId";

    /// Request echo inside each result container.
    pub const REQUEST: &str = "Request";
    pub const IS_VALID: &str = "IsValid";
}

/// The `Items` container of ItemLookup and ItemSearch responses.
pub mod items {
    pub const ITEMS: &str = "Items";
    pub const ITEM: &str = "Item";
    pub const TOTAL_RESULTS: &str = "TotalResults";
    pub const TOTAL_PAGES: &str = "TotalPages";
}

/// Fields of a single `Item`.
pub mod item {
    pub const ASIN: &str = "ASIN";
    pub const DETAIL_PAGE_URL: &str = "DetailPageURL";
    pub const SALES_RANK: &str = "SalesRank";

    pub const ITEM_ATTRIBUTES: &str = "ItemAttributes";
    pub const ACTOR: &str = "Actor";
    pub const ARTIST: &str = "Artist";
    /// Digital music downloads list contributors as creators instead of artists.
    pub const CREATOR: &str = "Creator";
    pub const PRODUCT_GROUP: &str = "ProductGroup";
    pub const TITLE: &str = "Title";
    pub const AUTHOR: &str = "Author";

    pub const OFFER_SUMMARY: &str = "OfferSummary";
    pub const LOWEST_NEW_PRICE: &str = "LowestNewPrice";
    /// Price in minor currency units ("1699" is 16.99).
    pub const AMOUNT: &str = "Amount";

    pub const SMALL_IMAGE: &str = "SmallImage";
    pub const MEDIUM_IMAGE: &str = "MediumImage";
    pub const LARGE_IMAGE: &str = "LargeImage";
    pub const URL: &str = "URL";
}

/// BrowseNodeLookup response elements.
pub mod browse {
    pub const BROWSE_NODES: &str = "BrowseNodes";
    pub const BROWSE_NODE: &str = "BrowseNode";
    pub const BROWSE_NODE_ID: &str = "BrowseNodeId";
    pub const NAME: &str = "Name";
    pub const IS_CATEGORY_ROOT: &str = "IsCategoryRoot";
    pub const ANCESTORS: &str = "Ancestors";
    pub const CHILDREN: &str = "Children";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_tracks_version() {
        assert_eq!(
            namespace("2011-08-01"),
            "http://webservices.amazon.com/AWSECommerceService/2011-08-01"
        );
        assert_ne!(namespace("2011-08-01"), namespace("2013-08-01"));
    }
}
