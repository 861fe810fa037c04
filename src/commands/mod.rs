//! CLI command implementations.

pub mod browse;
pub mod lookup;
pub mod search;

pub use browse::BrowseCommand;
pub use lookup::LookupCommand;
pub use search::SearchCommand;
