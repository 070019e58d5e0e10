mod api;
mod provider;

pub use api::{shopping_query, trusted_sites, CustomSearchClient};
pub use provider::{ProductSearch, SearchBackend, SearchProvider};
