use async_trait::async_trait;
use tracing::warn;

use crate::config::SearchConfig;
use crate::error::{FinderError, Result};
use crate::models::{ItemType, SearchCandidate};

use super::api::CustomSearchClient;

/// Source of raw product search hits.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str, item_type: ItemType) -> Result<Vec<SearchCandidate>>;
}

pub enum SearchBackend {
    GoogleCustomSearch(CustomSearchClient),
    Unavailable { reason: String },
}

/// Production search provider. Without credentials it stays constructible
/// and reports every call as unavailable.
pub struct ProductSearch {
    backend: SearchBackend,
}

impl ProductSearch {
    pub fn new(config: Option<&SearchConfig>) -> Result<Self> {
        let backend = match config {
            Some(config) => SearchBackend::GoogleCustomSearch(CustomSearchClient::new(config.clone())?),
            None => {
                let reason = "GOOGLE_CUSTOM_SEARCH_API_KEY or GOOGLE_CUSTOM_SEARCH_ENGINE_ID not set"
                    .to_string();
                warn!(%reason, "Product search running in degraded mode");
                SearchBackend::Unavailable { reason }
            }
        };
        Ok(Self { backend })
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            backend: SearchBackend::Unavailable {
                reason: reason.into(),
            },
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self.backend, SearchBackend::Unavailable { .. })
    }
}

#[async_trait]
impl SearchProvider for ProductSearch {
    async fn search(&self, query: &str, item_type: ItemType) -> Result<Vec<SearchCandidate>> {
        match &self.backend {
            SearchBackend::GoogleCustomSearch(client) => client.search(query, item_type).await,
            SearchBackend::Unavailable { reason } => {
                Err(FinderError::SearchUnavailable(reason.clone()))
            }
        }
    }
}
