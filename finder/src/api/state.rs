use std::sync::Arc;
use std::time::Duration;

use crate::cache::ResultCache;
use crate::config::Config;
use crate::error::Result;
use crate::ranking::{HttpLinkVerifier, LinkVerifier};
use crate::search::{ProductSearch, SearchProvider};
use crate::services::MatchingPipeline;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub pipeline: MatchingPipeline,
    search_available: bool,
}

impl AppState {
    /// Wire the production collaborators from configuration.
    pub fn from_config(config: Config) -> Result<Self> {
        let search = ProductSearch::new(config.search.as_ref())?;
        let search_available = search.is_available();
        let verifier =
            HttpLinkVerifier::new(Duration::from_secs(config.ranking.verify_timeout_secs))?;

        let mut state = Self::new(config, Arc::new(search), Arc::new(verifier));
        state.search_available = search_available;
        Ok(state)
    }

    pub fn new(
        config: Config,
        search: Arc<dyn SearchProvider>,
        verifier: Arc<dyn LinkVerifier>,
    ) -> Self {
        let cache = ResultCache::from_config(&config.cache);
        let pipeline = MatchingPipeline::new(&config, search, verifier, cache);
        let search_available = !config.is_degraded();

        Self {
            config: Arc::new(config),
            pipeline,
            search_available,
        }
    }

    pub fn is_degraded(&self) -> bool {
        !self.search_available
    }
}
