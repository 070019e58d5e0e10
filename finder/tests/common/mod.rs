#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use fashion_finder::cache::ResultCache;
use fashion_finder::config::{CacheConfig, Config, QueryConfig, RankingConfig, ServerConfig};
use fashion_finder::error::{FinderError, Result};
use fashion_finder::models::{ItemType, SearchCandidate};
use fashion_finder::ranking::StaticVerifier;
use fashion_finder::search::SearchProvider;
use fashion_finder::MatchingPipeline;

/// Search provider returning canned hits and counting calls.
pub struct StubSearch {
    hits: Option<Vec<SearchCandidate>>,
    calls: AtomicUsize,
}

impl StubSearch {
    pub fn returning(hits: Vec<SearchCandidate>) -> Arc<Self> {
        Arc::new(Self {
            hits: Some(hits),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn unavailable() -> Arc<Self> {
        Arc::new(Self {
            hits: None,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SearchProvider for StubSearch {
    async fn search(&self, _query: &str, _item_type: ItemType) -> Result<Vec<SearchCandidate>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.hits {
            Some(hits) => Ok(hits.clone()),
            None => Err(FinderError::SearchUnavailable("no credentials".to_string())),
        }
    }
}

pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        search: None,
        query: QueryConfig::default(),
        ranking: RankingConfig::default(),
        cache: CacheConfig::default(),
    }
}

pub fn pipeline(search: Arc<StubSearch>, reachable: bool) -> MatchingPipeline {
    pipeline_with(test_config(), search, reachable)
}

pub fn pipeline_with(config: Config, search: Arc<StubSearch>, reachable: bool) -> MatchingPipeline {
    let cache = ResultCache::from_config(&config.cache);
    MatchingPipeline::new(
        &config,
        search,
        Arc::new(StaticVerifier::new(reachable)),
        cache,
    )
}

/// A product-page hit on a generic shop, with image and price.
pub fn product_hit(n: usize) -> SearchCandidate {
    SearchCandidate {
        title: format!("Sacoche cuir marron modèle {n}"),
        raw_link: format!("https://shop.example/p/{n}"),
        display_domain: "shop.example".to_string(),
        snippet: format!("Cuir pleine fleur. {}9,00 €", n + 1),
        raw_image: Some(format!("https://img.shop.example/{n}.jpg")),
    }
}

/// A listing hit that ranking should never keep when unreachable.
pub fn listing_hit(n: usize) -> SearchCandidate {
    SearchCandidate {
        title: format!("Recherche sacs {n}"),
        raw_link: format!("https://shop.example/recherche?q=sac&page={n}"),
        display_domain: "shop.example".to_string(),
        snippet: String::new(),
        raw_image: None,
    }
}
