use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use crate::cache::{CacheRequest, CacheStats, CachedValue, ResultCache};
use crate::color::{palette, ColorClassifier, ColorTable};
use crate::config::Config;
use crate::degrade;
use crate::error::FinderError;
use crate::models::{AnalysisResult, ItemType, ResolvedCandidate, VisionResult};
use crate::query::QueryBuilder;
use crate::ranking::{resolve_candidate, CandidateRanker, CuratedSet, LinkVerifier};
use crate::search::SearchProvider;
use crate::taxonomy::{extract, find_main_object, item_type_hint};

/// Composition root for image analysis and product matching.
///
/// `analyze` is CPU-only; `search` is the only step that performs I/O.
/// Neither surfaces an error: failures degrade to fallback data.
#[derive(Clone)]
pub struct MatchingPipeline {
    classifier: Arc<ColorClassifier>,
    query_builder: QueryBuilder,
    search: Arc<dyn SearchProvider>,
    ranker: Arc<CandidateRanker>,
    cache: ResultCache,
    result_count: usize,
    fallback_query: String,
}

impl MatchingPipeline {
    pub fn new(
        config: &Config,
        search: Arc<dyn SearchProvider>,
        verifier: Arc<dyn LinkVerifier>,
        cache: ResultCache,
    ) -> Self {
        Self {
            classifier: Arc::new(ColorClassifier::default()),
            query_builder: QueryBuilder::new(config.query.clone()),
            search,
            ranker: Arc::new(CandidateRanker::new(verifier, config.ranking.clone())),
            cache,
            result_count: config.ranking.result_count,
            fallback_query: config.query.fallback_query.clone(),
        }
    }

    /// Replace the colour table used for classification.
    pub fn with_color_table(mut self, table: ColorTable) -> Self {
        self.classifier = Arc::new(ColorClassifier::new(table));
        self
    }

    pub fn analyze(&self, vision: VisionResult) -> AnalysisResult {
        let vision = vision.sanitize();
        let request = CacheRequest::Analysis {
            image_hash: vision.content_hash(),
        };

        if let Some(CachedValue::Analysis(cached)) = self.cache.get(&request) {
            debug!("Analysis served from cache");
            return *cached;
        }

        let palette = palette::dedupe(&vision.dominant_colors);
        let classified_colors = self.classifier.classify_all(&palette);
        let color_description = self.classifier.describe(&classified_colors);

        let main_object = find_main_object(&vision.objects);
        let fashion_terms = extract(&vision.text_signals());
        let mut search_query = self.query_builder.build(&fashion_terms, &classified_colors);

        if search_query.item_type == ItemType::Default {
            if let Some(object) = main_object {
                search_query.item_type = item_type_hint(object);
            }
        }

        let result = AnalysisResult {
            item_type: search_query.item_type,
            main_object: main_object.map(|o| o.name.clone()),
            classified_colors,
            color_description,
            fashion_terms,
            search_query,
        };

        info!(
            query = %result.search_query,
            item_type = %result.item_type,
            colors = %result.color_description,
            terms = result.fashion_terms.len(),
            "Image analysed"
        );

        self.cache
            .set(&request, CachedValue::Analysis(Box::new(result.clone())));
        result
    }

    /// Always returns exactly the configured result count.
    pub async fn search(
        &self,
        query: &str,
        item_type: ItemType,
        color: Option<&str>,
    ) -> Vec<ResolvedCandidate> {
        let query = match query.trim() {
            "" => self.fallback_query.as_str(),
            trimmed => trimmed,
        };
        let color = color.map(str::trim).filter(|c| !c.is_empty());

        let request = CacheRequest::Search {
            query: query.to_string(),
            item_type,
            color: color.map(str::to_string),
        };
        if let Some(CachedValue::Candidates(cached)) = self.cache.get(&request) {
            debug!(query, "Search served from cache");
            return cached;
        }

        let start = Instant::now();
        let (raw, live) = match self.search.search(query, item_type).await {
            Ok(found) => (found, true),
            Err(FinderError::SearchUnavailable(reason)) => {
                debug!(%reason, "Search unavailable, using curated results");
                (Vec::new(), false)
            }
            Err(e) => (
                degrade::with_fallback("search.provider", Err::<Vec<_>, _>(e), Vec::new),
                false,
            ),
        };

        let resolved = raw.into_iter().map(resolve_candidate).collect();
        let fallback = CuratedSet::for_color_name(item_type, color);
        let ranked = self.ranker.rank(resolved, self.result_count, fallback).await;

        info!(
            query,
            item_type = %item_type,
            live,
            results = ranked.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Search completed"
        );

        if live {
            self.cache
                .set(&request, CachedValue::Candidates(ranked.clone()));
        }
        ranked
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
        info!("Result cache cleared");
    }
}
