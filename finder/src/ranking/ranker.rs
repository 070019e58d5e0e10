use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::RankingConfig;
use crate::degrade::{first_success, unless};
use crate::links::{alternative_link, is_listing_page};
use crate::models::{Reachability, ResolvedCandidate};

use super::curated::CuratedSet;
use super::verify::LinkVerifier;

/// Upper bound on a single ranked list: the number of unique curated
/// entries available for padding.
pub const MAX_RESULTS: usize = 20;

/// Filters, verifies and orders resolved candidates into a fixed-size list.
pub struct CandidateRanker {
    verifier: Arc<dyn LinkVerifier>,
    config: RankingConfig,
}

impl CandidateRanker {
    pub fn new(verifier: Arc<dyn LinkVerifier>, config: RankingConfig) -> Self {
        Self { verifier, config }
    }

    /// Rank `candidates` into exactly `limit` entries (clamped to
    /// `1..=MAX_RESULTS`), padding from `fallback`, then the default set,
    /// then the remaining curated sets.
    pub async fn rank(
        &self,
        candidates: Vec<ResolvedCandidate>,
        limit: usize,
        fallback: CuratedSet,
    ) -> Vec<ResolvedCandidate> {
        if !(1..=MAX_RESULTS).contains(&limit) {
            warn!(limit, max = MAX_RESULTS, "Result count out of range, clamping");
        }
        let limit = limit.clamp(1, MAX_RESULTS);
        let received = candidates.len();

        let pool = self.filter_usable(candidates);
        let pool = self.prefer_direct(pool);
        let mut pool = self.verify_top(pool).await;

        pool.retain(|c| {
            let keep = c.reachability != Reachability::Unreachable || c.is_direct_product_link;
            if !keep {
                debug!(link = %c.canonical_link, "Dropping unreachable listing link");
            }
            keep
        });

        // Stable: ties keep search engine order.
        pool.sort_by_key(|c| {
            (
                !c.is_reachable(),
                !c.is_direct_product_link,
                !c.has_price(),
            )
        });
        pool.truncate(limit);

        let live = pool.len();
        let ranked = pad(pool, limit, fallback);
        info!(
            received,
            live,
            padded = ranked.len() - live,
            fallback = fallback.name(),
            "Ranked candidates"
        );
        ranked
    }

    /// Drop imageless and obvious listing candidates, unless that leaves too
    /// few to work with.
    fn filter_usable(&self, candidates: Vec<ResolvedCandidate>) -> Vec<ResolvedCandidate> {
        let filtered: Vec<ResolvedCandidate> = candidates
            .iter()
            .filter(|c| {
                c.candidate.has_usable_image() && !is_listing_page(&c.candidate.raw_link)
            })
            .cloned()
            .collect();

        let min = self.config.min_filtered;
        unless("rank.filter", filtered, |f| f.len() >= min, || candidates)
    }

    fn prefer_direct(&self, pool: Vec<ResolvedCandidate>) -> Vec<ResolvedCandidate> {
        let direct = pool.iter().filter(|c| c.is_direct_product_link).count();
        if direct >= self.config.min_filtered {
            debug!(direct, total = pool.len(), "Keeping direct product links only");
            pool.into_iter()
                .filter(|c| c.is_direct_product_link)
                .collect()
        } else {
            pool
        }
    }

    /// Verify the first `verify_top_n` candidates with bounded concurrency.
    /// Results are joined before returning; candidates past the cut stay
    /// `Unknown`.
    async fn verify_top(&self, mut pool: Vec<ResolvedCandidate>) -> Vec<ResolvedCandidate> {
        let top_n = self.config.verify_top_n.min(pool.len());
        if top_n == 0 {
            return pool;
        }

        let timeout = Duration::from_secs(self.config.verify_timeout_secs);
        let jobs: Vec<(String, String)> = pool[..top_n]
            .iter()
            .map(|c| (c.canonical_link.clone(), c.candidate.raw_link.clone()))
            .collect();

        let outcomes: Vec<Option<String>> = stream::iter(jobs)
            .map(|(canonical, raw)| {
                verify_links(Arc::clone(&self.verifier), canonical, raw, timeout)
            })
            .buffered(self.config.verify_concurrency.max(1))
            .collect()
            .await;

        for (candidate, outcome) in pool.iter_mut().zip(outcomes) {
            debug!(title = candidate.title(), reachable = outcome.is_some(), "Verified candidate");
            match outcome {
                Some(working) => {
                    candidate.reachability = Reachability::Reachable;
                    candidate.canonical_link = working;
                }
                None => candidate.reachability = Reachability::Unreachable,
            }
        }
        pool
    }
}

/// Try the canonical link, then the raw link, then a guessed alternative.
/// Returns the first URL that answered within `timeout`.
async fn verify_links(
    verifier: Arc<dyn LinkVerifier>,
    canonical: String,
    raw: String,
    timeout: Duration,
) -> Option<String> {
    let mut urls = vec![canonical];
    let alternative = alternative_link(&raw);
    for url in [raw, alternative] {
        if !url.is_empty() && !urls.contains(&url) {
            urls.push(url);
        }
    }

    first_success(urls.into_iter().map(|url| {
        let verifier = Arc::clone(&verifier);
        move || async move {
            match tokio::time::timeout(timeout, verifier.is_reachable(&url)).await {
                Ok(true) => Some(url),
                Ok(false) => None,
                Err(_) => {
                    debug!(%url, "Verification timed out");
                    None
                }
            }
        }
    }))
    .await
}

/// Fill up to `limit` from the curated padding order, skipping titles
/// already present.
fn pad(
    mut ranked: Vec<ResolvedCandidate>,
    limit: usize,
    fallback: CuratedSet,
) -> Vec<ResolvedCandidate> {
    if ranked.len() >= limit {
        return ranked;
    }

    let mut seen: HashSet<String> = ranked.iter().map(|c| c.title().to_lowercase()).collect();
    for entry in fallback.padding_order() {
        if ranked.len() >= limit {
            break;
        }
        if seen.insert(entry.title().to_lowercase()) {
            ranked.push(entry);
        }
    }
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CandidateSource, SearchCandidate};
    use crate::ranking::{resolve_candidate, StaticVerifier};
    use async_trait::async_trait;

    struct ReachableSet(HashSet<String>);

    #[async_trait]
    impl LinkVerifier for ReachableSet {
        async fn is_reachable(&self, url: &str) -> bool {
            self.0.contains(url)
        }
    }

    fn candidate(title: &str, link: &str, snippet: &str) -> ResolvedCandidate {
        resolve_candidate(SearchCandidate {
            title: title.to_string(),
            raw_link: link.to_string(),
            display_domain: String::new(),
            snippet: snippet.to_string(),
            raw_image: Some(format!("{link}/image.jpg")),
        })
    }

    fn ranker(verifier: impl LinkVerifier + 'static) -> CandidateRanker {
        CandidateRanker::new(Arc::new(verifier), RankingConfig::default())
    }

    #[tokio::test]
    async fn test_orders_reachable_then_direct_then_priced() {
        let listing = candidate("Listing", "https://shop.example/mode", "");
        let direct_no_price = candidate("Direct", "https://shop.example/p/1", "");
        let direct_priced = candidate("Priced", "https://shop.example/p/2", "€89,00");
        let unreachable_direct = candidate("Offline", "https://shop.example/p/3", "€10,00");

        let reachable: HashSet<String> = [
            "https://shop.example/mode",
            "https://shop.example/p/1",
            "https://shop.example/p/2",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        let ranked = ranker(ReachableSet(reachable))
            .rank(
                vec![listing, unreachable_direct, direct_no_price, direct_priced],
                4,
                CuratedSet::Default,
            )
            .await;

        let titles: Vec<&str> = ranked.iter().map(|c| c.title()).collect();
        assert_eq!(titles, vec!["Priced", "Direct", "Listing", "Offline"]);
        assert!(!ranked[3].is_reachable());
    }

    #[tokio::test]
    async fn test_falls_back_to_raw_link_when_canonical_fails() {
        let raw = "https://www.asos.com/fr/asos-design/robe/prd/203080653";
        let c = candidate("Robe", raw, "");
        assert_eq!(c.canonical_link, "https://www.asos.com/fr/prd/203080653");

        let reachable: HashSet<String> = [raw.to_string()].into_iter().collect();
        let ranked = ranker(ReachableSet(reachable))
            .rank(vec![c], 1, CuratedSet::Default)
            .await;

        assert!(ranked[0].is_reachable());
        assert_eq!(ranked[0].canonical_link, raw);
    }

    #[tokio::test]
    async fn test_unreachable_listings_are_replaced_by_curated_entries() {
        let candidates = vec![
            candidate("Recherche", "https://www.zalando.fr/recherche/?q=sac", ""),
            candidate("Mode", "https://www.zalando.fr/mode/", ""),
        ];

        let ranked = ranker(StaticVerifier::new(false))
            .rank(candidates, 5, CuratedSet::SacsMarron)
            .await;

        assert_eq!(ranked, CuratedSet::SacsMarron.entries());
    }

    #[tokio::test]
    async fn test_padding_continues_into_default_set_without_duplicates() {
        let ranked = ranker(StaticVerifier::new(true))
            .rank(Vec::new(), MAX_RESULTS, CuratedSet::BottinesMarron)
            .await;

        assert_eq!(ranked.len(), MAX_RESULTS);
        let titles: HashSet<&str> = ranked.iter().map(|c| c.title()).collect();
        assert_eq!(titles.len(), MAX_RESULTS);
        assert!(ranked.iter().all(|c| c.source == CandidateSource::Curated));
    }

    #[tokio::test]
    async fn test_guessed_alternative_link_is_used_when_it_answers() {
        let raw = "https://www2.hm.com/fr_fr/robe-1115237001";
        let guessed = "https://www2.hm.com/fr_fr/productpage.1115237001.html";
        let c = candidate("Robe", raw, "");
        assert_eq!(c.canonical_link, raw);

        let reachable: HashSet<String> = [guessed.to_string()].into_iter().collect();
        let ranked = ranker(ReachableSet(reachable))
            .rank(vec![c], 1, CuratedSet::Default)
            .await;

        assert_eq!(ranked[0].title(), "Robe");
        assert_eq!(ranked[0].reachability, Reachability::Reachable);
        assert_eq!(ranked[0].canonical_link, guessed);
    }

    /// Answers immediately for URLs containing "fast", hangs otherwise.
    struct SlowVerifier;

    #[async_trait]
    impl LinkVerifier for SlowVerifier {
        async fn is_reachable(&self, url: &str) -> bool {
            if !url.contains("fast") {
                tokio::time::sleep(Duration::from_secs(30)).await;
            }
            true
        }
    }

    #[tokio::test]
    async fn test_slow_verification_times_out_without_blocking_siblings() {
        let config = RankingConfig {
            verify_timeout_secs: 1,
            ..RankingConfig::default()
        };
        let ranker = CandidateRanker::new(Arc::new(SlowVerifier), config);
        let candidates = vec![
            candidate("Slow", "https://shop.example/p/slow-1", ""),
            candidate("Fast", "https://shop.example/p/fast-2", ""),
        ];

        let started = std::time::Instant::now();
        let ranked = ranker.rank(candidates, 2, CuratedSet::Default).await;
        assert!(started.elapsed() < Duration::from_secs(10));

        let states: Vec<(&str, Reachability)> =
            ranked.iter().map(|c| (c.title(), c.reachability)).collect();
        assert_eq!(
            states,
            vec![("Fast", Reachability::Reachable), ("Slow", Reachability::Unreachable)]
        );
    }

    #[tokio::test]
    async fn test_result_count_beyond_one_set_is_filled() {
        let ranked = ranker(StaticVerifier::new(false))
            .rank(Vec::new(), 8, CuratedSet::Default)
            .await;

        assert_eq!(ranked.len(), 8);
        assert_eq!(ranked[..5], CuratedSet::Default.entries()[..]);
    }

    #[tokio::test]
    async fn test_only_top_n_are_verified() {
        let config = RankingConfig {
            verify_top_n: 2,
            min_filtered: 100,
            ..RankingConfig::default()
        };
        let ranker = CandidateRanker::new(Arc::new(StaticVerifier::new(true)), config);
        let candidates: Vec<_> = (0..4)
            .map(|i| candidate(&format!("Item {i}"), &format!("https://shop.example/p/{i}"), ""))
            .collect();

        let pool = ranker.verify_top(candidates).await;
        let states: Vec<Reachability> = pool.iter().map(|c| c.reachability).collect();
        assert_eq!(
            states,
            vec![
                Reachability::Reachable,
                Reachability::Reachable,
                Reachability::Unknown,
                Reachability::Unknown
            ]
        );
    }
}
