mod common;

use pretty_assertions::assert_eq;
use serde_json::json;

use common::{listing_hit, pipeline, pipeline_with, product_hit, test_config, StubSearch};
use fashion_finder::models::{CandidateSource, ItemType, TermCategory, VisionResult};
use fashion_finder::ranking::CuratedSet;

fn brown_boot_vision() -> VisionResult {
    serde_json::from_value(json!({
        "labels": [
            { "description": "chelsea boot", "score": 0.9 },
            { "description": "Footwear", "score": 0.8 },
            { "description": "", "score": 0.7 }
        ],
        "objects": [{ "name": "Boot", "score": 0.85 }],
        "dominantColors": [
            { "red": 120, "green": 70, "blue": 20, "score": 0.8, "pixelFraction": 0.6 },
            { "red": 250, "green": 250, "blue": 250, "score": 0.1, "pixelFraction": 0.3 }
        ],
        "imageHash": "brown-boot"
    }))
    .unwrap()
}

#[test]
fn test_analyze_brown_chelsea_boot() {
    let pipeline = pipeline(StubSearch::unavailable(), true);
    let analysis = pipeline.analyze(brown_boot_vision());

    assert_eq!(analysis.item_type, ItemType::Chaussure);
    assert_eq!(analysis.primary_color(), Some("Marron"));
    assert!(analysis.color_description.starts_with("Marron"));
    assert_eq!(analysis.main_object.as_deref(), Some("Boot"));

    let shoes = analysis.fashion_terms.get(TermCategory::Shoes);
    assert!(shoes.iter().any(|t| t.term == "chelsea boot"));
    assert!(analysis
        .fashion_terms
        .materials
        .iter()
        .any(|t| t.derived_from.as_deref() == Some("chelsea boot")));

    let query = &analysis.search_query;
    assert!(query.word_count() <= 8, "query too long: {query}");
    assert!(query.text().contains("chelsea"));
    assert!(query.text().ends_with("acheter"));
}

#[test]
fn test_analyze_is_cached_by_image_hash() {
    let pipeline = pipeline(StubSearch::unavailable(), true);
    let first = pipeline.analyze(brown_boot_vision());
    let second = pipeline.analyze(brown_boot_vision());

    assert_eq!(first, second);
    let stats = pipeline.cache_stats();
    assert_eq!((stats.hits, stats.misses), (1, 1));
}

#[test]
fn test_analyze_empty_vision_still_produces_query() {
    let pipeline = pipeline(StubSearch::unavailable(), true);
    let analysis = pipeline.analyze(VisionResult::default());

    assert_eq!(analysis.classified_colors.len(), 1);
    assert_eq!(analysis.primary_color(), Some("Bleu foncé"));
    assert_eq!(analysis.item_type, ItemType::Default);
    assert_eq!(analysis.search_query.text(), "vêtement mode acheter");
}

#[tokio::test]
async fn test_search_always_returns_five() {
    for count in [0, 3, 50] {
        let hits = (0..count).map(product_hit).collect();
        let pipeline = pipeline(StubSearch::returning(hits), true);

        let results = pipeline
            .search("sacoche cuir marron", ItemType::Sac, Some("marron"))
            .await;
        assert_eq!(results.len(), 5, "for {count} candidates");
    }
}

#[tokio::test]
async fn test_live_results_rank_before_padding() {
    let hits = (0..3).map(product_hit).collect();
    let pipeline = pipeline(StubSearch::returning(hits), true);

    let results = pipeline
        .search("sacoche cuir", ItemType::Sac, Some("marron"))
        .await;

    assert!(results[..3]
        .iter()
        .all(|c| c.source == CandidateSource::Search && c.is_reachable()));
    assert!(results[3..]
        .iter()
        .all(|c| c.source == CandidateSource::Curated));
}

#[tokio::test]
async fn test_no_usable_candidates_gives_curated_bags_verbatim() {
    let hits = (0..4).map(listing_hit).collect();
    let pipeline = pipeline(StubSearch::returning(hits), false);

    let results = pipeline.search("sac marron", ItemType::Sac, Some("marron")).await;
    assert_eq!(results, CuratedSet::SacsMarron.entries());
}

#[tokio::test]
async fn test_unavailable_search_falls_back_and_is_not_cached() {
    let search = StubSearch::unavailable();
    let pipeline = pipeline(search.clone(), true);

    let first = pipeline
        .search("robe cape", ItemType::Vetement, Some("Bleu marine"))
        .await;
    assert_eq!(first, CuratedSet::RobesBleu.entries());

    pipeline
        .search("robe cape", ItemType::Vetement, Some("Bleu marine"))
        .await;
    assert_eq!(search.calls(), 2);
}

#[tokio::test]
async fn test_live_search_is_cached() {
    let search = StubSearch::returning((0..6).map(product_hit).collect());
    let pipeline = pipeline(search.clone(), true);

    let first = pipeline.search("sacoche", ItemType::Sac, None).await;
    let second = pipeline.search("  Sacoche ", ItemType::Sac, None).await;

    assert_eq!(first, second);
    assert_eq!(search.calls(), 1);

    pipeline.clear_cache();
    pipeline.search("sacoche", ItemType::Sac, None).await;
    assert_eq!(search.calls(), 2);
}

#[tokio::test]
async fn test_empty_query_uses_fallback_query() {
    let pipeline = pipeline(StubSearch::returning(Vec::new()), true);
    let results = pipeline.search("   ", ItemType::Default, None).await;
    assert_eq!(results, CuratedSet::Default.entries());
}

#[tokio::test]
async fn test_configured_result_count_above_one_set_is_honoured() {
    let mut config = test_config();
    config.ranking.result_count = 8;
    let pipeline = pipeline_with(config, StubSearch::unavailable(), true);

    let results = pipeline.search("robe", ItemType::Default, None).await;
    assert_eq!(results.len(), 8);
    assert!(results.iter().all(|c| c.source == CandidateSource::Curated));
}
