use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use crate::api::dto::{ClearCacheResponse, HealthData, SearchRequest, SearchResponse};
use crate::api::response::{ApiResponse, ErrorCode};
use crate::api::state::AppState;
use crate::cache::CacheStats;
use crate::models::{AnalysisResult, VisionResult};

/// `POST /api/v1/analyze`
pub async fn analyze(
    State(state): State<AppState>,
    body: Result<Json<VisionResult>, JsonRejection>,
) -> ApiResponse<AnalysisResult> {
    let Json(vision) = match body {
        Ok(body) => body,
        Err(rejection) => {
            return ApiResponse::error(ErrorCode::InvalidRequest, rejection.body_text());
        }
    };

    ApiResponse::success(state.pipeline.analyze(vision))
}

/// `POST /api/v1/search`
///
/// An empty query falls back to the generic query rather than failing.
pub async fn search(
    State(state): State<AppState>,
    body: Result<Json<SearchRequest>, JsonRejection>,
) -> ApiResponse<SearchResponse> {
    let Json(req) = match body {
        Ok(body) => body,
        Err(rejection) => {
            return ApiResponse::error(ErrorCode::InvalidRequest, rejection.body_text());
        }
    };

    let results = state
        .pipeline
        .search(&req.query, req.item_type, req.color.as_deref())
        .await;

    ApiResponse::success(SearchResponse {
        query: req.query,
        item_type: req.item_type,
        results,
    })
}

/// `GET /api/v1/cache/stats`
pub async fn cache_stats(State(state): State<AppState>) -> ApiResponse<CacheStats> {
    ApiResponse::success(state.pipeline.cache_stats())
}

/// `POST /api/v1/cache:clear`
pub async fn clear_cache(State(state): State<AppState>) -> ApiResponse<ClearCacheResponse> {
    state.pipeline.clear_cache();
    ApiResponse::success(ClearCacheResponse { cleared: true })
}

/// `GET /api/v1/health`
pub async fn health_check(State(state): State<AppState>) -> ApiResponse<HealthData> {
    let degraded = state.is_degraded();
    ApiResponse::success(HealthData {
        status: if degraded { "degraded" } else { "ok" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        degraded,
    })
}
