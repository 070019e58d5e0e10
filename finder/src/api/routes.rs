use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers;
use super::AppState;

fn v1_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/analyze", post(handlers::analyze))
        .route("/search", post(handlers::search))
        .route("/cache/stats", get(handlers::cache_stats))
        .route("/cache:clear", post(handlers::clear_cache))
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api/v1", v1_router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
