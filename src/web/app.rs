use axum::{
    Router,
    routing::{get, post},
};
use http::Method;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use super::{
    handlers::{get_results, healthcheck, submit_scores},
    state::AppState,
};

pub fn build_router(state: AppState) -> Router {
    // ServeDir resolves inside `asset_dir` only and refuses `..` segments.
    let assets = ServeDir::new(&state.asset_dir);
    let entry_page = ServeFile::new(&state.entry_page);

    Router::new()
        .route("/health", get(healthcheck))
        .route("/api/submit", post(submit_scores))
        .route("/api/results", get(get_results))
        .route_service("/", entry_page)
        .fallback_service(assets)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_headers(Any)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
