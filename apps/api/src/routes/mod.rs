pub mod health;
pub mod stats;

use axum::{
    routing::{get, post},
    Router,
};

use crate::extract::handlers as extract_handlers;
use crate::market::handlers as market_handlers;
use crate::roadmap::handlers as roadmap_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::health_handler))
        .route("/health", get(health::health_handler))
        // Skill extraction
        .route(
            "/api/v1/skills/extract",
            post(extract_handlers::handle_extract),
        )
        .route(
            "/api/v1/skills/extract-text",
            post(extract_handlers::handle_extract_text),
        )
        // Market analysis
        .route("/api/v1/skills/rank", post(market_handlers::handle_rank))
        .route("/api/v1/roles", get(market_handlers::handle_roles))
        .route(
            "/api/v1/roles/compare",
            post(market_handlers::handle_compare_role),
        )
        // Roadmap generation
        .route(
            "/api/v1/roadmap",
            post(roadmap_handlers::handle_generate_roadmap),
        )
        .route("/api/v1/analyze", post(roadmap_handlers::handle_analyze))
        // Service stats
        .route("/api/v1/stats", get(stats::stats_handler))
        .with_state(state)
}
