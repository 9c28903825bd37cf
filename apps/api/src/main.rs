mod config;
mod errors;
mod extract;
mod market;
mod roadmap;
mod routes;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::extract::SkillExtractor;
use crate::market::MarketAnalyzer;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::SkillStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SkillCompass API v{}", env!("CARGO_PKG_VERSION"));

    // Load reference data once; shared read-only for the process lifetime.
    let store = Arc::new(SkillStore::load()?);
    info!("Skill store loaded ({} skills)", store.skill_count());

    let extractor = Arc::new(SkillExtractor::load()?);
    info!(
        "Skill extractor initialized ({} known skills)",
        extractor.skill_count()
    );

    let market = Arc::new(MarketAnalyzer::load()?);
    info!(
        "Market analyzer loaded ({} skills, {} roles)",
        market.tracked_skill_count(),
        market.role_count()
    );

    // Build app state
    let state = AppState {
        store,
        extractor,
        market,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
