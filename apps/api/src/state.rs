use std::sync::Arc;

use crate::extract::SkillExtractor;
use crate::market::MarketAnalyzer;
use crate::store::SkillStore;

/// Shared application state injected into all route handlers via Axum
/// extractors. Everything here is immutable after startup (the store's
/// lookup cache uses interior mutability), so requests share it freely.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SkillStore>,
    pub extractor: Arc<SkillExtractor>,
    pub market: Arc<MarketAnalyzer>,
}
