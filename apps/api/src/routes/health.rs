use axum::Json;
use serde_json::{json, Value};

/// GET / and GET /health
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "skillcompass-api"
    }))
}
