use axum::{extract::State, Json};
use serde_json::{json, Value};
use tracing::warn;

use crate::state::AppState;

/// GET /health
/// Service status plus whether the configured model can be reached.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let model_available = match state.llm.verify_model().await {
        Ok(available) => available,
        Err(e) => {
            warn!("Model check failed: {e}");
            false
        }
    };

    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": env!("CARGO_PKG_NAME"),
        "model": state.llm.model_name(),
        "model_available": model_available
    }))
}
