use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::portfolio::models::PortfolioAnalysis;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzePortfolioRequest {
    pub urls: Vec<String>,
}

/// POST /api/v1/portfolio/analyze
pub async fn handle_analyze_portfolio(
    State(state): State<AppState>,
    Json(request): Json<AnalyzePortfolioRequest>,
) -> Result<Json<PortfolioAnalysis>, AppError> {
    if request.urls.iter().all(|u| u.trim().is_empty()) {
        return Err(AppError::Validation("urls cannot be empty".to_string()));
    }

    let analysis = state.portfolio.analyze_portfolio(&request.urls).await;
    Ok(Json(analysis))
}
