use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::research::models::CompanyResearch;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ResearchResponse {
    pub research: CompanyResearch,
    pub structured: String,
}

/// GET /api/v1/research/:company
///
/// Always 200 for a non-blank name; fallback records carry `research.error`.
pub async fn handle_get_research(
    State(state): State<AppState>,
    Path(company): Path<String>,
) -> Result<Json<ResearchResponse>, AppError> {
    if company.trim().is_empty() {
        return Err(AppError::Validation("company cannot be empty".to_string()));
    }

    let research = state.research.research_company(&company).await;
    let structured = research.to_structured_text();
    Ok(Json(ResearchResponse {
        research,
        structured,
    }))
}
