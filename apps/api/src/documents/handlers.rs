use axum::Json;
use serde::{Deserialize, Serialize};

use crate::documents::jd_parser::{extract_company_name, extract_job_sections};
use crate::documents::models::ProcessedJobDescription;
use crate::errors::AppError;

#[derive(Debug, Deserialize)]
pub struct ParseJdRequest {
    pub jd_text: String,
}

#[derive(Debug, Serialize)]
pub struct ParseJdResponse {
    pub processed: ProcessedJobDescription,
    pub company_name: Option<String>,
}

/// POST /api/v1/job-descriptions/parse
///
/// Previews what the heuristic extractor pulls out of a job description.
pub async fn handle_parse_jd(
    Json(request): Json<ParseJdRequest>,
) -> Result<Json<ParseJdResponse>, AppError> {
    if request.jd_text.trim().is_empty() {
        return Err(AppError::Validation("jd_text cannot be empty".to_string()));
    }

    Ok(Json(ParseJdResponse {
        processed: extract_job_sections(&request.jd_text),
        company_name: extract_company_name(&request.jd_text),
    }))
}
