//! Axum route handlers for the Generation API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::generation::generator::{
    generate_cover_letter, GenerationOutcome, GenerationRequest, UploadedFile,
};
use crate::generation::quality::QualityReport;
use crate::generation::style::StyleConfig;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct QualityRequest {
    pub letter: String,
}

/// Multipart fields as they arrive; validated into a `GenerationRequest`.
#[derive(Debug, Default)]
struct GenerationForm {
    resume: Option<UploadedFile>,
    job_description: Option<String>,
    company_name: Option<String>,
    include_research: Option<String>,
    portfolio_links: Option<String>,
    tone: Option<String>,
    style: Option<String>,
    supporting_docs: Vec<UploadedFile>,
}

impl GenerationForm {
    async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = GenerationForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
        {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "resume" | "supporting_docs" => {
                    let file = UploadedFile {
                        file_name: field.file_name().unwrap_or("upload").to_string(),
                        content_type: field.content_type().map(String::from),
                        bytes: field.bytes().await.map_err(|e| {
                            AppError::Validation(format!("Failed to read '{name}': {e}"))
                        })?,
                    };
                    if name == "resume" {
                        form.resume = Some(file);
                    } else {
                        form.supporting_docs.push(file);
                    }
                }
                "job_description" | "company_name" | "include_research" | "portfolio_links"
                | "tone" | "style" => {
                    let value = field.text().await.map_err(|e| {
                        AppError::Validation(format!("Failed to read '{name}': {e}"))
                    })?;
                    let slot = match name.as_str() {
                        "job_description" => &mut form.job_description,
                        "company_name" => &mut form.company_name,
                        "include_research" => &mut form.include_research,
                        "portfolio_links" => &mut form.portfolio_links,
                        "tone" => &mut form.tone,
                        _ => &mut form.style,
                    };
                    *slot = Some(value);
                }
                other => tracing::debug!("Ignoring unknown multipart field '{other}'"),
            }
        }

        Ok(form)
    }

    fn into_request(self) -> Result<GenerationRequest, AppError> {
        let resume = self
            .resume
            .ok_or_else(|| AppError::Validation("resume file is required".to_string()))?;
        let job_description = self
            .job_description
            .filter(|jd| !jd.trim().is_empty())
            .ok_or_else(|| AppError::Validation("job_description is required".to_string()))?;

        Ok(GenerationRequest {
            resume,
            job_description,
            company_name: self.company_name,
            include_research: self
                .include_research
                .as_deref()
                .map(parse_flag)
                .unwrap_or(true),
            portfolio_links: self
                .portfolio_links
                .map(|links| links.lines().map(String::from).collect())
                .unwrap_or_default(),
            style: StyleConfig::from_optional(self.tone.as_deref(), self.style.as_deref()),
            supporting_docs: self.supporting_docs,
        })
    }
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "false" | "0" | "no" | "off"
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/cover-letters
///
/// Multipart: `resume` (file), `job_description`, optional `company_name`,
/// `include_research`, `portfolio_links` (one per line), `tone`, `style`,
/// and repeatable `supporting_docs` files.
pub async fn handle_generate(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<GenerationOutcome>, AppError> {
    let request = GenerationForm::read(multipart).await?.into_request()?;
    let outcome = generate_cover_letter(&state, request).await?;
    Ok(Json(outcome))
}

/// POST /api/v1/cover-letters/quality
///
/// Scores an existing letter without generating anything.
pub async fn handle_quality(
    State(state): State<AppState>,
    Json(request): Json<QualityRequest>,
) -> Result<Json<QualityReport>, AppError> {
    if request.letter.trim().is_empty() {
        return Err(AppError::Validation("letter cannot be empty".to_string()));
    }
    Ok(Json(state.quality.analyze(&request.letter)))
}
