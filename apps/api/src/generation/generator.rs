//! Cover letter generation: orchestrates one run of the pipeline.
//!
//! Flow: (extract uploads ‖ research company ‖ analyze portfolio) → process JD
//!       → scan resume → assemble facts → compose → LLM generate → format
//!       → quality check → return.
//!
//! Nothing is persisted. Supporting documents are extracted so a corrupt upload
//! fails the run, but they contribute no facts.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::documents::extract::extract_document;
use crate::documents::jd_parser::{extract_company_name, extract_job_sections};
use crate::documents::models::{DocumentSource, RawDocument};
use crate::documents::resume_scanner::extract_resume_blocks;
use crate::errors::AppError;
use crate::generation::composer::compose;
use crate::generation::facts::{assemble, FactLabel, WithheldFact};
use crate::generation::quality::QualityReport;
use crate::generation::style::StyleConfig;
use crate::portfolio::models::PortfolioAnalysis;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// An uploaded file as received from the client.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub resume: UploadedFile,
    pub job_description: String,
    /// Inferred from the job description when absent.
    pub company_name: Option<String>,
    pub include_research: bool,
    pub portfolio_links: Vec<String>,
    pub style: StyleConfig,
    pub supporting_docs: Vec<UploadedFile>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneratedLetter {
    pub id: Uuid,
    pub raw_text: String,
    pub formatted_text: String,
    pub generated_at: DateTime<Utc>,
}

/// Which inputs actually reached the prompt.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SourcesUsed {
    pub resume: bool,
    pub supporting_docs: usize,
    pub portfolio: bool,
    pub github_projects: usize,
    pub company_research: bool,
    pub withheld: Vec<WithheldFact>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationOutcome {
    pub letter: GeneratedLetter,
    pub quality: QualityReport,
    pub sources_used: SourcesUsed,
    pub portfolio: Option<PortfolioAnalysis>,
    pub company_name: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Resume plus supporting documents, extracted on the blocking pool.
async fn extract_uploads(
    resume: UploadedFile,
    supporting_docs: Vec<UploadedFile>,
    max_bytes: usize,
) -> Result<(RawDocument, Vec<RawDocument>), AppError> {
    let extracted = tokio::task::spawn_blocking(move || {
        let extract = |source, file: &UploadedFile| {
            extract_document(
                source,
                &file.file_name,
                file.content_type.as_deref(),
                &file.bytes,
                max_bytes,
            )
        };
        let resume = extract(DocumentSource::Resume, &resume)?;
        let supporting = supporting_docs
            .iter()
            .map(|doc| extract(DocumentSource::SupportingDoc, doc))
            .collect::<Result<Vec<_>, _>>()?;
        Ok::<_, AppError>((resume, supporting))
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Extraction task failed: {e}")))??;

    Ok(extracted)
}

/// Runs the full generation pipeline.
///
/// Steps:
/// 1. Join point: uploads ‖ company research ‖ portfolio analysis
/// 2. extract_job_sections() + extract_resume_blocks() → assemble()
/// 3. compose() → LanguageModel::generate()
/// 4. ResponseFormatter::format() → QualityChecker::analyze()
#[instrument(skip_all, fields(tone = request.style.tone.as_str(), style = request.style.style.as_str()))]
pub async fn generate_cover_letter(
    state: &AppState,
    request: GenerationRequest,
) -> Result<GenerationOutcome, AppError> {
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }

    let company_name = request
        .company_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .or_else(|| extract_company_name(&request.job_description));
    info!(company = ?company_name, "Starting cover letter generation");

    let links: Vec<String> = request
        .portfolio_links
        .iter()
        .map(|link| link.trim().to_string())
        .filter(|link| !link.is_empty())
        .collect();

    // Step 1: concurrent join point
    let include_research = request.include_research;
    let uploads = extract_uploads(
        request.resume,
        request.supporting_docs,
        state.config.max_upload_bytes,
    );
    let research = async {
        match (&company_name, include_research) {
            (Some(name), true) => Some(state.research.research_company(name).await),
            _ => None,
        }
    };
    let portfolio = async {
        if links.is_empty() {
            None
        } else {
            Some(state.portfolio.analyze_portfolio(&links).await)
        }
    };
    let (uploads, research, portfolio) = tokio::join!(uploads, research, portfolio);
    let (resume, supporting_docs) = uploads?;

    // Step 2: structure and assemble
    let job_description = extract_job_sections(&request.job_description);
    let resume_blocks = extract_resume_blocks(resume.text());
    if resume_blocks.is_empty() {
        warn!("No labeled sections found in resume; letter will rely on the job description");
    }
    for doc in &supporting_docs {
        debug!(
            source = doc.source().as_str(),
            chars = doc.text().len(),
            "Supporting document extracted; not used as a fact"
        );
    }
    let facts = assemble(
        &resume_blocks,
        &job_description,
        portfolio.as_ref(),
        research.as_ref(),
    );

    // Step 3: compose and generate
    let prompt = compose(
        &facts,
        &request.style,
        company_name.as_deref().unwrap_or_default(),
    )?;
    let raw_text = state.llm.generate(&prompt, &state.config.generation).await?;
    info!(
        model = state.llm.model_name(),
        chars = raw_text.len(),
        "Model returned letter"
    );

    // Step 4: format and check
    let formatted_text = state.formatter.format(&raw_text);
    let quality = state.quality.analyze(&formatted_text);
    info!(
        passed = quality.passed,
        words = quality.word_count,
        readability = quality.readability_score,
        "Quality check complete"
    );

    let sources_used = SourcesUsed {
        resume: true,
        supporting_docs: supporting_docs.len(),
        portfolio: facts.has(FactLabel::Portfolio),
        github_projects: portfolio.as_ref().map_or(0, |p| p.github_repos.len()),
        company_research: facts.has(FactLabel::CompanyResearch),
        withheld: facts.withheld.clone(),
    };

    Ok(GenerationOutcome {
        letter: GeneratedLetter {
            id: Uuid::new_v4(),
            raw_text,
            formatted_text,
            generated_at: Utc::now(),
        },
        quality,
        sources_used,
        portfolio,
        company_name,
    })
}
