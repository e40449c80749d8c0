//! Where company research comes from.
//!
//! Sources are tried in order by the agent; the first `Ok` wins.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::research::models::{CompanyResearch, NewsItem};

pub const DEFAULT_WIKIPEDIA_API_BASE: &str = "https://en.wikipedia.org/api/rest_v1";

#[derive(Debug, Error)]
pub enum ResearchLookupError {
    #[error("no research found for {0}")]
    NotFound(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("research source returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("invalid research source URL: {0}")]
    Url(String),
}

#[async_trait]
pub trait ResearchSource: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    async fn lookup(&self, company_name: &str) -> Result<CompanyResearch, ResearchLookupError>;
}

// ─── Curated table ────────────────────────────────────────────────────────────

/// Hand-maintained research keyed by lowercase company name.
pub struct CuratedResearchSource {
    entries: HashMap<String, CompanyResearch>,
}

impl CuratedResearchSource {
    pub fn new(entries: HashMap<String, CompanyResearch>) -> Self {
        let entries = entries
            .into_iter()
            .map(|(name, research)| (name.trim().to_lowercase(), research))
            .collect();
        Self { entries }
    }

    /// The built-in table.
    pub fn builtin() -> Self {
        let mut entries = HashMap::new();
        entries.insert(
            "samsung research america".to_string(),
            CompanyResearch {
                overview: "Samsung Research America (SRA) is Samsung's North American R&D hub, \
                           driving innovation in AI, mobile platforms, and next-generation \
                           computing technologies."
                    .to_string(),
                values: vec![
                    "Innovation".to_string(),
                    "Excellence".to_string(),
                    "Integrity".to_string(),
                    "Co-prosperity".to_string(),
                ],
                focus_areas: vec![
                    "AI and Machine Learning".to_string(),
                    "Mobile Platforms".to_string(),
                    "Digital Health".to_string(),
                    "Next-Generation Computing".to_string(),
                ],
                recent_news: vec![NewsItem {
                    title: "Advancing On-Device AI".to_string(),
                    summary: "SRA continues to lead on-device AI research powering Galaxy \
                              devices."
                        .to_string(),
                    date: None,
                }],
                error: None,
            },
        );
        Self::new(entries)
    }
}

#[async_trait]
impl ResearchSource for CuratedResearchSource {
    fn name(&self) -> &'static str {
        "curated"
    }

    async fn lookup(&self, company_name: &str) -> Result<CompanyResearch, ResearchLookupError> {
        self.entries
            .get(&company_name.trim().to_lowercase())
            .cloned()
            .ok_or_else(|| ResearchLookupError::NotFound(company_name.to_string()))
    }
}

// ─── Wikipedia ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct PageSummary {
    #[serde(rename = "type", default)]
    page_type: String,
    #[serde(default)]
    extract: String,
}

/// Looks the company up via the Wikipedia REST page-summary endpoint.
pub struct WikipediaResearchSource {
    client: Client,
    base_url: String,
}

impl WikipediaResearchSource {
    pub fn new(
        base_url: impl Into<String>,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<Self, ResearchLookupError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn summary_url(&self, company_name: &str) -> Result<Url, ResearchLookupError> {
        let title = company_name.split_whitespace().collect::<Vec<_>>().join("_");
        let mut url =
            Url::parse(&self.base_url).map_err(|e| ResearchLookupError::Url(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| ResearchLookupError::Url(self.base_url.clone()))?
            .pop_if_empty()
            .extend(["page", "summary", title.as_str()]);
        Ok(url)
    }
}

#[async_trait]
impl ResearchSource for WikipediaResearchSource {
    fn name(&self) -> &'static str {
        "wikipedia"
    }

    async fn lookup(&self, company_name: &str) -> Result<CompanyResearch, ResearchLookupError> {
        let url = self.summary_url(company_name)?;
        debug!(%url, "Fetching Wikipedia summary");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ResearchLookupError::NotFound(company_name.to_string()));
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ResearchLookupError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let summary: PageSummary = response.json().await?;
        if summary.page_type == "disambiguation" || summary.extract.trim().is_empty() {
            return Err(ResearchLookupError::NotFound(company_name.to_string()));
        }

        Ok(CompanyResearch {
            overview: summary.extract.trim().to_string(),
            ..Default::default()
        })
    }
}
