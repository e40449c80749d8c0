use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::generation::formatter::ResponseFormatter;
use crate::generation::quality::QualityChecker;
use crate::llm_client::{LanguageModel, LlmClient};
use crate::portfolio::fetcher::HttpPortfolioFetcher;
use crate::portfolio::PortfolioAgent;
use crate::research::cache::ResearchCache;
use crate::research::source::{CuratedResearchSource, ResearchSource, WikipediaResearchSource};
use crate::research::CompanyResearchAgent;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Swappable so the pipeline and routes can run against a stub model.
    pub llm: Arc<dyn LanguageModel>,
    pub research: Arc<CompanyResearchAgent>,
    pub portfolio: Arc<PortfolioAgent>,
    pub formatter: ResponseFormatter,
    pub quality: QualityChecker,
}

impl AppState {
    /// Wires the production collaborators from configuration.
    pub fn from_config(config: Config) -> Result<Self> {
        let llm = LlmClient::new(
            &config.ollama_host,
            &config.model_name,
            Duration::from_secs(config.llm_timeout_secs),
        )
        .context("Failed to build LLM client")?;

        let collaborator_timeout = Duration::from_secs(config.collaborator_timeout_secs);
        let wikipedia = WikipediaResearchSource::new(
            config.wikipedia_api_base.clone(),
            &config.user_agent,
            collaborator_timeout,
        )
        .context("Failed to build Wikipedia client")?;
        let curated: Arc<dyn ResearchSource> = Arc::new(CuratedResearchSource::builtin());
        let wikipedia: Arc<dyn ResearchSource> = Arc::new(wikipedia);
        let cache = ResearchCache::new(
            config.research_cache_dir.clone(),
            config.research_cache_ttl_secs,
        );

        let fetcher = HttpPortfolioFetcher::new(
            config.github_api_base.clone(),
            &config.user_agent,
            collaborator_timeout,
        )
        .context("Failed to build portfolio HTTP client")?;

        Ok(Self::new(
            config,
            Arc::new(llm),
            Arc::new(CompanyResearchAgent::new(vec![curated, wikipedia], Some(cache))),
            Arc::new(PortfolioAgent::new(Arc::new(fetcher))),
        ))
    }

    pub fn new(
        config: Config,
        llm: Arc<dyn LanguageModel>,
        research: Arc<CompanyResearchAgent>,
        portfolio: Arc<PortfolioAgent>,
    ) -> Self {
        Self {
            formatter: ResponseFormatter::new(config.signature.clone()),
            quality: QualityChecker::new(config.quality),
            config: Arc::new(config),
            llm,
            research,
            portfolio,
        }
    }
}
