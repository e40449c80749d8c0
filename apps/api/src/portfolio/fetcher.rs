//! Network access for portfolio analysis.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;
use url::Url;

pub const DEFAULT_GITHUB_API_BASE: &str = "https://api.github.com";

#[derive(Debug, Error)]
pub enum PortfolioAnalysisError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("invalid URL: {0}")]
    Url(String),
}

/// One entry of `GET /users/{user}/repos`, trimmed to what we use.
#[derive(Debug, Clone, Deserialize)]
pub struct RepoRecord {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    pub language: Option<String>,
    pub html_url: String,
    #[serde(default)]
    pub fork: bool,
}

#[async_trait]
pub trait PortfolioFetcher: Send + Sync {
    /// Public repositories of a GitHub user, forks included.
    async fn list_repos(&self, username: &str) -> Result<Vec<RepoRecord>, PortfolioAnalysisError>;

    /// Raw HTML of a portfolio page.
    async fn fetch_page(&self, url: &Url) -> Result<String, PortfolioAnalysisError>;
}

pub struct HttpPortfolioFetcher {
    client: Client,
    github_api_base: String,
}

impl HttpPortfolioFetcher {
    pub fn new(
        github_api_base: impl Into<String>,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<Self, PortfolioAnalysisError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            github_api_base: github_api_base.into().trim_end_matches('/').to_string(),
        })
    }

    fn repos_url(&self, username: &str) -> Result<Url, PortfolioAnalysisError> {
        let mut url = Url::parse(&self.github_api_base)
            .map_err(|e| PortfolioAnalysisError::Url(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| PortfolioAnalysisError::Url(self.github_api_base.clone()))?
            .pop_if_empty()
            .extend(["users", username, "repos"]);
        url.query_pairs_mut().append_pair("per_page", "100");
        Ok(url)
    }
}

#[async_trait]
impl PortfolioFetcher for HttpPortfolioFetcher {
    async fn list_repos(&self, username: &str) -> Result<Vec<RepoRecord>, PortfolioAnalysisError> {
        let url = self.repos_url(username)?;
        debug!(%url, "Listing GitHub repositories");

        let response = self
            .client
            .get(url.clone())
            .header("Accept", "application/vnd.github+json")
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(PortfolioAnalysisError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }
        Ok(response.json().await?)
    }

    async fn fetch_page(&self, url: &Url) -> Result<String, PortfolioAnalysisError> {
        debug!(%url, "Fetching portfolio page");
        let response = self.client.get(url.clone()).send().await?;
        if !response.status().is_success() {
            return Err(PortfolioAnalysisError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }
        Ok(response.text().await?)
    }
}
