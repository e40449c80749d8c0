// Portfolio analysis: GitHub repositories and Behance projects from a list of links.
// Per-link failures are logged and skipped; analysis itself never fails.

pub mod fetcher;
pub mod handlers;
pub mod models;

use std::sync::{Arc, LazyLock};

use scraper::{Html, Selector};
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::portfolio::fetcher::PortfolioFetcher;
use crate::portfolio::models::{
    BehanceProject, GithubRepo, PortfolioAnalysis, NO_DESCRIPTION, NO_LANGUAGE,
};

/// Projects taken from a single Behance page.
const MAX_BEHANCE_PROJECTS: usize = 3;

static PROJECT_TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.Project-title").expect("project title selector is valid"));

#[derive(Debug, Clone, PartialEq)]
enum PortfolioLink {
    Github { username: String },
    Behance(Url),
    Other,
}

fn classify_link(raw: &str) -> PortfolioLink {
    let Ok(url) = Url::parse(raw) else {
        return PortfolioLink::Other;
    };
    let host = url.host_str().unwrap_or_default().to_ascii_lowercase();

    if host.contains("github.com") {
        let username = url
            .path_segments()
            .and_then(|mut segments| segments.next())
            .unwrap_or_default();
        if username.is_empty() {
            return PortfolioLink::Other;
        }
        return PortfolioLink::Github {
            username: username.to_string(),
        };
    }
    if host.contains("behance.net") {
        return PortfolioLink::Behance(url);
    }
    PortfolioLink::Other
}

/// First three non-empty `div.Project-title` texts on a Behance page.
pub fn parse_behance_projects(html: &str, page_url: &str) -> Vec<BehanceProject> {
    let document = Html::parse_document(html);
    document
        .select(&PROJECT_TITLE)
        .map(|node| {
            node.text()
                .collect::<String>()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|title| !title.is_empty())
        .take(MAX_BEHANCE_PROJECTS)
        .map(|title| BehanceProject {
            title,
            url: page_url.to_string(),
        })
        .collect()
}

pub struct PortfolioAgent {
    fetcher: Arc<dyn PortfolioFetcher>,
}

impl PortfolioAgent {
    pub fn new(fetcher: Arc<dyn PortfolioFetcher>) -> Self {
        Self { fetcher }
    }

    #[instrument(skip_all, fields(links = urls.len()))]
    pub async fn analyze_portfolio(&self, urls: &[String]) -> PortfolioAnalysis {
        let mut analysis = PortfolioAnalysis::default();

        for raw in urls.iter().map(|u| u.trim()).filter(|u| !u.is_empty()) {
            match classify_link(raw) {
                PortfolioLink::Github { username } => {
                    match self.fetcher.list_repos(&username).await {
                        Ok(records) => analysis.github_repos.extend(
                            records
                                .into_iter()
                                .filter(|record| !record.fork)
                                .map(|record| GithubRepo {
                                    name: record.name,
                                    description: record
                                        .description
                                        .filter(|d| !d.trim().is_empty())
                                        .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
                                    stars: record.stargazers_count,
                                    language: record
                                        .language
                                        .unwrap_or_else(|| NO_LANGUAGE.to_string()),
                                    url: record.html_url,
                                }),
                        ),
                        Err(e) => warn!("Skipping GitHub profile {raw}: {e}"),
                    }
                }
                PortfolioLink::Behance(url) => match self.fetcher.fetch_page(&url).await {
                    Ok(html) => analysis
                        .behance_projects
                        .extend(parse_behance_projects(&html, raw)),
                    Err(e) => warn!("Skipping Behance page {raw}: {e}"),
                },
                PortfolioLink::Other => analysis.other_links.push(raw.to_string()),
            }
        }

        if analysis.is_empty() {
            debug!("No portfolio projects found");
        }
        analysis.summary = analysis.render_summary();
        info!(
            github_repos = analysis.github_repos.len(),
            behance_projects = analysis.behance_projects.len(),
            other_links = analysis.other_links.len(),
            "Portfolio analyzed"
        );
        analysis
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::fetcher::{PortfolioAnalysisError, RepoRecord};
    use async_trait::async_trait;

    struct StubFetcher {
        repos: Vec<RepoRecord>,
        page: Option<String>,
    }

    #[async_trait]
    impl PortfolioFetcher for StubFetcher {
        async fn list_repos(
            &self,
            username: &str,
        ) -> Result<Vec<RepoRecord>, PortfolioAnalysisError> {
            if username == "ghost" {
                return Err(PortfolioAnalysisError::Status {
                    url: format!("/users/{username}/repos"),
                    status: 404,
                });
            }
            Ok(self.repos.clone())
        }

        async fn fetch_page(&self, url: &Url) -> Result<String, PortfolioAnalysisError> {
            self.page.clone().ok_or_else(|| PortfolioAnalysisError::Status {
                url: url.to_string(),
                status: 503,
            })
        }
    }

    fn repo(name: &str, fork: bool) -> RepoRecord {
        RepoRecord {
            name: name.to_string(),
            description: None,
            stargazers_count: 1,
            language: None,
            html_url: format!("https://github.com/dev/{name}"),
            fork,
        }
    }

    fn agent(repos: Vec<RepoRecord>, page: Option<&str>) -> PortfolioAgent {
        PortfolioAgent::new(Arc::new(StubFetcher {
            repos,
            page: page.map(String::from),
        }))
    }

    #[tokio::test]
    async fn test_forks_are_dropped() {
        let agent = agent(
            vec![
                repo("a", false),
                repo("b", true),
                repo("c", false),
                repo("d", true),
                repo("e", false),
            ],
            None,
        );

        let analysis = agent
            .analyze_portfolio(&["https://github.com/dev".to_string()])
            .await;
        let names: Vec<_> = analysis.github_repos.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a", "c", "e"]);
        assert_eq!(analysis.github_repos[0].description, NO_DESCRIPTION);
        assert_eq!(analysis.github_repos[0].language, NO_LANGUAGE);
        assert!(analysis.summary.starts_with("GitHub Projects:\n- a: "));
    }

    #[tokio::test]
    async fn test_behance_takes_first_three_titles() {
        let html = r#"<html><body>
            <div class="Project-title">One</div>
            <div class="Project-title">  Two
            </div>
            <div class="Project-title"></div>
            <div class="Project-title">Three</div>
            <div class="Project-title">Four</div>
        </body></html>"#;
        let agent = agent(vec![], Some(html));

        let analysis = agent
            .analyze_portfolio(&["https://www.behance.net/designer".to_string()])
            .await;
        let titles: Vec<_> = analysis
            .behance_projects
            .iter()
            .map(|p| p.title.as_str())
            .collect();
        assert_eq!(titles, vec!["One", "Two", "Three"]);
        assert_eq!(analysis.behance_projects[0].url, "https://www.behance.net/designer");
    }

    #[tokio::test]
    async fn test_unknown_and_malformed_links_are_kept_as_other() {
        let agent = agent(vec![], None);
        let analysis = agent
            .analyze_portfolio(&[
                "https://example.com/me".to_string(),
                "not a url".to_string(),
                "   ".to_string(),
                "https://github.com/".to_string(),
            ])
            .await;
        assert_eq!(
            analysis.other_links,
            vec!["https://example.com/me", "not a url", "https://github.com/"]
        );
        assert!(analysis.is_empty());
    }

    #[tokio::test]
    async fn test_failures_contribute_nothing() {
        let agent = agent(vec![repo("kept", false)], None);
        let analysis = agent
            .analyze_portfolio(&[
                "https://github.com/ghost".to_string(),
                "https://behance.net/down".to_string(),
                "https://github.com/dev/some-repo".to_string(),
            ])
            .await;
        assert_eq!(analysis.github_repos.len(), 1);
        assert!(analysis.behance_projects.is_empty());
        assert!(analysis.other_links.is_empty());
    }

    #[test]
    fn test_classify_link() {
        assert_eq!(
            classify_link("https://github.com/octocat/hello"),
            PortfolioLink::Github {
                username: "octocat".to_string()
            }
        );
        assert!(matches!(
            classify_link("https://www.behance.net/x"),
            PortfolioLink::Behance(_)
        ));
        assert_eq!(classify_link("ftp://files.example.com"), PortfolioLink::Other);
    }
}
