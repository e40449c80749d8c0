use serde::{Deserialize, Serialize};

pub const NO_DESCRIPTION: &str = "No description provided";
pub const NO_LANGUAGE: &str = "Not specified";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GithubRepo {
    pub name: String,
    pub description: String,
    pub stars: u64,
    pub language: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehanceProject {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioAnalysis {
    /// Non-fork repositories only.
    pub github_repos: Vec<GithubRepo>,
    pub behance_projects: Vec<BehanceProject>,
    /// Links on hosts we don't understand, kept verbatim.
    pub other_links: Vec<String>,
    pub summary: String,
}

impl PortfolioAnalysis {
    pub fn is_empty(&self) -> bool {
        self.github_repos.is_empty() && self.behance_projects.is_empty()
    }

    /// Renders the text used as the portfolio fact. Other links are not included.
    pub fn render_summary(&self) -> String {
        let mut blocks = Vec::new();

        if !self.github_repos.is_empty() {
            let lines: Vec<String> = self
                .github_repos
                .iter()
                .map(|repo| format!("- {}: {} ({})", repo.name, repo.description, repo.language))
                .collect();
            blocks.push(format!("GitHub Projects:\n{}", lines.join("\n")));
        }

        if !self.behance_projects.is_empty() {
            let lines: Vec<String> = self
                .behance_projects
                .iter()
                .map(|project| format!("- {}", project.title))
                .collect();
            blocks.push(format!("Design Projects:\n{}", lines.join("\n")));
        }

        blocks.join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_has_both_blocks() {
        let analysis = PortfolioAnalysis {
            github_repos: vec![GithubRepo {
                name: "ripgrep".to_string(),
                description: "fast grep".to_string(),
                stars: 40_000,
                language: "Rust".to_string(),
                url: "https://github.com/burntsushi/ripgrep".to_string(),
            }],
            behance_projects: vec![BehanceProject {
                title: "Brand refresh".to_string(),
                url: "https://www.behance.net/someone".to_string(),
            }],
            ..Default::default()
        };
        assert_eq!(
            analysis.render_summary(),
            "GitHub Projects:\n- ripgrep: fast grep (Rust)\n\nDesign Projects:\n- Brand refresh"
        );
    }

    #[test]
    fn test_other_links_alone_render_nothing() {
        let analysis = PortfolioAnalysis {
            other_links: vec!["https://example.com".to_string()],
            ..Default::default()
        };
        assert!(analysis.is_empty());
        assert_eq!(analysis.render_summary(), "");
    }
}
