use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub summary: String,
    /// `YYYY-MM-DD` when known.
    pub date: Option<String>,
}

/// What is known about a company for one generation run.
///
/// `error` is set only on fallback records; those carry generic boilerplate
/// rather than researched facts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyResearch {
    pub overview: String,
    pub values: Vec<String>,
    pub focus_areas: Vec<String>,
    /// Most recent first.
    pub recent_news: Vec<NewsItem>,
    pub error: Option<String>,
}

impl CompanyResearch {
    /// Generic record used when every research source failed.
    pub fn fallback(company_name: &str, error: impl Into<String>, today: NaiveDate) -> Self {
        let name = company_name.trim();
        Self {
            overview: format!("{name} is an industry leader in technology innovation."),
            values: vec![
                "Innovation".to_string(),
                "Excellence".to_string(),
                "Integrity".to_string(),
            ],
            focus_areas: vec![
                "Technology".to_string(),
                "Innovation".to_string(),
                "Research".to_string(),
            ],
            recent_news: vec![NewsItem {
                title: format!("Latest Developments at {name}"),
                summary: format!("Recent technological advancements from {name}"),
                date: Some(today.format("%Y-%m-%d").to_string()),
            }],
            error: Some(error.into()),
        }
    }

    /// True when the record came from a real source rather than the fallback.
    pub fn is_verified(&self) -> bool {
        self.error.is_none()
    }

    pub fn is_empty(&self) -> bool {
        self.overview.trim().is_empty()
            && self.values.is_empty()
            && self.focus_areas.is_empty()
            && self.recent_news.is_empty()
    }

    /// Orders news most-recent-first; undated items go last.
    pub fn sort_news(&mut self) {
        self.recent_news
            .sort_by(|a, b| b.date.as_deref().cmp(&a.date.as_deref()));
    }

    /// Renders the record as labeled paragraphs. Only the newest news item is used.
    pub fn to_structured_text(&self) -> String {
        let mut parts = Vec::new();

        if !self.overview.trim().is_empty() {
            parts.push(format!("Company Overview: {}", self.overview.trim()));
        }
        if !self.focus_areas.is_empty() {
            parts.push(format!("Focus Areas: {}", self.focus_areas.join(", ")));
        }
        if !self.values.is_empty() {
            parts.push(format!("Company Values: {}", self.values.join(", ")));
        }
        if let Some(news) = self.recent_news.first() {
            parts.push(format!(
                "Recent Development: {} - {}",
                news.title, news.summary
            ));
        }

        parts.join("\n\n")
    }
}
