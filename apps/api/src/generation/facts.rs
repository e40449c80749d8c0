//! Fact assembly: turns extracted inputs into the ordered list of verified facts
//! the prompt is allowed to use.
//!
//! A fact's origin is fixed by its label, so provenance cannot be forgotten or
//! doubled up. Research that came back as fallback boilerplate is withheld.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::documents::models::{ProcessedJobDescription, ResumeBlocks};
use crate::portfolio::models::PortfolioAnalysis;
use crate::research::models::CompanyResearch;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactSource {
    Resume,
    JobDescription,
    PortfolioAnalysis,
    CompanyResearch,
}

/// Declaration order is prompt order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactLabel {
    Education,
    Experience,
    Skills,
    Portfolio,
    CompanyResearch,
    JobDetails,
}

impl FactLabel {
    pub fn source(&self) -> FactSource {
        match self {
            FactLabel::Education | FactLabel::Experience | FactLabel::Skills => FactSource::Resume,
            FactLabel::Portfolio => FactSource::PortfolioAnalysis,
            FactLabel::CompanyResearch => FactSource::CompanyResearch,
            FactLabel::JobDetails => FactSource::JobDescription,
        }
    }

    /// Heading used in the prompt.
    pub fn title(&self) -> &'static str {
        match self {
            FactLabel::Education => "Education Background",
            FactLabel::Experience => "Professional Experience",
            FactLabel::Skills => "Technical Skills",
            FactLabel::Portfolio => "Portfolio Projects",
            FactLabel::CompanyResearch => "Company Research",
            FactLabel::JobDetails => "Job Details",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerifiedFact {
    label: FactLabel,
    value: String,
    source: FactSource,
}

impl VerifiedFact {
    /// `None` for blank values; a fact is never empty.
    pub fn new(label: FactLabel, value: impl Into<String>) -> Option<Self> {
        let value = value.into().trim().to_string();
        if value.is_empty() {
            return None;
        }
        Some(Self {
            label,
            value,
            source: label.source(),
        })
    }

    pub fn label(&self) -> FactLabel {
        self.label
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn source(&self) -> FactSource {
        self.source
    }
}

/// An input that was available but deliberately kept out of the prompt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WithheldFact {
    pub label: FactLabel,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AssembledFacts {
    pub facts: Vec<VerifiedFact>,
    pub withheld: Vec<WithheldFact>,
}

impl AssembledFacts {
    pub fn get(&self, label: FactLabel) -> Option<&VerifiedFact> {
        self.facts.iter().find(|f| f.label == label)
    }

    pub fn has(&self, label: FactLabel) -> bool {
        self.get(label).is_some()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Assembly
// ────────────────────────────────────────────────────────────────────────────

/// Job description text plus the sorted extracted lists.
pub fn render_job_details(jd: &ProcessedJobDescription) -> String {
    let mut parts = vec![jd.full_text.trim().to_string()];
    for (heading, items) in [
        ("Key Requirements", &jd.requirements),
        ("Key Responsibilities", &jd.responsibilities),
        ("Requested Skills", &jd.skills),
    ] {
        if items.is_empty() {
            continue;
        }
        let lines: Vec<String> = items.iter().map(|item| format!("- {item}")).collect();
        parts.push(format!("{heading}:\n{}", lines.join("\n")));
    }
    parts.join("\n\n")
}

/// Builds the fact list in prompt order: education, experience, skills,
/// portfolio, company research, job details. Blank inputs produce no fact.
pub fn assemble(
    resume: &ResumeBlocks,
    job_description: &ProcessedJobDescription,
    portfolio: Option<&PortfolioAnalysis>,
    research: Option<&CompanyResearch>,
) -> AssembledFacts {
    let mut assembled = AssembledFacts::default();
    let mut push = |label: FactLabel, value: Option<String>| {
        if let Some(fact) = value.and_then(|v| VerifiedFact::new(label, v)) {
            assembled.facts.push(fact);
        }
    };

    push(FactLabel::Education, resume.education.clone());
    push(FactLabel::Experience, resume.experience.clone());
    push(FactLabel::Skills, resume.skills.clone());
    push(FactLabel::Portfolio, portfolio.map(|p| p.summary.clone()));

    let mut withheld = None;
    match research {
        Some(r) if r.is_verified() => push(FactLabel::CompanyResearch, Some(r.to_structured_text())),
        Some(r) => {
            withheld = Some(WithheldFact {
                label: FactLabel::CompanyResearch,
                reason: format!(
                    "research unavailable ({}); fallback text not used",
                    r.error.as_deref().unwrap_or("unknown error")
                ),
            });
        }
        None => {}
    }

    if !job_description.full_text.trim().is_empty() {
        push(FactLabel::JobDetails, Some(render_job_details(job_description)));
    }

    assembled.withheld.extend(withheld);

    for fact in &assembled.facts {
        debug!(label = ?fact.label(), source = ?fact.source(), chars = fact.value().len(), "Verified fact");
    }
    debug!(
        facts = assembled.facts.len(),
        withheld = assembled.withheld.len(),
        "Assembled verified facts"
    );
    assembled
}
