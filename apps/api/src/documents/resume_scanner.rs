//! Resume block scanner.
//!
//! One pass records where every known label first occurs; each section then runs
//! from the end of its label to the start of whichever label comes next. A label
//! that never occurs just leaves its section out.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::documents::models::ResumeBlocks;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResumeLabel {
    Education,
    Experience,
    Projects,
    Languages,
    Frameworks,
    DeveloperTools,
    Strengths,
}

impl ResumeLabel {
    const ALL: [ResumeLabel; 7] = [
        ResumeLabel::Education,
        ResumeLabel::Experience,
        ResumeLabel::Projects,
        ResumeLabel::Languages,
        ResumeLabel::Frameworks,
        ResumeLabel::DeveloperTools,
        ResumeLabel::Strengths,
    ];

    fn pattern(&self) -> &'static str {
        match self {
            ResumeLabel::Education => r"\b(?:Education|EDUCATION)\b",
            ResumeLabel::Experience => r"\b(?:Experience|EXPERIENCE)\b",
            ResumeLabel::Projects => r"\b(?:Projects|PROJECTS)\b",
            ResumeLabel::Languages => r"\bLanguages:",
            ResumeLabel::Frameworks => r"\bFrameworks:",
            ResumeLabel::DeveloperTools => r"\bDeveloper Tools:",
            ResumeLabel::Strengths => r"\bStrengths:",
        }
    }

    /// Heading used when a skill sub-section is rendered into the skills block.
    fn skill_heading(&self) -> Option<&'static str> {
        match self {
            ResumeLabel::Languages => Some("Languages:"),
            ResumeLabel::Frameworks => Some("Frameworks:"),
            ResumeLabel::DeveloperTools => Some("Developer Tools:"),
            _ => None,
        }
    }
}

static LABEL_PATTERNS: LazyLock<Vec<(ResumeLabel, Regex)>> = LazyLock::new(|| {
    ResumeLabel::ALL
        .iter()
        .map(|label| {
            (
                *label,
                Regex::new(label.pattern()).expect("resume label pattern is valid"),
            )
        })
        .collect()
});

/// A label occurrence: where the label starts and where its content begins.
#[derive(Debug, Clone, Copy)]
struct LabelHit {
    label: ResumeLabel,
    start: usize,
    content_start: usize,
}

/// Slices a resume into education, experience and skills blocks.
pub fn extract_resume_blocks(text: &str) -> ResumeBlocks {
    let mut hits: Vec<LabelHit> = LABEL_PATTERNS
        .iter()
        .filter_map(|(label, pattern)| {
            pattern.find(text).map(|m| LabelHit {
                label: *label,
                start: m.start(),
                content_start: m.end(),
            })
        })
        .collect();
    hits.sort_by_key(|hit| hit.start);

    let mut blocks = ResumeBlocks::default();
    let mut skill_lines = Vec::new();

    for (i, hit) in hits.iter().enumerate() {
        let end = hits
            .iter()
            .skip(i + 1)
            .map(|next| next.start)
            .find(|&start| start >= hit.content_start)
            .unwrap_or(text.len());
        if end <= hit.content_start {
            continue;
        }
        let content = text[hit.content_start..end]
            .trim()
            .trim_start_matches(':')
            .trim();
        if content.is_empty() {
            continue;
        }

        match hit.label {
            ResumeLabel::Education => blocks.education = Some(content.to_string()),
            ResumeLabel::Experience => blocks.experience = Some(content.to_string()),
            label => {
                if let Some(heading) = label.skill_heading() {
                    skill_lines.push(format!("{heading} {content}"));
                }
            }
        }
    }

    if !skill_lines.is_empty() {
        blocks.skills = Some(skill_lines.join("\n"));
    }

    debug!(
        labels_found = hits.len(),
        education_chars = blocks.education.as_ref().map_or(0, |s| s.len()),
        experience_chars = blocks.experience.as_ref().map_or(0, |s| s.len()),
        skills_chars = blocks.skills.as_ref().map_or(0, |s| s.len()),
        "Scanned resume blocks"
    );

    blocks
}
