//! JD Parser: heuristic section extraction from a raw job description.
//!
//! No model calls: labels are matched with fixed patterns and everything after a
//! label up to the next blank line is captured. Absence of a label is not an
//! error, the corresponding set is simply empty.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::documents::chunking::ChunkWindow;
use crate::documents::models::ProcessedJobDescription;
use crate::documents::normalize::{normalize, normalize_lines};

fn label_patterns(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(&format!(r"(?i)\b{p}\s*:")).expect("label pattern is valid"))
        .collect()
}

static REQUIREMENT_LABELS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    label_patterns(&[
        r"requirements?",
        r"qualifications?",
        r"what you(?:'?ll| will) need",
    ])
});

static RESPONSIBILITY_LABELS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    label_patterns(&[
        r"responsibilit(?:y|ies)",
        r"duties",
        r"what you(?:'?ll| will) do",
    ])
});

static SKILL_LABELS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    label_patterns(&[
        r"skills?",
        r"technical requirements?",
        r"proficienc(?:y|ies)",
    ])
});

static BLANK_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[ \t]*\n").expect("blank line pattern is valid"));

/// Company-name heuristics, tried in order against the raw job description.
static COMPANY_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)position at (.*?)[.,]",
        r"(?i)intern(?:ship)? at (.*?)[.,]",
        r"(?i)role at (.*?)[.,]",
        r"(?i)About (.*?):",
        r"(?i)About (.*?)\n",
        r"(?i)with (.*?)[.,]",
        r"(?i)join (.*?)[.,]",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("company pattern is valid"))
    .collect()
});

static CORPORATE_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(inc|llc|corp|corporation)\b").expect("suffix pattern is valid")
});
static NAME_PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s-]").expect("punctuation pattern is valid"));

/// Splits a job description into its full text, overlapping chunks, and the
/// requirement / responsibility / skill spans found behind known labels.
pub fn extract_job_sections(text: &str) -> ProcessedJobDescription {
    extract_job_sections_with(text, ChunkWindow::default())
}

pub fn extract_job_sections_with(text: &str, window: ChunkWindow) -> ProcessedJobDescription {
    let full_text = normalize(text);
    let paragraphs = normalize_lines(text);

    let processed = ProcessedJobDescription {
        sections: window.split(&full_text),
        requirements: capture_labeled(&paragraphs, &REQUIREMENT_LABELS),
        responsibilities: capture_labeled(&paragraphs, &RESPONSIBILITY_LABELS),
        skills: capture_labeled(&paragraphs, &SKILL_LABELS),
        full_text,
    };

    debug!(
        chars = processed.full_text.chars().count(),
        chunks = processed.sections.len(),
        requirements = processed.requirements.len(),
        responsibilities = processed.responsibilities.len(),
        skills = processed.skills.len(),
        "Processed job description"
    );

    processed
}

/// Collects every span following any of `labels`, up to the next blank line or
/// the end of the text. Spans are normalized and deduplicated.
fn capture_labeled(text: &str, labels: &[Regex]) -> BTreeSet<String> {
    let mut spans = BTreeSet::new();
    for label in labels {
        for m in label.find_iter(text) {
            let rest = text[m.end()..].trim_start();
            let end = BLANK_LINE.find(rest).map_or(rest.len(), |b| b.start());
            let span = normalize(&rest[..end]);
            if !span.is_empty() {
                spans.insert(span);
            }
        }
    }
    spans
}

/// Best-effort company name from phrases like "role at Acme." or "About Acme:".
pub fn extract_company_name(job_description: &str) -> Option<String> {
    COMPANY_PATTERNS.iter().find_map(|pattern| {
        let captured = pattern.captures(job_description)?.get(1)?.as_str();
        let without_suffix = CORPORATE_SUFFIX.replace_all(captured, "");
        let cleaned = NAME_PUNCTUATION.replace_all(&without_suffix, "");
        let name = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
        (!name.is_empty()).then_some(name)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_JD: &str = r#"
        Software Engineer Position

        Requirements:
        - 5+ years experience
        - Python expertise
        - Team leadership

        Responsibilities:
        - Lead development team
        - Implement best practices
    "#;

    #[test]
    fn test_requirements_extracted_from_labeled_block() {
        let jd = extract_job_sections(SAMPLE_JD);
        assert_eq!(jd.requirements.len(), 1);
        let requirement = jd.requirements.iter().next().unwrap();
        assert!(requirement.contains("Python expertise"));
        assert!(requirement.contains("Team leadership"));
        assert!(
            !requirement.contains("Lead development team"),
            "capture must stop at the blank line"
        );
    }

    #[test]
    fn test_responsibilities_extracted() {
        let jd = extract_job_sections(SAMPLE_JD);
        let responsibility = jd.responsibilities.iter().next().unwrap();
        assert_eq!(
            responsibility,
            "- Lead development team - Implement best practices"
        );
    }

    #[test]
    fn test_inline_labels_capture_to_end_of_text() {
        let jd = extract_job_sections("Requirements: Python. Responsibilities: build things.");
        assert!(jd.requirements.iter().any(|r| r.contains("Python.")));
        assert!(jd.responsibilities.contains("build things."));
        assert!(jd.skills.is_empty());
    }

    #[test]
    fn test_no_labels_yields_empty_sets() {
        let jd = extract_job_sections("We are hiring a friendly engineer to build things.");
        assert!(jd.requirements.is_empty());
        assert!(jd.responsibilities.is_empty());
        assert!(jd.skills.is_empty());
        assert_eq!(
            jd.full_text,
            "We are hiring a friendly engineer to build things."
        );
    }

    #[test]
    fn test_labels_are_case_insensitive() {
        let jd = extract_job_sections("QUALIFICATIONS: BS in CS\n\nDuties: on-call rotation");
        assert!(jd.requirements.contains("BS in CS"));
        assert!(jd.responsibilities.contains("on-call rotation"));
    }

    #[test]
    fn test_apostrophe_label_variants() {
        let jd = extract_job_sections(
            "What you'll need: Rust\n\nWhat you'll do: ship services\n\nProficiencies: SQL",
        );
        assert!(jd.requirements.contains("Rust"));
        assert!(jd.responsibilities.contains("ship services"));
        assert!(jd.skills.contains("SQL"));
    }

    #[test]
    fn test_blank_line_right_after_label_is_skipped() {
        let jd = extract_job_sections("Requirements:\n\n- Rust\n- Tokio\n\nAbout us");
        assert!(jd.requirements.contains("- Rust - Tokio"));
    }

    #[test]
    fn test_duplicate_spans_are_deduplicated() {
        let jd = extract_job_sections("Skills: Rust\n\nSkills: Rust\n\nSkill: Go");
        assert_eq!(jd.skills.len(), 2);
    }

    #[test]
    fn test_technical_requirements_land_in_both_sets() {
        let jd = extract_job_sections("Technical Requirements: Kubernetes");
        assert!(jd.skills.contains("Kubernetes"));
        assert!(jd.requirements.contains("Kubernetes"));
    }

    #[test]
    fn test_label_without_colon_is_not_matched() {
        let jd = extract_job_sections("Our requirements are simple and our skills are many.");
        assert!(jd.requirements.is_empty());
        assert!(jd.skills.is_empty());
    }

    #[test]
    fn test_full_text_is_normalized_and_chunked() {
        let jd = extract_job_sections(SAMPLE_JD);
        assert!(!jd.full_text.contains('\n'));
        assert!(!jd.full_text.contains('+'));
        assert_eq!(jd.sections, vec![jd.full_text.clone()]);
    }

    #[test]
    fn test_long_description_is_windowed() {
        let body = "Build reliable services. ".repeat(100);
        let jd = extract_job_sections(&body);
        assert!(jd.sections.len() > 1);
        assert_eq!(ChunkWindow::default().reassemble(&jd.sections), jd.full_text);
    }

    #[test]
    fn test_company_name_from_role_at() {
        assert_eq!(
            extract_company_name("An exciting role at Globex Corporation, in Springfield."),
            Some("Globex".to_string())
        );
    }

    #[test]
    fn test_company_name_from_about_heading() {
        assert_eq!(
            extract_company_name("About Initech:\nWe make TPS reports."),
            Some("Initech".to_string())
        );
    }

    #[test]
    fn test_company_name_strips_suffix_and_punctuation() {
        assert_eq!(
            extract_company_name("Internship at Acme, Inc. starting June."),
            Some("Acme".to_string())
        );
    }

    #[test]
    fn test_company_name_absent() {
        assert_eq!(extract_company_name("Write code. Ship it."), None);
    }
}
