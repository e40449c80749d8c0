//! Prompt composition: verified facts plus style choices become the single
//! instruction sent to the model. Pure and deterministic.

use thiserror::Error;
use tracing::debug;

use crate::generation::facts::{AssembledFacts, FactLabel};
use crate::generation::prompts::{
    CLOSING_INSTRUCTION, COMPANY_DIRECTIVES_WITHOUT_RESEARCH, COMPANY_DIRECTIVES_WITH_RESEARCH,
    FORBIDDEN_CONTENT, REQUIRED_FORMAT, STRICT_RULES, TONE_AND_STYLE_HEADING,
    VERIFIED_INFORMATION_HEADING,
};
use crate::generation::style::StyleConfig;

#[derive(Debug, Error, PartialEq)]
pub enum ComposeError {
    #[error("missing required fact: {}", .0.title())]
    MissingRequiredFact(FactLabel),
}

pub fn compose(
    facts: &AssembledFacts,
    style: &StyleConfig,
    company_name: &str,
) -> Result<String, ComposeError> {
    if !facts
        .get(FactLabel::JobDetails)
        .is_some_and(|f| !f.value().trim().is_empty())
    {
        return Err(ComposeError::MissingRequiredFact(FactLabel::JobDetails));
    }

    let company = company_name.trim();
    let header = if company.is_empty() {
        "Write a professional cover letter using the following verified information and guidelines:"
            .to_string()
    } else {
        format!(
            "Write a professional cover letter for a position at {company} using the following \
             verified information and guidelines:"
        )
    };

    let numbered: Vec<String> = facts
        .facts
        .iter()
        .enumerate()
        .map(|(i, fact)| format!("{}. {}:\n{}", i + 1, fact.label().title(), fact.value()))
        .collect();

    let company_directives = if facts.has(FactLabel::CompanyResearch) {
        COMPANY_DIRECTIVES_WITH_RESEARCH
    } else {
        COMPANY_DIRECTIVES_WITHOUT_RESEARCH
    };

    let tone = style.tone.as_str().to_lowercase();
    let writing_style = style.style.as_str().to_lowercase();
    let guidelines = format!(
        "{TONE_AND_STYLE_HEADING}\n\
         - Use {} tone throughout the letter\n\
         - Follow {} writing style\n\
         {company_directives}\n\n\
         For {tone} tone, this means:\n{}\n\n\
         For {writing_style} style, this means:\n{}",
        with_article(&tone),
        with_article(&writing_style),
        style.tone.guidelines(),
        style.style.guidelines(),
    );

    let prompt = [
        format!("{header}\n\n{VERIFIED_INFORMATION_HEADING}\n{}", numbered.join("\n\n")),
        guidelines,
        REQUIRED_FORMAT.to_string(),
        STRICT_RULES.to_string(),
        FORBIDDEN_CONTENT.to_string(),
        CLOSING_INSTRUCTION.to_string(),
    ]
    .join("\n\n");

    debug!(
        facts = facts.facts.len(),
        tone = style.tone.as_str(),
        style = style.style.as_str(),
        chars = prompt.len(),
        "Composed generation instruction"
    );
    Ok(prompt)
}

/// Prefixes `a` or `an` by the word's first letter.
fn with_article(word: &str) -> String {
    let article = match word.chars().next() {
        Some('a' | 'e' | 'i' | 'o' | 'u') => "an",
        _ => "a",
    };
    format!("{article} {word}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::jd_parser::extract_job_sections;
    use crate::documents::resume_scanner::extract_resume_blocks;
    use crate::generation::facts::assemble;
    use crate::generation::style::{Tone, WritingStyle};
    use crate::research::models::CompanyResearch;

    fn scenario_a() -> AssembledFacts {
        let resume =
            extract_resume_blocks("Education\nB.S. Computer Science\nExperience\nDeveloper at X\nProjects");
        let jd = extract_job_sections("Requirements: Python. Responsibilities: build things.");
        assemble(&resume, &jd, None, None)
    }

    #[test]
    fn test_resume_and_jd_only() {
        let prompt = compose(&scenario_a(), &StyleConfig::default(), "Acme").unwrap();

        assert!(prompt.contains("1. Education Background:\nB.S. Computer Science"));
        assert!(prompt.contains("2. Professional Experience:\nDeveloper at X"));
        assert!(prompt.contains("3. Job Details:\n"));
        assert!(prompt.contains("Python."));
        assert!(!prompt.contains("Portfolio"));
        assert!(!prompt.contains("Company Research"));
    }

    #[test]
    fn test_sections_in_fixed_order() {
        let prompt = compose(&scenario_a(), &StyleConfig::default(), "Acme").unwrap();
        let positions: Vec<usize> = [
            "VERIFIED INFORMATION:",
            "TONE AND STYLE GUIDELINES:",
            "REQUIRED FORMAT:",
            "STRICT RULES:",
            "FORBIDDEN PHRASES AND CONTENT:",
            "[Write a focused",
        ]
        .iter()
        .map(|heading| prompt.find(heading).unwrap())
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_missing_job_details_fails() {
        let resume = extract_resume_blocks("Education\nBS\nExperience\nDev");
        let facts = assemble(&resume, &extract_job_sections(""), None, None);
        assert_eq!(
            compose(&facts, &StyleConfig::default(), "Acme"),
            Err(ComposeError::MissingRequiredFact(FactLabel::JobDetails))
        );
    }

    #[test]
    fn test_style_guidelines_embedded() {
        let style = StyleConfig {
            tone: Tone::Confident,
            style: WritingStyle::Technical,
        };
        let prompt = compose(&scenario_a(), &style, "Acme").unwrap();
        assert!(prompt.contains("- Use a confident tone throughout the letter"));
        assert!(prompt.contains("- Follow a technical writing style"));
        assert!(prompt.contains(Tone::Confident.guidelines()));
        assert!(prompt.contains(WritingStyle::Technical.guidelines()));
    }

    #[test]
    fn test_article_matches_vowel_styles() {
        let style = StyleConfig {
            tone: Tone::Enthusiastic,
            style: WritingStyle::Executive,
        };
        let prompt = compose(&scenario_a(), &style, "Acme").unwrap();
        assert!(prompt.contains("- Use an enthusiastic tone throughout the letter"));
        assert!(prompt.contains("- Follow an executive writing style"));
        assert!(!prompt.contains("a executive"));
    }

    #[test]
    fn test_company_directives_follow_research_presence() {
        let without = compose(&scenario_a(), &StyleConfig::default(), "Acme").unwrap();
        assert!(without.contains(COMPANY_DIRECTIVES_WITHOUT_RESEARCH));
        assert!(!without.contains(COMPANY_DIRECTIVES_WITH_RESEARCH));

        let resume = extract_resume_blocks("Experience\nDev");
        let jd = extract_job_sections("Requirements: Rust");
        let research = CompanyResearch {
            overview: "Acme makes anvils.".to_string(),
            ..Default::default()
        };
        let facts = assemble(&resume, &jd, None, Some(&research));
        let with = compose(&facts, &StyleConfig::default(), "Acme").unwrap();
        assert!(with.contains("2. Company Research:\nCompany Overview: Acme makes anvils."));
        assert!(with.contains(COMPANY_DIRECTIVES_WITH_RESEARCH));
    }

    #[test]
    fn test_header_names_company() {
        let prompt = compose(&scenario_a(), &StyleConfig::default(), " Initech ").unwrap();
        assert!(prompt.starts_with("Write a professional cover letter for a position at Initech "));

        let anonymous = compose(&scenario_a(), &StyleConfig::default(), "").unwrap();
        assert!(anonymous.starts_with("Write a professional cover letter using"));
    }

    #[test]
    fn test_deterministic() {
        let facts = scenario_a();
        let style = StyleConfig::default();
        assert_eq!(compose(&facts, &style, "Acme"), compose(&facts, &style, "Acme"));
    }
}
