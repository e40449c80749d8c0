//! Response formatter: raw model text into a fixed business-letter shape.
//!
//! Output blocks are separated by blank lines: the date first, the signature
//! last. Paragraphs that look like a greeting, sign-off or contact details are
//! dropped because the formatter adds its own.

use std::sync::LazyLock;

use chrono::{Local, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const SALUTATION: &str = "Dear Hiring Manager,";
pub const CLOSING: &str = "Sincerely,";

static LEAD_IN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^[ \t]*(?:here is|here's|below is)\b[^\n]*:[ \t]*$\n?")
        .expect("lead-in pattern is valid")
});

/// A bracketed placeholder and the spaces before it.
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]*\[[^\]\n]*\]").expect("placeholder pattern is valid"));

static HEADER_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^[ \t]*(?:about the position|contact information):?[ \t]*$\n?")
        .expect("header pattern is valid")
});

static PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[ \t]*\n").expect("paragraph pattern is valid"));

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("email pattern is valid")
});

const DENYLIST: &[&str] = &[
    "dear hiring manager",
    "sincerely",
    "recruiting team",
    "contact information",
    "phone:",
    "email:",
    "best regards",
    "kind regards",
];

/// Signature details. Unset fields render as bracketed placeholders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignatureConfig {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl SignatureConfig {
    fn render(&self) -> String {
        let field = |value: &Option<String>, placeholder: &str| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .unwrap_or(placeholder)
                .to_string()
        };
        format!(
            "{CLOSING}\n{}\n{}\n{}",
            field(&self.name, "[Your Name]"),
            field(&self.phone, "[Your Phone]"),
            field(&self.email, "[Your Email]"),
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResponseFormatter {
    signature: SignatureConfig,
}

impl ResponseFormatter {
    pub fn new(signature: SignatureConfig) -> Self {
        Self { signature }
    }

    /// Formats with today's local date.
    pub fn format(&self, raw: &str) -> String {
        self.format_on(raw, Local::now().date_naive())
    }

    pub fn format_on(&self, raw: &str, date: NaiveDate) -> String {
        let mut blocks = vec![format!("{}\n\n{SALUTATION}", date.format("%B %d, %Y"))];
        blocks.extend(body_paragraphs(raw));
        blocks.push(self.signature.render());
        blocks.join("\n\n")
    }
}

fn is_boilerplate(paragraph: &str) -> bool {
    let lower = paragraph.to_lowercase();
    DENYLIST.iter().any(|phrase| lower.contains(phrase)) || EMAIL.is_match(paragraph)
}

/// Cleaned, non-empty body paragraphs in order.
fn body_paragraphs(raw: &str) -> Vec<String> {
    let text = raw.replace("\r\n", "\n");
    let text = LEAD_IN.replace_all(&text, "");
    let text = PLACEHOLDER.replace_all(&text, "");
    let text = HEADER_LINE.replace_all(&text, "");

    PARAGRAPH_BREAK
        .split(&text)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .filter(|p| !is_boilerplate(p))
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
    }

    fn formatter() -> ResponseFormatter {
        ResponseFormatter::default()
    }

    const PLACEHOLDER_SIGNATURE: &str = "Sincerely,\n[Your Name]\n[Your Phone]\n[Your Email]";

    #[test]
    fn test_empty_input_still_has_frame() {
        let letter = formatter().format_on("", day());
        assert_eq!(
            letter,
            format!("March 05, 2024\n\nDear Hiring Manager,\n\n{PLACEHOLDER_SIGNATURE}")
        );
    }

    #[test]
    fn test_today_frame() {
        let letter = formatter().format("Body.");
        assert!(letter.contains("\n\nDear Hiring Manager,\n\nBody.\n\n"));
        assert!(letter.ends_with(PLACEHOLDER_SIGNATURE));
    }

    #[test]
    fn test_strips_sincerely_paragraph_any_case() {
        let raw = "I built compilers.\n\nSINCERELY yours,\nBob";
        let letter = formatter().format_on(raw, day());
        assert!(letter.contains("I built compilers."));
        assert!(!letter.contains("Bob"));
        assert_eq!(letter.matches("Sincerely").count(), 1);
        assert_eq!(letter.to_lowercase().matches("sincerely").count(), 1);
    }

    #[test]
    fn test_strips_lead_in_placeholders_and_headers() {
        let raw = "Here is your cover letter:\n\
                   About the position:\n\
                   I have five years of Rust [insert detail] experience.\n\n\
                   Contact Information\n\n\
                   I led a team of four.";
        let letter = formatter().format_on(raw, day());
        let blocks: Vec<&str> = letter.split("\n\n").collect();
        assert_eq!(
            blocks,
            vec![
                "March 05, 2024",
                "Dear Hiring Manager,",
                "I have five years of Rust experience.",
                "I led a team of four.",
                "Sincerely,\n[Your Name]\n[Your Phone]\n[Your Email]",
            ]
        );
    }

    #[test]
    fn test_placeholder_removal_leaves_single_spaces() {
        let raw = "I shipped [project name] to [N] users [metric].\n\nIt ran for a year.";
        let letter = formatter().format_on(raw, day());
        assert!(letter.contains("\n\nI shipped to users.\n\n"));
        assert!(!letter.contains("  "));
    }

    #[test]
    fn test_drops_contact_and_greeting_paragraphs() {
        let raw = "Dear Hiring Manager,\n\n\
                   My work on search cut latency in half.\n\n\
                   Reach me at jane.doe@example.org any time.\n\n\
                   Phone: 555-0100\n\n\
                   Best regards,\nJane";
        let letter = formatter().format_on(raw, day());
        assert_eq!(letter.matches("Dear Hiring Manager,").count(), 1);
        assert!(letter.contains("My work on search cut latency in half."));
        assert!(!letter.contains("example.org"));
        assert!(!letter.contains("555-0100"));
        assert!(!letter.contains("Jane"));
    }

    #[test]
    fn test_signature_from_config() {
        let formatter = ResponseFormatter::new(SignatureConfig {
            name: Some("Ada Lovelace".to_string()),
            phone: None,
            email: Some("ada@example.com".to_string()),
        });
        let letter = formatter.format_on("Body.", day());
        assert!(letter.ends_with("Sincerely,\nAda Lovelace\n[Your Phone]\nada@example.com"));
    }

    #[test]
    fn test_windows_line_endings() {
        let letter = formatter().format_on("First.\r\n\r\nSecond.", day());
        assert!(letter.contains("First.\n\nSecond."));
    }
}
