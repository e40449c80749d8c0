use std::sync::LazyLock;

use regex::Regex;

static NON_SEMANTIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s.,;:-]").expect("non-semantic pattern is valid"));
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Collapses whitespace to single spaces and drops everything except word
/// characters and `. , ; : -`.
///
/// Characters are removed before whitespace is collapsed so that a removed
/// symbol between two spaces cannot leave a double space behind. This keeps
/// `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(text: &str) -> String {
    let stripped = NON_SEMANTIC.replace_all(text, "");
    WHITESPACE_RUN.replace_all(&stripped, " ").trim().to_string()
}

/// Same cleaning as [`normalize`], applied per line, keeping paragraph breaks.
///
/// Runs of blank lines become exactly one `\n\n`; single line breaks survive as
/// `\n`. Label capture relies on the blank-line boundaries this preserves.
pub fn normalize_lines(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut pending_break = false;

    for line in text.lines() {
        let cleaned = normalize(line);
        if cleaned.is_empty() {
            pending_break = true;
            continue;
        }
        if !result.is_empty() {
            result.push_str(if pending_break { "\n\n" } else { "\n" });
        }
        result.push_str(&cleaned);
        pending_break = false;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(normalize("  Senior   Rust\n\n\tEngineer  "), "Senior Rust Engineer");
    }

    #[test]
    fn test_removes_non_semantic_characters() {
        assert_eq!(
            normalize("C++ & Rust (async) — 5+ years!"),
            "C Rust async 5 years"
        );
    }

    #[test]
    fn test_keeps_allowed_punctuation() {
        assert_eq!(
            normalize("Skills: Rust, Go; SQL - basics."),
            "Skills: Rust, Go; SQL - basics."
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \n\t "), "");
        assert_eq!(normalize("!!! ???"), "");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "a ! b",
            "What you'll need:\n\n- Rust\n- Tokio",
            "  ☕ coffee • tea  ",
            "Résumé — naïve café",
            "",
            "tabs\tand\r\nnewlines",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {sample:?}");
        }
    }

    #[test]
    fn test_unicode_word_characters_survive() {
        assert_eq!(normalize("Résumé naïve"), "Résumé naïve");
    }

    #[test]
    fn test_normalize_lines_preserves_paragraph_breaks() {
        let text = "Requirements:\n- Rust  \n- SQL\n\n\n\nAbout us  \n  We build things";
        assert_eq!(
            normalize_lines(text),
            "Requirements:\n- Rust\n- SQL\n\nAbout us\nWe build things"
        );
    }

    #[test]
    fn test_normalize_lines_drops_symbol_only_lines() {
        assert_eq!(normalize_lines("Title\n•••\nBody"), "Title\n\nBody");
    }
}
