use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Phrases that read as machine-written.
const AI_PATTERNS: &[&str] = &[
    "i am writing to express",
    "i am excited to apply",
    "i am thrilled",
    "delve",
    "in today's fast-paced",
    "passionate about",
    "great fit",
    "perfect fit",
    "i am confident that",
    "leverage my skills",
    "unique blend",
    "testament to",
    "ever-evolving",
    "i would welcome the opportunity",
];

const CLICHES: &[&str] = &[
    "team player",
    "detail-oriented",
    "hard worker",
    "hard-working",
    "self-starter",
    "think outside the box",
    "proven track record",
    "go-getter",
    "results-driven",
    "dynamic",
    "synergy",
    "fast learner",
    "go above and beyond",
];

type Lexicon = Vec<(&'static str, Regex)>;

static AI_PATTERN_MATCHERS: LazyLock<Lexicon> = LazyLock::new(|| word_matchers(AI_PATTERNS));
static CLICHE_MATCHERS: LazyLock<Lexicon> = LazyLock::new(|| word_matchers(CLICHES));

/// Phrases match on word boundaries only, so "dynamic" skips "dynamically".
fn word_matchers(phrases: &[&'static str]) -> Lexicon {
    phrases
        .iter()
        .map(|phrase| {
            let pattern = format!(r"\b{}\b", regex::escape(phrase));
            (*phrase, Regex::new(&pattern).expect("lexicon phrases are valid patterns"))
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityConfig {
    pub min_readability: f64,
    pub max_readability: f64,
    pub min_words: usize,
    pub max_words: usize,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            min_readability: 45.0,
            max_readability: 70.0,
            min_words: 250,
            max_words: 400,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    pub ai_patterns_detected: Vec<String>,
    pub cliches_found: Vec<String>,
    /// Flesch reading ease, one decimal.
    pub readability_score: f64,
    pub word_count: usize,
    pub suggestions: Vec<String>,
    pub passed: bool,
}

#[derive(Debug, Clone, Default)]
pub struct QualityChecker {
    config: QualityConfig,
}

impl QualityChecker {
    pub fn new(config: QualityConfig) -> Self {
        Self { config }
    }

    /// Scores a letter. No I/O; every finding adds exactly one suggestion.
    pub fn analyze(&self, text: &str) -> QualityReport {
        let lower = text.to_lowercase().replace('\u{2019}', "'");

        let ai_patterns_detected = find_all(&lower, &AI_PATTERN_MATCHERS);
        let cliches_found = find_all(&lower, &CLICHE_MATCHERS);

        let words = words(text);
        let word_count = words.len();
        let readability_score = (flesch_reading_ease(text, &words) * 10.0).round() / 10.0;

        let mut suggestions = Vec::new();
        for pattern in &ai_patterns_detected {
            suggestions.push(format!("Rephrase \"{pattern}\"; it reads as generated text."));
        }
        for cliche in &cliches_found {
            suggestions.push(format!(
                "Replace the cliché \"{cliche}\" with a concrete example."
            ));
        }

        let QualityConfig {
            min_readability,
            max_readability,
            min_words,
            max_words,
        } = self.config;
        if readability_score < min_readability {
            suggestions.push(format!(
                "Readability score {readability_score} is below {min_readability}; use shorter sentences and simpler words."
            ));
        } else if readability_score > max_readability {
            suggestions.push(format!(
                "Readability score {readability_score} is above {max_readability}; the letter may read as too casual."
            ));
        }
        if word_count < min_words {
            suggestions.push(format!(
                "Letter has {word_count} words; aim for at least {min_words}."
            ));
        } else if word_count > max_words {
            suggestions.push(format!(
                "Letter has {word_count} words; trim it to at most {max_words}."
            ));
        }

        QualityReport {
            passed: suggestions.is_empty(),
            ai_patterns_detected,
            cliches_found,
            readability_score,
            word_count,
            suggestions,
        }
    }
}

fn find_all(lower: &str, lexicon: &Lexicon) -> Vec<String> {
    lexicon
        .iter()
        .filter(|(_, matcher)| matcher.is_match(lower))
        .map(|(phrase, _)| phrase.to_string())
        .collect()
}

/// Whitespace-separated tokens stripped of surrounding punctuation.
fn words(text: &str) -> Vec<&str> {
    text.split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| !w.is_empty())
        .collect()
}

fn sentence_count(text: &str) -> usize {
    text.split(['.', '!', '?'])
        .filter(|s| s.chars().any(char::is_alphanumeric))
        .count()
        .max(1)
}

/// Vowel-group heuristic; a trailing silent `e` is not counted.
fn syllables(word: &str) -> usize {
    let lower = word.to_lowercase();
    let mut count = 0;
    let mut prev_vowel = false;
    for c in lower.chars() {
        let vowel = matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
        if vowel && !prev_vowel {
            count += 1;
        }
        prev_vowel = vowel;
    }
    if count > 1 && lower.ends_with('e') && !lower.ends_with("le") {
        count -= 1;
    }
    count.max(1)
}

fn flesch_reading_ease(text: &str, words: &[&str]) -> f64 {
    if words.is_empty() {
        return 0.0;
    }
    let word_count = words.len() as f64;
    let sentences = sentence_count(text) as f64;
    let syllable_count: usize = words.iter().map(|w| syllables(w)).sum();
    206.835 - 1.015 * (word_count / sentences) - 84.6 * (syllable_count as f64 / word_count)
}
