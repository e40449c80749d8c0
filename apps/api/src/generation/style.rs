//! Tone and writing style selection.
//!
//! Both parse lossily: anything unrecognized falls back to the default
//! (`Professional` / `Standard`) rather than failing the request.

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Tone {
    #[default]
    Professional,
    Enthusiastic,
    Confident,
    Conservative,
}

impl Tone {
    pub fn parse_lossy(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "enthusiastic" => Tone::Enthusiastic,
            "confident" => Tone::Confident,
            "conservative" => Tone::Conservative,
            _ => Tone::Professional,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Professional => "Professional",
            Tone::Enthusiastic => "Enthusiastic",
            Tone::Confident => "Confident",
            Tone::Conservative => "Conservative",
        }
    }

    pub fn guidelines(&self) -> &'static str {
        match self {
            Tone::Professional => {
                "- Use formal language and industry-standard terminology\n\
                 - Focus on measurable achievements and concrete skills\n\
                 - Maintain objectivity and clarity\n\
                 - Use precise, direct statements"
            }
            Tone::Enthusiastic => {
                "- Emphasize positive outcomes and achievements\n\
                 - Show genuine interest in specific projects and technologies\n\
                 - Use active, energetic language while maintaining professionalism\n\
                 - Highlight collaborative successes"
            }
            Tone::Confident => {
                "- Lead with strong action verbs\n\
                 - Emphasize leadership and initiative\n\
                 - Focus on quantifiable achievements\n\
                 - Use assertive but not aggressive language"
            }
            Tone::Conservative => {
                "- Use traditional business language\n\
                 - Maintain formal tone throughout\n\
                 - Focus on established achievements\n\
                 - Keep descriptions straightforward and factual"
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum WritingStyle {
    #[default]
    Standard,
    Technical,
    Creative,
    Executive,
}

impl WritingStyle {
    pub fn parse_lossy(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "technical" => WritingStyle::Technical,
            "creative" => WritingStyle::Creative,
            "executive" => WritingStyle::Executive,
            _ => WritingStyle::Standard,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WritingStyle::Standard => "Standard",
            WritingStyle::Technical => "Technical",
            WritingStyle::Creative => "Creative",
            WritingStyle::Executive => "Executive",
        }
    }

    pub fn guidelines(&self) -> &'static str {
        match self {
            WritingStyle::Standard => {
                "- Clear, straightforward writing\n\
                 - Balanced mix of technical and business language\n\
                 - Traditional business letter structure\n\
                 - Focus on relevant achievements"
            }
            WritingStyle::Technical => {
                "- Emphasize technical skills and achievements\n\
                 - Use industry-specific terminology\n\
                 - Include specific technologies and methodologies\n\
                 - Focus on technical problem-solving examples"
            }
            WritingStyle::Creative => {
                "- Use descriptive language while maintaining professionalism\n\
                 - Highlight innovative problem-solving\n\
                 - Emphasize unique approaches and solutions\n\
                 - Focus on creative achievements"
            }
            WritingStyle::Executive => {
                "- Focus on leadership and strategic thinking\n\
                 - Emphasize high-level impact\n\
                 - Use business-focused language\n\
                 - Highlight organizational impact"
            }
        }
    }
}

// Lossy on the wire too, so a JSON body with "tone": "Snarky" still works.
impl<'de> Deserialize<'de> for Tone {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Tone::parse_lossy(&raw))
    }
}

impl<'de> Deserialize<'de> for WritingStyle {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(WritingStyle::parse_lossy(&raw))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleConfig {
    #[serde(default)]
    pub tone: Tone,
    #[serde(default)]
    pub style: WritingStyle,
}

impl StyleConfig {
    pub fn from_optional(tone: Option<&str>, style: Option<&str>) -> Self {
        Self {
            tone: tone.map(Tone::parse_lossy).unwrap_or_default(),
            style: style.map(WritingStyle::parse_lossy).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_parse_is_case_insensitive() {
        assert_eq!(Tone::parse_lossy("CONFIDENT"), Tone::Confident);
        assert_eq!(Tone::parse_lossy(" enthusiastic "), Tone::Enthusiastic);
    }

    #[test]
    fn test_unknown_values_fall_back() {
        assert_eq!(Tone::parse_lossy("snarky"), Tone::Professional);
        assert_eq!(WritingStyle::parse_lossy(""), WritingStyle::Standard);
    }

    #[test]
    fn test_every_variant_has_guidelines() {
        for tone in [
            Tone::Professional,
            Tone::Enthusiastic,
            Tone::Confident,
            Tone::Conservative,
        ] {
            assert!(tone.guidelines().starts_with("- "));
            assert_eq!(Tone::parse_lossy(tone.as_str()), tone);
        }
        for style in [
            WritingStyle::Standard,
            WritingStyle::Technical,
            WritingStyle::Creative,
            WritingStyle::Executive,
        ] {
            assert!(style.guidelines().starts_with("- "));
            assert_eq!(WritingStyle::parse_lossy(style.as_str()), style);
        }
    }

    #[test]
    fn test_json_deserialization_is_lossy() {
        let config: StyleConfig =
            serde_json::from_str(r#"{"tone": "Snarky", "style": "technical"}"#).unwrap();
        assert_eq!(config.tone, Tone::Professional);
        assert_eq!(config.style, WritingStyle::Technical);

        let empty: StyleConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, StyleConfig::default());
    }

    #[test]
    fn test_from_optional() {
        let config = StyleConfig::from_optional(None, Some("Executive"));
        assert_eq!(config.tone, Tone::Professional);
        assert_eq!(config.style, WritingStyle::Executive);
    }
}
