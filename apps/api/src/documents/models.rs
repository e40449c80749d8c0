use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Where an uploaded document came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentSource {
    Resume,
    JobDescription,
    SupportingDoc,
}

impl DocumentSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentSource::Resume => "resume",
            DocumentSource::JobDescription => "job_description",
            DocumentSource::SupportingDoc => "supporting_doc",
        }
    }
}

/// Unstructured text extracted from an upload. Lives for one generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDocument {
    source: DocumentSource,
    text: String,
}

impl RawDocument {
    pub fn new(source: DocumentSource, text: impl Into<String>) -> Self {
        Self {
            source,
            text: text.into(),
        }
    }

    pub fn source(&self) -> DocumentSource {
        self.source
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Structured view of a job description.
///
/// `full_text` is always present. The extracted sets may be empty when no label
/// matched; callers must not read meaning into their iteration order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessedJobDescription {
    pub full_text: String,
    /// Overlapping windows over `full_text`, in source order.
    pub sections: Vec<String>,
    pub requirements: BTreeSet<String>,
    pub responsibilities: BTreeSet<String>,
    pub skills: BTreeSet<String>,
}

/// Labeled blocks sliced out of a resume. A block whose label was not found is `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeBlocks {
    pub education: Option<String>,
    pub experience: Option<String>,
    pub skills: Option<String>,
}

impl ResumeBlocks {
    pub fn is_empty(&self) -> bool {
        self.education.is_none() && self.experience.is_none() && self.skills.is_none()
    }
}
