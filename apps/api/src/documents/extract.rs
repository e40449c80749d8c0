//! Upload → text. The only place a document can fail hard.

use thiserror::Error;
use tracing::{debug, warn};

use crate::documents::models::{DocumentSource, RawDocument};

/// Default upload limit (5 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("{file_name}: unsupported file type (expected .pdf, .txt or .md)")]
    UnsupportedType { file_name: String },

    #[error("{file_name}: file is {size} bytes, limit is {limit} bytes")]
    TooLarge {
        file_name: String,
        size: usize,
        limit: usize,
    },

    #[error("{file_name}: could not read PDF: {message}")]
    Pdf { file_name: String, message: String },

    #[error("{file_name}: text is not valid UTF-8")]
    InvalidText { file_name: String },

    #[error("{file_name}: document contains no extractable text")]
    Empty { file_name: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileKind {
    Pdf,
    Text,
}

fn detect_kind(file_name: &str, content_type: Option<&str>, bytes: &[u8]) -> Option<FileKind> {
    let lower = file_name.to_ascii_lowercase();
    if lower.ends_with(".pdf") || content_type == Some("application/pdf") || bytes.starts_with(b"%PDF")
    {
        return Some(FileKind::Pdf);
    }
    if lower.ends_with(".txt")
        || lower.ends_with(".md")
        || content_type.is_some_and(|ct| ct.starts_with("text/"))
    {
        return Some(FileKind::Text);
    }
    None
}

/// Extracts text from uploaded bytes (PDF, plain text or markdown).
///
/// PDF parsing is CPU-bound; async callers should run this on the blocking pool.
pub fn extract_document(
    source: DocumentSource,
    file_name: &str,
    content_type: Option<&str>,
    bytes: &[u8],
    max_bytes: usize,
) -> Result<RawDocument, ExtractionError> {
    if bytes.len() > max_bytes {
        return Err(ExtractionError::TooLarge {
            file_name: file_name.to_string(),
            size: bytes.len(),
            limit: max_bytes,
        });
    }

    let kind = detect_kind(file_name, content_type, bytes).ok_or_else(|| {
        ExtractionError::UnsupportedType {
            file_name: file_name.to_string(),
        }
    })?;

    let text = match kind {
        FileKind::Pdf => extract_pdf_text(file_name, bytes)?,
        FileKind::Text => String::from_utf8(bytes.to_vec()).map_err(|_| {
            ExtractionError::InvalidText {
                file_name: file_name.to_string(),
            }
        })?,
    };

    if text.trim().is_empty() {
        return Err(ExtractionError::Empty {
            file_name: file_name.to_string(),
        });
    }

    debug!(
        source = source.as_str(),
        file_name,
        chars = text.len(),
        "Extracted document text"
    );

    Ok(RawDocument::new(source, text))
}

/// pdf-extract panics on some malformed inputs; a panic is reported as a parse failure.
fn extract_pdf_text(file_name: &str, bytes: &[u8]) -> Result<String, ExtractionError> {
    let outcome = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes));
    let message = match outcome {
        Ok(Ok(text)) => return Ok(text),
        Ok(Err(e)) => e.to_string(),
        Err(_) => "parser panicked on malformed input".to_string(),
    };
    warn!("PDF extraction failed for {file_name}: {message}");
    Err(ExtractionError::Pdf {
        file_name: file_name.to_string(),
        message,
    })
}
