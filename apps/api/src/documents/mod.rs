// Document ingestion: upload extraction, normalization, and heuristic section
// extraction for resumes and job descriptions. No model calls in this module.

pub mod chunking;
pub mod extract;
pub mod handlers;
pub mod jd_parser;
pub mod models;
pub mod normalize;
pub mod resume_scanner;
