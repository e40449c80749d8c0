// Cover letter generation: fact assembly, prompt composition, model call,
// formatting and quality analysis.
// All model calls go through llm_client.

pub mod composer;
pub mod facts;
pub mod formatter;
pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod quality;
pub mod style;
