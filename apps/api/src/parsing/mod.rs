// Resume parsing: whitespace normalization and tokenization, rule-based field
// extraction, canonicalization into a `Resume`.
// Every stage is total over arbitrary text; missing fields come back empty.

pub mod extractor;
pub mod handlers;
pub mod models;
pub mod normalizer;
pub mod pipeline;
pub mod tokenizer;

pub use pipeline::{ParsedResume, ResumeParser};
