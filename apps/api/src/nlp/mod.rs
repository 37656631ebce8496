// Language capabilities: tokenization, phrase embedding, entity recognition.
// The pipeline only sees the `LanguageModel` trait; `RuleBasedModel` is the
// bundled local implementation and tests inject `testing::StubModel`.

pub mod embedding;
pub mod entities;
pub mod tokenizer;

use serde::{Deserialize, Serialize};

pub use embedding::{cosine_similarity, vector_norm};

/// Entity classes the pipeline cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityLabel {
    Org,
    Person,
}

/// A recognized entity. `start`/`end` are byte offsets into the analyzed text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySpan {
    pub text: String,
    pub label: EntityLabel,
    pub start: usize,
    pub end: usize,
}

/// The language capability injected into every pipeline stage that needs one.
///
/// Implementations must be deterministic: identical input yields identical output.
/// `embed` returns a fixed-length vector; an all-zero vector means "unknown phrase".
pub trait LanguageModel: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<String>;
    fn embed(&self, phrase: &str) -> Vec<f32>;
    fn entities(&self, text: &str) -> Vec<EntitySpan>;
}

/// Local, dependency-free model: punctuation-aware tokenizer, hashed character
/// trigram embeddings, capitalization-run entity recognizer.
#[derive(Debug, Clone)]
pub struct RuleBasedModel {
    dimensions: usize,
}

impl RuleBasedModel {
    pub fn new() -> Self {
        Self {
            dimensions: embedding::DEFAULT_DIMENSIONS,
        }
    }
}

impl Default for RuleBasedModel {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageModel for RuleBasedModel {
    fn tokenize(&self, text: &str) -> Vec<String> {
        tokenizer::rule_tokenize(text)
    }

    fn embed(&self, phrase: &str) -> Vec<f32> {
        embedding::hashed_trigram_vector(phrase, self.dimensions)
    }

    fn entities(&self, text: &str) -> Vec<EntitySpan> {
        entities::recognize(text)
    }
}
