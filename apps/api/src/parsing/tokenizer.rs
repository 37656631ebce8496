use crate::nlp::LanguageModel;
use crate::parsing::models::TokenSequence;

/// Collapses every run of whitespace (including line breaks) to a single space.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalizes `text` and tokenizes it with the injected model.
pub fn tokenize(model: &dyn LanguageModel, text: &str) -> TokenSequence {
    let normalized = normalize_whitespace(text);
    TokenSequence::new(model.tokenize(&normalized))
}
