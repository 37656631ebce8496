//! Resume Parser — Tokenizer → Field Extractor → Resume Normalizer.
//!
//! One `ResumeParser` is built at startup and shared through `AppState`.
//! Parsing is synchronous and CPU-bound; handlers call it inside
//! `tokio::task::spawn_blocking`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::nlp::{EntityLabel, LanguageModel};
use crate::parsing::extractor::FieldExtractor;
use crate::parsing::models::{Resume, TokenSequence};
use crate::parsing::normalizer::ResumeNormalizer;
use crate::parsing::tokenizer::tokenize;
use crate::vocabulary::Vocabulary;

/// Number of leading characters searched by the entity name fallback.
const NAME_FALLBACK_WINDOW: usize = 200;

/// Output of a full parse: the intermediate tokens and the canonical record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedResume {
    pub tokens: TokenSequence,
    pub resume: Resume,
}

pub struct ResumeParser {
    model: Arc<dyn LanguageModel>,
    extractor: FieldExtractor,
    normalizer: ResumeNormalizer,
    name_entity_fallback: bool,
}

impl ResumeParser {
    pub fn new(model: Arc<dyn LanguageModel>, vocabulary: &Vocabulary) -> Self {
        Self {
            model,
            extractor: FieldExtractor::new(vocabulary),
            normalizer: ResumeNormalizer::new(vocabulary),
            name_entity_fallback: false,
        }
    }

    /// When enabled, the first PERSON entity near the top of the text names
    /// the candidate if no name pattern matched.
    pub fn with_name_entity_fallback(mut self, enabled: bool) -> Self {
        self.name_entity_fallback = enabled;
        self
    }

    pub fn parse(&self, text: &str) -> ParsedResume {
        let tokens = tokenize(self.model.as_ref(), text);
        let mut raw = self.extractor.extract(&tokens);

        if raw.name.is_none() && self.name_entity_fallback {
            raw.name = self.person_near_top(text);
            debug!(found = raw.name.is_some(), "Name entity fallback");
        }

        let resume = self.normalizer.normalize(raw);
        ParsedResume { tokens, resume }
    }

    fn person_near_top(&self, text: &str) -> Option<String> {
        let end = text
            .char_indices()
            .nth(NAME_FALLBACK_WINDOW)
            .map(|(i, _)| i)
            .unwrap_or(text.len());

        self.model
            .entities(&text[..end])
            .into_iter()
            .find(|span| span.label == EntityLabel::Person)
            .map(|span| span.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::testing::StubModel;
    use crate::nlp::RuleBasedModel;
    use crate::parsing::models::ExperienceEntry;

    fn rule_parser() -> ResumeParser {
        ResumeParser::new(Arc::new(RuleBasedModel::new()), &Vocabulary::default())
    }

    #[test]
    fn test_parse_end_to_end() {
        let text = "Jane Doe\nEmail: jane@example.com\nSkills: Python, Docker, python\n\
                    Experience\n• Engineer (2019-2021): Built data pipelines in Python";
        let parsed = rule_parser().parse(text);

        assert_eq!(parsed.resume.name.as_deref(), Some("Jane Doe"));
        assert_eq!(parsed.resume.email.as_deref(), Some("jane@example.com"));
        assert!(parsed.resume.skills.contains("python"));
        assert!(parsed.resume.skills.contains("docker"));
        assert_eq!(
            parsed.resume.experience,
            vec![ExperienceEntry::Dated {
                role: "Engineer".to_string(),
                duration: "2019-2021".to_string(),
            }]
        );
        assert_eq!(parsed.tokens.as_slice()[0], "Jane");
    }

    #[test]
    fn test_parse_empty_text() {
        let parsed = rule_parser().parse("   ");
        assert!(parsed.tokens.is_empty());
        assert_eq!(parsed.resume, Resume::default());
    }

    #[test]
    fn test_name_fallback_off_by_default() {
        let model = StubModel::new(3).with_entity("Priya Natarajan", EntityLabel::Person);
        let parser = ResumeParser::new(Arc::new(model), &Vocabulary::default());
        let parsed = parser.parse("Priya Natarajan - Data Analyst");
        assert_eq!(parsed.resume.name, None);
    }

    #[test]
    fn test_name_fallback_uses_first_person_entity() {
        let model = StubModel::new(3)
            .with_entity("Acme Labs", EntityLabel::Org)
            .with_entity("Priya Natarajan", EntityLabel::Person);
        let parser = ResumeParser::new(Arc::new(model), &Vocabulary::default())
            .with_name_entity_fallback(true);
        let parsed = parser.parse("Acme Labs alumni Priya Natarajan - Data Analyst");
        assert_eq!(parsed.resume.name.as_deref(), Some("Priya Natarajan"));
    }

    #[test]
    fn test_name_fallback_limited_to_leading_window() {
        let model = StubModel::new(3).with_entity("Priya Natarajan", EntityLabel::Person);
        let parser = ResumeParser::new(Arc::new(model), &Vocabulary::default())
            .with_name_entity_fallback(true);
        let text = format!("{} Priya Natarajan", "filler ".repeat(40));
        assert_eq!(parser.parse(&text).resume.name, None);
    }

    #[test]
    fn test_pattern_name_wins_over_fallback() {
        let model = StubModel::new(3).with_entity("Someone Else", EntityLabel::Person);
        let parser = ResumeParser::new(Arc::new(model), &Vocabulary::default())
            .with_name_entity_fallback(true);
        let parsed = parser.parse("Jane Doe Email: jane@example.com Someone Else");
        assert_eq!(parsed.resume.name.as_deref(), Some("Jane Doe"));
    }
}
