use std::sync::Arc;
use std::time::Duration;

use crate::authenticity::{AiDetector, AuthenticityChecker, GptZeroDetector, HeuristicDetector};
use crate::config::Config;
use crate::matching::SimilarityEngine;
use crate::nlp::LanguageModel;
use crate::parsing::ResumeParser;
use crate::staging::Staging;
use crate::vocabulary::Vocabulary;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub parser: Arc<ResumeParser>,
    pub engine: Arc<SimilarityEngine>,
    /// Owns the company-verification cache, so one instance lives for the process.
    pub checker: Arc<AuthenticityChecker>,
    pub staging: Staging,
}

impl AppState {
    /// Wires every pipeline component to the same model and vocabulary.
    /// The remote AI detector is used only when an API key is configured.
    pub fn new(config: Config, model: Arc<dyn LanguageModel>, vocabulary: &Vocabulary) -> Self {
        let detector: Arc<dyn AiDetector> = match &config.gptzero_api_key {
            Some(api_key) => Arc::new(GptZeroDetector::new(
                api_key.clone(),
                Duration::from_secs(config.detector_timeout_secs),
                &vocabulary.buzzwords,
            )),
            None => Arc::new(HeuristicDetector::new(&vocabulary.buzzwords)),
        };

        let parser = ResumeParser::new(model.clone(), vocabulary)
            .with_name_entity_fallback(config.name_entity_fallback);
        let engine = SimilarityEngine::new(model.clone(), vocabulary, config.match_threshold)
            .with_strategy(config.match_strategy);
        let checker = AuthenticityChecker::new(model, detector, vocabulary);

        Self {
            staging: Staging::new(config.staging_dir.clone()),
            parser: Arc::new(parser),
            engine: Arc::new(engine),
            checker: Arc::new(checker),
            config,
        }
    }
}
