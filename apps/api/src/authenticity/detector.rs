//! AI-content detection — local heuristic plus an optional remote detector.
//!
//! `AuthenticityChecker` holds an `Arc<dyn AiDetector>`, chosen at startup:
//! `HeuristicDetector` by default, `GptZeroDetector` when an API key is set.
//! Detection never fails from the caller's point of view; remote errors fall
//! back to the heuristic.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

const GPTZERO_API_URL: &str = "https://api.gptzero.me";
const GPTZERO_PREDICT_PATH: &str = "/v2/predict/text";
const MAX_ATTEMPTS: u32 = 2;
const RETRY_DELAY_MS: u64 = 250;

/// Heuristic verdict cutoff: ai_score strictly above this is suspicious.
pub const HEURISTIC_THRESHOLD: f64 = 0.5;
/// Remote verdict cutoff on the generated-text probability.
pub const REMOTE_THRESHOLD: f64 = 0.7;

const BUZZWORD_WEIGHT: f64 = 0.5;
const UNIFORMITY_WEIGHT: f64 = 0.3;
const GENERIC_WEIGHT: f64 = 0.2;
/// Sentences within this many words of the mean length count as uniform.
const UNIFORMITY_TOLERANCE: f64 = 3.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AiAssessment {
    pub ai_score: f64,
    pub is_suspected_ai: bool,
    pub triggered_buzzwords: Vec<String>,
}

impl AiAssessment {
    fn empty() -> Self {
        Self {
            ai_score: 0.0,
            is_suspected_ai: false,
            triggered_buzzwords: vec![],
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Heuristic
// ────────────────────────────────────────────────────────────────────────────

/// ai_score = 0.5 × buzzword density + 0.3 × sentence uniformity + 0.2 × generic phrasing
///
/// - buzzword density: distinct buzzwords found / total words
/// - sentence uniformity: share of `.`-delimited sentences whose word count is
///   within 3 of the mean
/// - generic phrasing: 1.0 when the text has no digit, 0.5 otherwise
pub fn detect_ai_content(text: &str, buzzwords: &[String]) -> AiAssessment {
    let lowered = text.to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();
    if words.is_empty() {
        return AiAssessment::empty();
    }

    let mut triggered_buzzwords: Vec<String> = Vec::new();
    for word in &words {
        let bare = word.trim_matches(|c: char| !c.is_alphanumeric());
        if buzzwords.iter().any(|b| b == bare) && !triggered_buzzwords.iter().any(|t| t == bare) {
            triggered_buzzwords.push(bare.to_string());
        }
    }
    let buzzword_density = triggered_buzzwords.len() as f64 / words.len() as f64;

    let sentence_lengths: Vec<f64> = text
        .split('.')
        .filter(|s| !s.trim().is_empty())
        .map(|s| s.split_whitespace().count() as f64)
        .collect();
    let sentence_uniformity = if sentence_lengths.is_empty() {
        0.0
    } else {
        let mean = sentence_lengths.iter().sum::<f64>() / sentence_lengths.len() as f64;
        let uniform = sentence_lengths
            .iter()
            .filter(|len| (*len - mean).abs() < UNIFORMITY_TOLERANCE)
            .count();
        uniform as f64 / sentence_lengths.len() as f64
    };

    let generic_phrasing = if text.chars().any(|c| c.is_ascii_digit()) {
        0.5
    } else {
        1.0
    };

    let ai_score = buzzword_density * BUZZWORD_WEIGHT
        + sentence_uniformity * UNIFORMITY_WEIGHT
        + generic_phrasing * GENERIC_WEIGHT;

    AiAssessment {
        ai_score,
        is_suspected_ai: ai_score > HEURISTIC_THRESHOLD,
        triggered_buzzwords,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait AiDetector: Send + Sync {
    async fn assess(&self, text: &str) -> AiAssessment;

    /// "heuristic" or "gptzero", for logs.
    fn backend(&self) -> &'static str;
}

pub struct HeuristicDetector {
    buzzwords: Vec<String>,
}

impl HeuristicDetector {
    pub fn new(buzzwords: &[String]) -> Self {
        Self {
            buzzwords: buzzwords.iter().map(|b| b.to_lowercase()).collect(),
        }
    }
}

#[async_trait]
impl AiDetector for HeuristicDetector {
    async fn assess(&self, text: &str) -> AiAssessment {
        detect_ai_content(text, &self.buzzwords)
    }

    fn backend(&self) -> &'static str {
        "heuristic"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// GPTZero remote detector
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum DetectorError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Detector returned no document predictions")]
    EmptyResult,
}

#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    document: &'a str,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    documents: Vec<DocumentPrediction>,
}

#[derive(Debug, Deserialize)]
struct DocumentPrediction {
    completely_generated_prob: f64,
}

/// Remote generated-text detector. Buzzwords still come from the local
/// heuristic, which is also the fallback verdict on any remote failure.
pub struct GptZeroDetector {
    client: Client,
    api_key: String,
    base_url: String,
    heuristic: HeuristicDetector,
}

impl GptZeroDetector {
    pub fn new(api_key: String, timeout: Duration, buzzwords: &[String]) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            base_url: GPTZERO_API_URL.to_string(),
            heuristic: HeuristicDetector::new(buzzwords),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Generated-text probability for `text`. Retries once on transport
    /// errors, 429 and 5xx.
    pub async fn predict(&self, text: &str) -> Result<f64, DetectorError> {
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), GPTZERO_PREDICT_PATH);
        let body = PredictRequest { document: text };
        let mut last_error: Option<DetectorError> = None;

        for attempt in 0..MAX_ATTEMPTS {
            if attempt > 0 {
                warn!(
                    "Detector call attempt {} failed, retrying after {}ms...",
                    attempt, RETRY_DELAY_MS
                );
                tokio::time::sleep(Duration::from_millis(RETRY_DELAY_MS)).await;
            }

            let response = match self
                .client
                .post(&url)
                .header("x-api-key", &self.api_key)
                .json(&body)
                .send()
                .await
            {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(DetectorError::Http(e));
                    continue;
                }
            };

            let status = response.status();
            if status.as_u16() == 429 || status.is_server_error() {
                last_error = Some(DetectorError::Api {
                    status: status.as_u16(),
                    message: response.text().await.unwrap_or_default(),
                });
                continue;
            }
            if !status.is_success() {
                return Err(DetectorError::Api {
                    status: status.as_u16(),
                    message: response.text().await.unwrap_or_default(),
                });
            }

            let bytes = response.bytes().await?;
            let parsed: PredictResponse = serde_json::from_slice(&bytes)?;
            let probability = parsed
                .documents
                .first()
                .map(|d| d.completely_generated_prob)
                .ok_or(DetectorError::EmptyResult)?;

            debug!(probability, "Detector call succeeded");
            return Ok(probability);
        }

        Err(last_error.unwrap_or(DetectorError::EmptyResult))
    }
}

#[async_trait]
impl AiDetector for GptZeroDetector {
    async fn assess(&self, text: &str) -> AiAssessment {
        let local = self.heuristic.assess(text).await;

        match self.predict(text).await {
            Ok(probability) => AiAssessment {
                ai_score: probability,
                is_suspected_ai: probability > REMOTE_THRESHOLD,
                triggered_buzzwords: local.triggered_buzzwords,
            },
            Err(e) => {
                warn!(error = %e, "Remote AI detection failed, using heuristic");
                local
            }
        }
    }

    fn backend(&self) -> &'static str {
        "gptzero"
    }
}
