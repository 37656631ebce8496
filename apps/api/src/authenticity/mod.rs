// Authenticity analysis: AI-content likelihood (local heuristic or remote
// detector), unsupported-skill cross-reference, employer verification.
// All of it is heuristic; the score is a triage signal, not a verdict.

pub mod checker;
pub mod detector;
pub mod handlers;

pub use checker::{AuthenticityChecker, AuthenticityReport};
pub use detector::{AiDetector, GptZeroDetector, HeuristicDetector};
