// Skill matching: job-skill extraction, embedding similarity, percentage score.
// Greedy per-resume-skill matching is the default; the optimal one-to-one
// assignment is opt-in through MATCH_STRATEGY.

pub mod assignment;
pub mod handlers;
pub mod similarity;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use similarity::{MatchResult, SimilarityEngine};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStrategy {
    Greedy,
    Optimal,
}

#[derive(Debug, Error)]
#[error("unknown match strategy '{0}' (expected 'greedy' or 'optimal')")]
pub struct UnknownStrategy(String);

impl FromStr for MatchStrategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "greedy" => Ok(MatchStrategy::Greedy),
            "optimal" => Ok(MatchStrategy::Optimal),
            other => Err(UnknownStrategy(other.to_string())),
        }
    }
}

impl fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchStrategy::Greedy => write!(f, "greedy"),
            MatchStrategy::Optimal => write!(f, "optimal"),
        }
    }
}
