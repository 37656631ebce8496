//! Similarity Engine — scores a canonical resume against a job description.
//!
//! Algorithm:
//! 1. Job skills = vocabulary skills whose folded text occurs in the folded JD
//! 2. Embed resume and job skills; zero-norm vectors are skipped
//! 3. Pair resume skills with job skills whose cosine similarity reaches the
//!    threshold (greedy per resume skill, or a global optimal assignment)
//! 4. similarity = min(1, Σ rounded pair scores / max(1, |job skills|)) × 100

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::matching::assignment::max_weight_assignment;
use crate::matching::MatchStrategy;
use crate::nlp::{cosine_similarity, vector_norm, LanguageModel};
use crate::parsing::models::Resume;
use crate::vocabulary::Vocabulary;

pub const DEFAULT_THRESHOLD: f64 = 0.95;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    /// resume skill → (job skill, cosine similarity rounded to 2 dp)
    pub matched_skills: BTreeMap<String, (String, f64)>,
    /// Job skills with no accepted match, in job-skill order.
    pub missing_job_skills: Vec<String>,
    /// Resume skills with no accepted match. Informational only.
    pub extra_resume_skills: Vec<String>,
    /// 0 – 100
    pub similarity_score: f64,
}

pub struct SimilarityEngine {
    model: Arc<dyn LanguageModel>,
    skills: Vec<String>,
    threshold: f64,
    strategy: MatchStrategy,
}

struct Embedded<'a> {
    skill: &'a str,
    vector: Vec<f32>,
}

impl SimilarityEngine {
    pub fn new(model: Arc<dyn LanguageModel>, vocabulary: &Vocabulary, threshold: f64) -> Self {
        Self {
            model,
            skills: vocabulary.skills.clone(),
            threshold,
            strategy: MatchStrategy::Greedy,
        }
    }

    pub fn with_strategy(mut self, strategy: MatchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn strategy(&self) -> MatchStrategy {
        self.strategy
    }

    /// Vocabulary skills mentioned anywhere in the job description, in
    /// vocabulary order and display form.
    pub fn job_skills(&self, job_description: &str) -> Vec<String> {
        let folded_jd = job_description.to_lowercase();
        let mut seen = HashSet::new();

        self.skills
            .iter()
            .filter(|skill| {
                let folded = skill.to_lowercase();
                folded_jd.contains(&folded) && seen.insert(folded)
            })
            .cloned()
            .collect()
    }

    pub fn compare(&self, resume: &Resume, job_description: &str) -> MatchResult {
        let job_skills = self.job_skills(job_description);

        let resume_vectors = self.embed_all(resume.skills.iter().map(String::as_str));
        let job_vectors = self.embed_all(job_skills.iter().map(String::as_str));

        let pairs = match self.strategy {
            MatchStrategy::Greedy => self.greedy_pairs(&resume_vectors, &job_vectors),
            MatchStrategy::Optimal => self.optimal_pairs(&resume_vectors, &job_vectors),
        };

        let mut matched_skills = BTreeMap::new();
        let mut matched_jobs = HashSet::new();
        for (skill, job, score) in pairs {
            matched_jobs.insert(job);
            matched_skills.insert(skill.to_string(), (job.to_string(), round2(score)));
        }

        let missing_job_skills: Vec<String> = job_skills
            .iter()
            .filter(|j| !matched_jobs.contains(j.as_str()))
            .cloned()
            .collect();
        let extra_resume_skills: Vec<String> = resume
            .skills
            .iter()
            .filter(|s| !matched_skills.contains_key(s.as_str()))
            .cloned()
            .collect();

        let total: f64 = matched_skills.values().map(|(_, score)| score).sum();
        let coverage = (total / job_skills.len().max(1) as f64).min(1.0);
        let similarity_score = round2(coverage * 100.0);

        debug!(
            strategy = ?self.strategy,
            job_skills = job_skills.len(),
            matched = matched_skills.len(),
            similarity_score,
            "Compared resume against job description"
        );

        MatchResult {
            matched_skills,
            missing_job_skills,
            extra_resume_skills,
            similarity_score,
        }
    }

    fn embed_all<'a>(&self, skills: impl Iterator<Item = &'a str>) -> Vec<Embedded<'a>> {
        skills
            .map(|skill| Embedded {
                skill,
                vector: self.model.embed(skill),
            })
            .filter(|e| vector_norm(&e.vector) > 0.0)
            .collect()
    }

    /// Each resume skill takes its single best job skill. Job skills are not
    /// consumed, so several resume skills may match the same one.
    fn greedy_pairs<'a>(
        &self,
        resume: &[Embedded<'a>],
        jobs: &[Embedded<'a>],
    ) -> Vec<(&'a str, &'a str, f64)> {
        let mut pairs = Vec::new();

        for r in resume {
            let mut best: Option<&str> = None;
            let mut best_score = 0.0;

            for j in jobs {
                let score = cosine_similarity(&r.vector, &j.vector);
                if score > best_score {
                    best_score = score;
                    best = Some(j.skill);
                }
            }

            if let Some(job) = best {
                if best_score >= self.threshold {
                    pairs.push((r.skill, job, best_score));
                }
            }
        }

        pairs
    }

    /// One-to-one assignment maximizing the summed score of eligible pairs.
    fn optimal_pairs<'a>(
        &self,
        resume: &[Embedded<'a>],
        jobs: &[Embedded<'a>],
    ) -> Vec<(&'a str, &'a str, f64)> {
        let scores: Vec<Vec<f64>> = resume
            .iter()
            .map(|r| {
                jobs.iter()
                    .map(|j| cosine_similarity(&r.vector, &j.vector))
                    .collect()
            })
            .collect();
        let eligible = |score: f64| score > 0.0 && score >= self.threshold;

        let weights: Vec<Vec<f64>> = scores
            .iter()
            .map(|row| row.iter().map(|&s| if eligible(s) { s } else { 0.0 }).collect())
            .collect();

        max_weight_assignment(&weights)
            .into_iter()
            .enumerate()
            .filter_map(|(r, col)| {
                let c = col?;
                let score = scores[r][c];
                eligible(score).then(|| (resume[r].skill, jobs[c].skill, score))
            })
            .collect()
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
