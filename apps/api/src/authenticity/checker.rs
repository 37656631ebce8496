//! Authenticity Checker — AI-content likelihood, skill cross-reference and
//! employer verification, folded into a 0–100 authenticity score.

use std::collections::HashSet;
use std::sync::Arc;

use moka::sync::Cache;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::authenticity::detector::AiDetector;
use crate::nlp::{EntityLabel, LanguageModel};
use crate::parsing::models::Resume;
use crate::vocabulary::Vocabulary;

const COMPANY_SUFFIX_PATTERN: &str =
    r"(?i)(Inc\.|LLC|Corp\.|Corporation| Ltd\.| GmbH| Solutions| Technologies| Systems)$";

const FLAG_PENALTY: u32 = 20;
const MAX_SCORE: u32 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticityReport {
    pub ai_score: f64,
    #[serde(rename = "isSuspectedAI")]
    pub is_suspected_ai: bool,
    pub triggered_buzzwords: Vec<String>,
    pub unsupported_skills: Vec<String>,
    pub invalid_companies: Vec<String>,
    pub authenticity_flags: Vec<String>,
    /// 100 − 20 per flag, floored at 0.
    pub authenticity_score: u32,
}

// ────────────────────────────────────────────────────────────────────────────
// Checker
// ────────────────────────────────────────────────────────────────────────────

pub struct AuthenticityChecker {
    model: Arc<dyn LanguageModel>,
    detector: Arc<dyn AiDetector>,
    major_tech_companies: Vec<String>,
    stop_words: HashSet<String>,
    company_suffix: Regex,
    /// Company name → verdict. Unbounded and never evicted.
    company_verdicts: Cache<String, bool>,
}

impl AuthenticityChecker {
    pub fn new(
        model: Arc<dyn LanguageModel>,
        detector: Arc<dyn AiDetector>,
        vocabulary: &Vocabulary,
    ) -> Self {
        Self {
            model,
            detector,
            major_tech_companies: vocabulary
                .major_tech_companies
                .iter()
                .map(|c| c.to_lowercase())
                .collect(),
            stop_words: vocabulary.stop_words.clone(),
            company_suffix: Regex::new(COMPANY_SUFFIX_PATTERN)
                .expect("company suffix pattern is valid"),
            company_verdicts: Cache::builder().build(),
        }
    }

    pub fn detector_backend(&self) -> &'static str {
        self.detector.backend()
    }

    pub async fn check(&self, resume: &Resume) -> AuthenticityReport {
        let corpus = evidence_corpus(resume);
        let mut flags = Vec::new();

        let (ai_score, is_suspected_ai, triggered_buzzwords) = if corpus.trim().is_empty() {
            (0.0, false, vec![])
        } else {
            let assessment = self.detector.assess(&corpus).await;
            (
                assessment.ai_score,
                assessment.is_suspected_ai,
                assessment.triggered_buzzwords,
            )
        };
        if is_suspected_ai {
            flags.push(format!(
                "Suspected AI-generated content (buzzwords: {})",
                triggered_buzzwords.join(", ")
            ));
        }

        let unsupported_skills = self.cross_reference_skills(resume, &corpus);
        if !unsupported_skills.is_empty() {
            flags.push(format!(
                "Skills without supporting experience or projects: {}",
                unsupported_skills.join(", ")
            ));
        }

        let invalid_companies: Vec<String> = resume
            .experience
            .iter()
            .filter_map(|entry| claimed_company(entry.details()))
            .filter(|company| !self.verify_company(company))
            .map(str::to_string)
            .collect();
        if !invalid_companies.is_empty() {
            flags.push(format!(
                "Invalid or unverifiable companies: {}",
                invalid_companies.join(", ")
            ));
        }

        let penalty = FLAG_PENALTY.saturating_mul(flags.len() as u32);
        let authenticity_score = MAX_SCORE.saturating_sub(penalty);

        debug!(
            backend = self.detector.backend(),
            ai_score,
            unsupported = unsupported_skills.len(),
            invalid_companies = invalid_companies.len(),
            authenticity_score,
            cached_companies = self.company_verdicts.entry_count(),
            "Authenticity check complete"
        );

        AuthenticityReport {
            ai_score,
            is_suspected_ai,
            triggered_buzzwords,
            unsupported_skills,
            invalid_companies,
            authenticity_flags: flags,
            authenticity_score,
        }
    }

    /// Skills whose text never appears in experience or project text.
    /// Stop-words are never reported.
    pub fn cross_reference_skills(&self, resume: &Resume, corpus: &str) -> Vec<String> {
        let corpus = corpus.to_lowercase();
        resume
            .skills
            .iter()
            .filter(|skill| {
                let folded = skill.to_lowercase();
                !corpus.contains(&folded) && !self.stop_words.contains(&folded)
            })
            .cloned()
            .collect()
    }

    /// A company is plausible if it names a major tech company, is tagged as an
    /// organization, or carries a corporate suffix. Verdicts are cached by name.
    pub fn verify_company(&self, name: &str) -> bool {
        if name.is_empty() {
            return false;
        }
        self.company_verdicts
            .get_with_by_ref(name, || self.classify_company(name))
    }

    fn classify_company(&self, name: &str) -> bool {
        let folded = name.to_lowercase();
        let is_major_tech = self
            .major_tech_companies
            .iter()
            .any(|c| folded.contains(c.as_str()));
        let is_org = || {
            self.model
                .entities(name)
                .iter()
                .any(|span| span.label == EntityLabel::Org)
        };
        let has_suffix = || self.company_suffix.is_match(name);

        is_major_tech || is_org() || has_suffix()
    }
}

/// Experience `details + " " + role` and project `description + " " + title`,
/// space-joined.
pub fn evidence_corpus(resume: &Resume) -> String {
    let experience = resume
        .experience
        .iter()
        .map(|e| format!("{} {}", e.details(), e.role()));
    let projects = resume
        .projects
        .iter()
        .map(|p| format!("{} {}", p.description, p.title));

    experience.chain(projects).collect::<Vec<_>>().join(" ")
}

/// First line of an entry's details, if any.
fn claimed_company(details: &str) -> Option<&str> {
    let first = details.split('\n').next().unwrap_or_default().trim();
    (!first.is_empty()).then_some(first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authenticity::detector::{AiAssessment, HeuristicDetector};
    use crate::nlp::testing::StubModel;
    use crate::nlp::RuleBasedModel;
    use crate::parsing::models::{ExperienceEntry, Project};
    use async_trait::async_trait;

    /// Detector with a fixed verdict, for flag arithmetic.
    struct FixedDetector(bool);

    #[async_trait]
    impl AiDetector for FixedDetector {
        async fn assess(&self, _text: &str) -> AiAssessment {
            AiAssessment {
                ai_score: if self.0 { 0.9 } else { 0.1 },
                is_suspected_ai: self.0,
                triggered_buzzwords: vec![],
            }
        }

        fn backend(&self) -> &'static str {
            "fixed"
        }
    }

    fn checker_with(detector: Arc<dyn AiDetector>) -> AuthenticityChecker {
        AuthenticityChecker::new(Arc::new(RuleBasedModel::new()), detector, &Vocabulary::default())
    }

    fn dated(role: &str) -> ExperienceEntry {
        ExperienceEntry::Dated {
            role: role.to_string(),
            duration: "2020-2022".to_string(),
        }
    }

    fn unclassified(details: &str) -> ExperienceEntry {
        ExperienceEntry::Unclassified {
            role: "Unknown".to_string(),
            details: details.to_string(),
        }
    }

    fn resume(skills: &[&str], experience: Vec<ExperienceEntry>, projects: Vec<Project>) -> Resume {
        Resume {
            skills: skills.iter().map(|s| s.to_string()).collect(),
            experience,
            projects,
            ..Default::default()
        }
    }

    fn project(title: &str, description: &str) -> Project {
        Project {
            title: title.to_string(),
            duration: None,
            description: description.to_string(),
        }
    }

    #[tokio::test]
    async fn test_buzzword_heavy_resume_raises_ai_flag() {
        let vocab = Vocabulary {
            buzzwords: ["leverage", "synergy", "holistic", "paradigm", "disruptive"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            ..Default::default()
        };
        let checker = AuthenticityChecker::new(
            Arc::new(RuleBasedModel::new()),
            Arc::new(HeuristicDetector::new(&vocab.buzzwords)),
            &vocab,
        );
        let resume = resume(
            &[],
            vec![],
            vec![project(
                "Platform",
                "We leverage synergy across teams. Our holistic approach drives results.",
            )],
        );

        let report = checker.check(&resume).await;

        assert!(report.is_suspected_ai);
        assert_eq!(report.triggered_buzzwords, vec!["leverage", "synergy", "holistic"]);
        assert_eq!(report.authenticity_flags.len(), 1);
        assert!(report.authenticity_flags[0].starts_with("Suspected AI-generated content"));
        assert_eq!(report.authenticity_score, 80);
    }

    #[tokio::test]
    async fn test_each_flag_costs_twenty_points() {
        let clean = resume(&["python"], vec![dated("Python Developer")], vec![]);
        let report = checker_with(Arc::new(FixedDetector(false))).check(&clean).await;
        assert!(report.authenticity_flags.is_empty());
        assert_eq!(report.authenticity_score, 100);

        let report = checker_with(Arc::new(FixedDetector(true))).check(&clean).await;
        assert_eq!(report.authenticity_score, 80);

        let unsupported = resume(&["python", "kafka"], vec![dated("Python Developer")], vec![]);
        let report = checker_with(Arc::new(FixedDetector(true))).check(&unsupported).await;
        assert_eq!(report.unsupported_skills, vec!["kafka".to_string()]);
        assert_eq!(report.authenticity_score, 60);

        let everything = resume(
            &["python", "kafka"],
            vec![dated("Python Developer"), unclassified("Freelance work"), unclassified("Odd jobs")],
            vec![],
        );
        let report = checker_with(Arc::new(FixedDetector(true))).check(&everything).await;
        assert_eq!(report.invalid_companies, vec!["Freelance work", "Odd jobs"]);
        assert_eq!(report.authenticity_flags.len(), 3);
        assert_eq!(report.authenticity_score, 40);
    }

    #[tokio::test]
    async fn test_blank_corpus_skips_detection() {
        let checker = checker_with(Arc::new(FixedDetector(true)));
        let report = checker.check(&Resume::default()).await;
        assert_eq!(report.ai_score, 0.0);
        assert!(!report.is_suspected_ai);
        assert_eq!(report.authenticity_score, 100);
    }

    #[test]
    fn test_stop_word_skills_never_unsupported() {
        let checker = checker_with(Arc::new(FixedDetector(false)));

        let plain = resume(&["c", "go", "rust"], vec![], vec![]);
        assert_eq!(
            checker.cross_reference_skills(&plain, ""),
            vec!["c".to_string(), "go".to_string(), "rust".to_string()]
        );

        let with_stop_word = resume(&["will", "rust"], vec![], vec![]);
        assert_eq!(
            checker.cross_reference_skills(&with_stop_word, ""),
            vec!["rust".to_string()]
        );
    }

    #[test]
    fn test_skill_evidence_is_case_insensitive_substring() {
        let checker = checker_with(Arc::new(FixedDetector(false)));
        let claimed = resume(
            &["machine learning", "docker"],
            vec![],
            vec![project("Recommender", "Applied Machine Learning to ranking")],
        );
        let corpus = evidence_corpus(&claimed);
        assert_eq!(
            checker.cross_reference_skills(&claimed, &corpus),
            vec!["docker".to_string()]
        );
    }

    #[test]
    fn test_company_verification_rules() {
        let checker = checker_with(Arc::new(FixedDetector(false)));
        assert!(checker.verify_company("Software Engineer at Google"));
        assert!(checker.verify_company("Initech Solutions"));
        assert!(checker.verify_company("acme corp."));
        assert!(checker.verify_company("Globex Corp."));
        assert!(!checker.verify_company("Freelance work"));
        assert!(!checker.verify_company(""));
    }

    #[test]
    fn test_entity_capability_validates_company() {
        let model = StubModel::new(2).with_entity("Hooli", EntityLabel::Org);
        let checker = AuthenticityChecker::new(
            Arc::new(model),
            Arc::new(FixedDetector(false)),
            &Vocabulary::default(),
        );
        assert!(checker.verify_company("Hooli"));
        assert!(!checker.verify_company("Pied Piper"));
    }

    #[test]
    fn test_company_verdicts_are_cached() {
        let checker = checker_with(Arc::new(FixedDetector(false)));
        assert_eq!(checker.company_verdicts.entry_count(), 0);

        checker.verify_company("Freelance work");
        checker.verify_company("Freelance work");
        checker.verify_company("Initech Solutions");
        checker.company_verdicts.run_pending_tasks();

        assert_eq!(checker.company_verdicts.entry_count(), 2);
        assert_eq!(checker.company_verdicts.get("Freelance work"), Some(false));
        assert_eq!(checker.company_verdicts.get("Initech Solutions"), Some(true));
    }

    #[test]
    fn test_concurrent_checks_verify_each_company_once() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        /// Counts entity lookups, one per uncached verification.
        struct CountingModel {
            inner: RuleBasedModel,
            entity_calls: AtomicUsize,
        }

        impl LanguageModel for CountingModel {
            fn tokenize(&self, text: &str) -> Vec<String> {
                self.inner.tokenize(text)
            }

            fn embed(&self, phrase: &str) -> Vec<f32> {
                self.inner.embed(phrase)
            }

            fn entities(&self, text: &str) -> Vec<crate::nlp::EntitySpan> {
                self.entity_calls.fetch_add(1, Ordering::SeqCst);
                self.inner.entities(text)
            }
        }

        let model = Arc::new(CountingModel {
            inner: RuleBasedModel::new(),
            entity_calls: AtomicUsize::new(0),
        });
        let checker = Arc::new(AuthenticityChecker::new(
            model.clone(),
            Arc::new(FixedDetector(false)),
            &Vocabulary::default(),
        ));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let checker = checker.clone();
                std::thread::spawn(move || checker.verify_company("Initech Solutions"))
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap());
        }

        assert_eq!(model.entity_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_claimed_company_is_first_details_line() {
        assert_eq!(claimed_company("Initech LLC\nBuilt TPS reports"), Some("Initech LLC"));
        assert_eq!(claimed_company("   "), None);
        assert_eq!(claimed_company(""), None);
    }

    #[test]
    fn test_evidence_corpus_shape() {
        let resume = resume(
            &[],
            vec![dated("Engineer"), unclassified("Freelance work")],
            vec![project("Chatbot", "Built a bot")],
        );
        assert_eq!(
            evidence_corpus(&resume),
            " Engineer Freelance work Unknown Built a bot Chatbot"
        );
    }

    #[test]
    fn test_report_json_field_names() {
        let report = AuthenticityReport {
            ai_score: 0.2,
            is_suspected_ai: false,
            triggered_buzzwords: vec![],
            unsupported_skills: vec![],
            invalid_companies: vec![],
            authenticity_flags: vec![],
            authenticity_score: 100,
        };
        let value = serde_json::to_value(&report).unwrap();
        assert!(value.get("isSuspectedAI").is_some());
        assert!(value.get("authenticityScore").is_some());
        assert!(value.get("triggeredBuzzwords").is_some());
    }
}
