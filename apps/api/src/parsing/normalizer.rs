//! Resume Normalizer — canonicalizes a raw field set into a `Resume`.

use std::collections::BTreeSet;

use regex::Regex;
use tracing::debug;

use crate::parsing::models::{
    EducationEntry, ExperienceEntry, RawExperience, RawFieldSet, Resume, UNKNOWN,
};
use crate::vocabulary::Vocabulary;

const EXPERIENCE_PATTERN: &str = r"(.*?)\((.*?)\)";

const CERTIFICATION_MARKERS: &[&str] = &["certification", "completed"];
const ACHIEVEMENT_MARKERS: &[&str] = &["rank", "finalist"];

pub struct ResumeNormalizer {
    degrees: Vec<String>,
    experience: Regex,
}

impl ResumeNormalizer {
    pub fn new(vocabulary: &Vocabulary) -> Self {
        Self {
            degrees: vocabulary.degrees.clone(),
            experience: Regex::new(EXPERIENCE_PATTERN).expect("experience pattern is valid"),
        }
    }

    pub fn normalize(&self, raw: RawFieldSet) -> Resume {
        let (certifications, achievements) = split_certifications(&raw.certifications);

        let resume = Resume {
            name: raw.name,
            email: raw.email,
            phone: raw.phone,
            links: raw.links,
            education: raw.education.iter().map(|e| self.classify_education(e)).collect(),
            skills: fold_skills(&raw.skills),
            experience: raw
                .experience
                .iter()
                .map(|e| self.normalize_experience(source_text(e)))
                .collect(),
            projects: raw.projects,
            certifications,
            achievements,
        };

        debug!(
            skills = resume.skills.len(),
            education = resume.education.len(),
            experience = resume.experience.len(),
            certifications = resume.certifications.len(),
            achievements = resume.achievements.len(),
            "Normalized resume"
        );

        resume
    }

    /// Re-applies skill folding to an already canonical resume. A no-op on
    /// anything `normalize` produced.
    pub fn renormalize(&self, mut resume: Resume) -> Resume {
        resume.skills = fold_skills(&resume.skills);
        resume
    }

    /// First known degree contained in the window; `Unknown` otherwise.
    pub fn classify_education(&self, entry: &str) -> EducationEntry {
        let degree = self
            .degrees
            .iter()
            .find(|d| entry.contains(d.as_str()))
            .cloned()
            .unwrap_or_else(|| UNKNOWN.to_string());

        EducationEntry {
            degree,
            details: entry.to_string(),
        }
    }

    pub fn normalize_experience(&self, text: &str) -> ExperienceEntry {
        match self.experience.captures(text) {
            Some(caps) => ExperienceEntry::Dated {
                role: caps[1].trim().to_string(),
                duration: caps[2].trim().to_string(),
            },
            None => ExperienceEntry::Unclassified {
                role: UNKNOWN.to_string(),
                details: text.to_string(),
            },
        }
    }
}

fn source_text(entry: &RawExperience) -> &str {
    if entry.text.is_empty() {
        &entry.title
    } else {
        &entry.text
    }
}

pub fn fold_skills<I, S>(skills: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    skills
        .into_iter()
        .map(|s| s.as_ref().trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Certification markers win over achievement markers; lines with neither are dropped.
fn split_certifications(lines: &[String]) -> (Vec<String>, Vec<String>) {
    let mut certifications = Vec::new();
    let mut achievements = Vec::new();

    for line in lines {
        let folded = line.to_lowercase();
        if CERTIFICATION_MARKERS.iter().any(|m| folded.contains(m)) {
            certifications.push(line.clone());
        } else if ACHIEVEMENT_MARKERS.iter().any(|m| folded.contains(m)) {
            achievements.push(line.clone());
        }
    }

    (certifications, achievements)
}
