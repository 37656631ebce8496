use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Token sequence
// ────────────────────────────────────────────────────────────────────────────

/// Ordered tokens of a normalized resume. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenSequence(Vec<String>);

impl TokenSequence {
    pub fn new(tokens: Vec<String>) -> Self {
        Self(tokens)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Tokens joined by single spaces. The regex-based extractors scan this text.
    pub fn joined(&self) -> String {
        self.0.join(" ")
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Raw extraction output
// ────────────────────────────────────────────────────────────────────────────

/// An experience entry as cut out of an experience section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawExperience {
    pub title: String,
    pub dates: String,
    pub description: String,
    /// The bullet-delimited entry text the fields were parsed from.
    pub text: String,
}

/// Loosely-typed extractor output. Consumed once by the normalizer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawFieldSet {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub links: Vec<String>,
    pub education: Vec<String>,
    pub skills: Vec<String>,
    pub experience: Vec<RawExperience>,
    pub projects: Vec<Project>,
    pub certifications: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Canonical resume
// ────────────────────────────────────────────────────────────────────────────

/// Degree label for education entries that match no known degree.
pub const UNKNOWN: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    pub details: String,
}

/// `{role, duration}` when the entry carries a parenthesized duration,
/// `{role: "Unknown", details}` otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExperienceEntry {
    Dated { role: String, duration: String },
    Unclassified { role: String, details: String },
}

impl ExperienceEntry {
    pub fn role(&self) -> &str {
        match self {
            ExperienceEntry::Dated { role, .. } | ExperienceEntry::Unclassified { role, .. } => {
                role
            }
        }
    }

    pub fn details(&self) -> &str {
        match self {
            ExperienceEntry::Dated { .. } => "",
            ExperienceEntry::Unclassified { details, .. } => details,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    #[serde(default)]
    pub duration: Option<String>,
    pub description: String,
}

/// The canonical candidate record exchanged by every downstream component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(default)]
    pub links: Vec<String>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    /// Case-folded and deduplicated; serialized in sorted order.
    #[serde(default)]
    pub skills: BTreeSet<String>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default)]
    pub achievements: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_experience_entry_serde_shapes() {
        let dated = ExperienceEntry::Dated {
            role: "Engineer".to_string(),
            duration: "2019-2021".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&dated).unwrap(),
            serde_json::json!({"role": "Engineer", "duration": "2019-2021"})
        );

        let parsed: ExperienceEntry =
            serde_json::from_str(r#"{"role": "Unknown", "details": "Freelance work"}"#).unwrap();
        assert_eq!(parsed.role(), UNKNOWN);
        assert_eq!(parsed.details(), "Freelance work");
    }

    #[test]
    fn test_resume_deserializes_with_missing_lists() {
        let resume: Resume =
            serde_json::from_str(r#"{"name": "Jane Doe", "email": null, "phone": null}"#).unwrap();
        assert_eq!(resume.name.as_deref(), Some("Jane Doe"));
        assert!(resume.skills.is_empty());
        assert!(resume.experience.is_empty());
    }

    #[test]
    fn test_project_duration_serializes_as_null() {
        let project = Project {
            title: "Chatbot".to_string(),
            duration: None,
            description: "Built a bot".to_string(),
        };
        let value = serde_json::to_value(&project).unwrap();
        assert!(value["duration"].is_null());
    }

    #[test]
    fn test_token_sequence_joined() {
        let tokens = TokenSequence::new(vec!["Jane".into(), "Doe".into()]);
        assert_eq!(tokens.joined(), "Jane Doe");
        assert_eq!(tokens.len(), 2);
    }
}
