//! Field Extractor — ordered pattern and keyword rules over a token sequence.
//!
//! Every rule is best-effort and total: missing content yields `None` or an
//! empty list, never an error. Rules that need phrase context (name, projects,
//! certifications) scan the space-joined token text; the rest walk tokens.

use std::collections::HashSet;

use regex::Regex;
use tracing::debug;

use crate::parsing::models::{Project, RawExperience, RawFieldSet, TokenSequence};
use crate::vocabulary::Vocabulary;

/// Tried in order; the first pattern that matches names the candidate.
const NAME_PATTERNS: &[&str] = &[
    r"(?i)Extracted\s*Text\s*:\s*(\w+\s+\w+)",
    r"(?i)^(\w+\s\w+)\s*(?:Email|Mobile|Phone)",
    r"(?i)(\w+\s\w+)\s*(?:B\.\s?Tech|Bachelors|M\.Tech|Masters|Degree)",
];

const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}";
const PHONE_PATTERN: &str = r"^(?:\+?\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}\b";

const BULLET_PATTERN: &str = r"\s*•\s*";
const ENTRY_TITLE_PATTERN: &str = r"^(.*?)\s*\(";
const ENTRY_DATES_PATTERN: &str = r"\((.*?)\)";

const PROJECT_SECTION_PATTERN: &str = r"(?is)(?:Personal Projects|Projects|Work Experience)\s*(.*?)(?:\n\n|Skills|Certifications|Education|$)";
const PROJECT_ENTRY_PATTERN: &str = r"(?s)^\s*([^\n:•()]+?)\s*(?:\(([^)]+)\))?\s*:\s*(.*?)\s*$";

const CERTIFICATION_PATTERN: &str = r"(?is)(?:Certifications|Certified|Successfully completed|Attained)(.*?)(?:\n\n|Projects|Experience|Skills|Education|$)";

const EDUCATION_WINDOW: usize = 5;
const UNKNOWN_TITLE: &str = "Unknown Title";
const UNKNOWN_DATES: &str = "Unknown Dates";

pub struct FieldExtractor {
    name_patterns: Vec<Regex>,
    email: Regex,
    phone: Regex,
    bullet: Regex,
    entry_title: Regex,
    entry_dates: Regex,
    project_section: Regex,
    project_entry: Regex,
    certification: Regex,
    skills: HashSet<String>,
    skill_phrases: Vec<Vec<String>>,
    education_keywords: Vec<String>,
    experience_headers: HashSet<String>,
    section_headers: HashSet<String>,
}

impl FieldExtractor {
    pub fn new(vocabulary: &Vocabulary) -> Self {
        let fold = |items: &[String]| -> HashSet<String> {
            items.iter().map(|s| s.to_lowercase()).collect()
        };

        Self {
            name_patterns: NAME_PATTERNS.iter().map(|p| compile(p)).collect(),
            email: compile(EMAIL_PATTERN),
            phone: compile(PHONE_PATTERN),
            bullet: compile(BULLET_PATTERN),
            entry_title: compile(ENTRY_TITLE_PATTERN),
            entry_dates: compile(ENTRY_DATES_PATTERN),
            project_section: compile(PROJECT_SECTION_PATTERN),
            project_entry: compile(PROJECT_ENTRY_PATTERN),
            certification: compile(CERTIFICATION_PATTERN),
            skills: vocabulary.skill_set(),
            skill_phrases: vocabulary.skill_phrases(),
            education_keywords: vocabulary.education_keywords.clone(),
            experience_headers: fold(&vocabulary.experience_headers),
            section_headers: fold(&vocabulary.section_headers),
        }
    }

    /// Runs every field rule over the sequence.
    pub fn extract(&self, tokens: &TokenSequence) -> RawFieldSet {
        let text = tokens.joined();
        let tokens = tokens.as_slice();

        let raw = RawFieldSet {
            name: self.extract_name(&text),
            email: self.extract_email(tokens),
            phone: self.extract_phone(tokens),
            links: extract_links(tokens),
            education: self.extract_education(tokens),
            skills: self.extract_skills(tokens),
            experience: self.extract_experience(tokens),
            projects: self.extract_projects(&text),
            certifications: self.extract_certifications(&text),
        };

        debug!(
            tokens = tokens.len(),
            education = raw.education.len(),
            skills = raw.skills.len(),
            experience = raw.experience.len(),
            projects = raw.projects.len(),
            certifications = raw.certifications.len(),
            "Extracted raw resume fields"
        );

        raw
    }

    pub fn extract_name(&self, text: &str) -> Option<String> {
        self.name_patterns
            .iter()
            .find_map(|re| re.captures(text).map(|c| c[1].trim().to_string()))
    }

    pub fn extract_email(&self, tokens: &[String]) -> Option<String> {
        tokens.iter().find(|t| self.email.is_match(t)).cloned()
    }

    pub fn extract_phone(&self, tokens: &[String]) -> Option<String> {
        tokens.iter().find(|t| self.phone.is_match(t)).cloned()
    }

    /// One window (keyword + next 4 tokens) per degree keyword hit. Overlapping
    /// windows are kept; the normalizer classifies each one.
    pub fn extract_education(&self, tokens: &[String]) -> Vec<String> {
        tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| self.education_keywords.iter().any(|k| k == *t))
            .map(|(i, _)| tokens[i..(i + EDUCATION_WINDOW).min(tokens.len())].join(" "))
            .collect()
    }

    /// Vocabulary tokens plus multi-word vocabulary phrases, in source order.
    /// Duplicates are expected here.
    pub fn extract_skills(&self, tokens: &[String]) -> Vec<String> {
        let folded: Vec<String> = tokens.iter().map(|t| t.to_lowercase()).collect();
        let mut skills = Vec::new();

        for (i, token) in folded.iter().enumerate() {
            if self.skills.contains(token) {
                skills.push(tokens[i].clone());
            }
            for phrase in &self.skill_phrases {
                let end = i + phrase.len();
                if end <= folded.len() && folded[i..end] == phrase[..] {
                    skills.push(tokens[i..end].join(" "));
                }
            }
        }

        skills
    }

    /// Header-anchored experience scan.
    ///
    /// 1. Collect sections opened by an experience header and closed by any
    ///    other known header (or the end of the sequence)
    /// 2. Join sections with newlines and split on the bullet marker
    /// 3. Parse each entry's first line as `Title (Dates): description`
    pub fn extract_experience(&self, tokens: &[String]) -> Vec<RawExperience> {
        let sections = self.experience_sections(tokens);
        if sections.is_empty() {
            return vec![];
        }

        let section_text = sections.join("\n");
        self.bullet
            .split(&section_text)
            .filter_map(|entry| self.parse_experience_entry(entry))
            .collect()
    }

    fn experience_sections(&self, tokens: &[String]) -> Vec<String> {
        let mut sections = Vec::new();
        let mut i = 0;

        while i < tokens.len() {
            let header = tokens[i].to_lowercase();
            if !self.experience_headers.contains(&header) {
                i += 1;
                continue;
            }

            let mut section = vec![tokens[i].as_str()];
            i += 1;
            while i < tokens.len() {
                let next = tokens[i].to_lowercase();
                if self.section_headers.contains(&next) && next != header {
                    break;
                }
                section.push(&tokens[i]);
                i += 1;
            }
            sections.push(section.join(" "));
        }

        sections
    }

    fn parse_experience_entry(&self, entry: &str) -> Option<RawExperience> {
        let entry = entry.trim();
        if entry.is_empty() {
            return None;
        }

        let mut lines = entry.split('\n');
        let first_line = lines.next().unwrap_or_default();
        let remaining: Vec<&str> = lines.collect();

        let title = self
            .entry_title
            .captures(first_line)
            .map(|c| c[1].trim().to_string())
            .unwrap_or_else(|| UNKNOWN_TITLE.to_string());
        let dates = self
            .entry_dates
            .captures(first_line)
            .map(|c| c[1].trim().to_string())
            .unwrap_or_else(|| UNKNOWN_DATES.to_string());

        let description_start = first_line.split_once(':').map(|(_, d)| d).unwrap_or("");
        let description = format!("{} {}", description_start.trim(), remaining.join(" "))
            .trim()
            .to_string();

        if title == UNKNOWN_TITLE && dates == UNKNOWN_DATES && description.is_empty() {
            return None;
        }

        Some(RawExperience {
            title,
            dates,
            description,
            text: entry.to_string(),
        })
    }

    /// Bullet entries of shape `title (optional duration): description` inside
    /// the first projects section. Text before the first bullet is ignored.
    pub fn extract_projects(&self, text: &str) -> Vec<Project> {
        let Some(section) = self.project_section.captures(text).and_then(|c| c.get(1)) else {
            return vec![];
        };

        section
            .as_str()
            .trim()
            .split('•')
            .skip(1)
            .filter_map(|chunk| {
                let caps = self.project_entry.captures(chunk)?;
                Some(Project {
                    title: caps[1].trim().to_string(),
                    duration: caps
                        .get(2)
                        .map(|m| m.as_str().trim().to_string())
                        .filter(|d| !d.is_empty()),
                    description: caps[3].split_whitespace().collect::<Vec<_>>().join(" "),
                })
            })
            .collect()
    }

    /// Lines after the first certification trigger, up to the next section.
    /// Input text is whitespace-normalized, so bullets count as line breaks.
    pub fn extract_certifications(&self, text: &str) -> Vec<String> {
        let Some(block) = self.certification.captures(text).and_then(|c| c.get(1)) else {
            return vec![];
        };

        block
            .as_str()
            .trim()
            .split(['\n', '•'])
            .map(|line| line.trim().trim_start_matches(':').trim())
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect()
    }
}

fn extract_links(tokens: &[String]) -> Vec<String> {
    tokens
        .iter()
        .filter(|t| t.starts_with("http"))
        .cloned()
        .collect()
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("extractor patterns are valid regexes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::RuleBasedModel;
    use crate::parsing::tokenizer::tokenize;

    const SAMPLE_RESUME: &str = "Jane Doe
Email: jane.doe@example.com Mobile: +91-9876543210
https://github.com/janedoe https://linkedin.com/in/janedoe
Academic Details
B.Tech in Computer Science, Example Institute of Technology (2018-2022)
Skills
Python, Docker, Machine Learning, SQL, python
Internship
• Software Intern (May 2021 - Jul 2021): Built REST services in Python
• Data Analyst Intern (Jan 2022 - Apr 2022): Automated SQL reports
Projects
• Resume Parser (Mar 2022): Extracted fields with Python and Docker
• Portfolio Site: Static site with React
Certifications
• AWS Cloud Practitioner certification
• Ranked 12th in Smart India Hackathon
• Attended a workshop";

    fn extract(text: &str) -> RawFieldSet {
        let extractor = FieldExtractor::new(&Vocabulary::default());
        extractor.extract(&tokenize(&RuleBasedModel::new(), text))
    }

    #[test]
    fn test_sample_contact_fields() {
        let raw = extract(SAMPLE_RESUME);
        assert_eq!(raw.name.as_deref(), Some("Jane Doe"));
        assert_eq!(raw.email.as_deref(), Some("jane.doe@example.com"));
        assert_eq!(raw.phone.as_deref(), Some("+91-9876543210"));
        assert_eq!(
            raw.links,
            vec![
                "https://github.com/janedoe".to_string(),
                "https://linkedin.com/in/janedoe".to_string()
            ]
        );
    }

    #[test]
    fn test_sample_education_window() {
        let raw = extract(SAMPLE_RESUME);
        assert_eq!(raw.education, vec!["B.Tech in Computer Science ,".to_string()]);
    }

    #[test]
    fn test_sample_skills_keep_duplicates_and_phrases() {
        let raw = extract(SAMPLE_RESUME);
        assert!(raw.skills.contains(&"Python".to_string()));
        assert!(raw.skills.contains(&"python".to_string()));
        assert!(raw.skills.contains(&"Machine Learning".to_string()));
        assert!(raw.skills.contains(&"React".to_string()));
        assert!(raw.skills.iter().filter(|s| s.eq_ignore_ascii_case("python")).count() > 2);
    }

    #[test]
    fn test_dotted_skill_at_sentence_end() {
        let raw = extract("Built REST APIs in Node.js.");
        assert!(raw.skills.contains(&"Node.js".to_string()));
    }

    #[test]
    fn test_sample_experience_entries() {
        let raw = extract(SAMPLE_RESUME);
        assert_eq!(raw.experience.len(), 2);
        assert_eq!(raw.experience[0].title, "Software Intern");
        assert_eq!(raw.experience[0].dates, "May 2021 - Jul 2021");
        assert_eq!(raw.experience[0].description, "Built REST services in Python");
        assert_eq!(raw.experience[1].title, "Data Analyst Intern");
        assert_eq!(raw.experience[1].description, "Automated SQL reports");
    }

    #[test]
    fn test_sample_projects_with_and_without_duration() {
        let raw = extract(SAMPLE_RESUME);
        assert_eq!(
            raw.projects,
            vec![
                Project {
                    title: "Resume Parser".to_string(),
                    duration: Some("Mar 2022".to_string()),
                    description: "Extracted fields with Python and Docker".to_string(),
                },
                Project {
                    title: "Portfolio Site".to_string(),
                    duration: None,
                    description: "Static site with React".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_sample_certification_lines() {
        let raw = extract(SAMPLE_RESUME);
        assert_eq!(
            raw.certifications,
            vec![
                "AWS Cloud Practitioner certification".to_string(),
                "Ranked 12th in Smart India Hackathon".to_string(),
                "Attended a workshop".to_string(),
            ]
        );
    }

    #[test]
    fn test_name_patterns_in_priority_order() {
        let extractor = FieldExtractor::new(&Vocabulary::default());
        assert_eq!(
            extractor.extract_name("Extracted Text : John Smith Email : x").as_deref(),
            Some("John Smith")
        );
        assert_eq!(
            extractor.extract_name("Profile Rahul Sharma B.Tech in ECE").as_deref(),
            Some("Rahul Sharma")
        );
        assert_eq!(extractor.extract_name("no markers here at all"), None);
    }

    #[test]
    fn test_empty_input_is_total() {
        let raw = extract("");
        assert_eq!(raw, RawFieldSet::default());
    }

    #[test]
    fn test_experience_section_stops_at_next_header() {
        let raw = extract(
            "Experience • Engineer (2019-2021): Built pipelines Skills • Not An Entry (2020): ignored",
        );
        assert_eq!(raw.experience.len(), 1);
        assert_eq!(raw.experience[0].title, "Engineer");
        assert_eq!(raw.experience[0].dates, "2019-2021");
    }

    #[test]
    fn test_experience_entry_without_shape_is_discarded() {
        let raw = extract("Experience • Freelance gigs");
        assert!(raw.experience.is_empty());
    }

    #[test]
    fn test_education_window_truncated_at_end() {
        let extractor = FieldExtractor::new(&Vocabulary::default());
        let tokens: Vec<String> = ["Diploma", "in", "Design"].iter().map(|s| s.to_string()).collect();
        assert_eq!(extractor.extract_education(&tokens), vec!["Diploma in Design".to_string()]);
    }

    #[test]
    fn test_phone_requires_full_grouping() {
        let extractor = FieldExtractor::new(&Vocabulary::default());
        let tokens: Vec<String> = ["2019-2021", "555-123-4567"].iter().map(|s| s.to_string()).collect();
        assert_eq!(extractor.extract_phone(&tokens).as_deref(), Some("555-123-4567"));
    }
}
