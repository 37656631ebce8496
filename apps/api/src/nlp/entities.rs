//! Capitalization-run entity recognizer.
//!
//! A run is a sequence of capitalized words, optionally bridged by a lowercase
//! connector ("of", "and", "&", "for", "the") that is followed by another
//! capitalized word. Commas, semicolons and colons end a run.
//!
//! Classification:
//! - ORG if any word is an organization keyword or the run is a lone acronym
//! - PERSON if the run is 2–3 plain capitalized alphabetic words
//! - otherwise not reported

use crate::nlp::{EntityLabel, EntitySpan};

const ORG_KEYWORDS: &[&str] = &[
    "university", "institute", "college", "school", "academy", "labs", "lab", "bank", "group",
    "company", "corporation", "corp", "inc", "llc", "ltd", "limited", "gmbh", "plc", "foundation",
    "agency", "association", "council", "ventures", "partners", "studios", "consulting",
    "services", "technologies", "technology", "solutions", "systems", "software", "networks",
    "analytics", "industries", "enterprises", "holdings", "capital", "media", "health",
    "hospital", "pvt",
];

const CONNECTORS: &[&str] = &["of", "and", "&", "for", "the"];

struct Word<'a> {
    text: &'a str,
    start: usize,
    end: usize,
    ends_run: bool,
}

pub fn recognize(text: &str) -> Vec<EntitySpan> {
    let words = split_words(text);
    let mut spans = Vec::new();
    let mut i = 0;

    while i < words.len() {
        if !is_capitalized(words[i].text) {
            i += 1;
            continue;
        }

        let first = i;
        let mut last = i;
        while !words[last].ends_run && last + 1 < words.len() {
            let next = &words[last + 1];
            if is_capitalized(next.text) {
                last += 1;
            } else if CONNECTORS.contains(&next.text)
                && !next.ends_run
                && last + 2 < words.len()
                && is_capitalized(words[last + 2].text)
            {
                last += 2;
            } else {
                break;
            }
        }

        let run = &words[first..=last];
        if let Some(label) = classify(run) {
            let start = run[0].start;
            let end = run[run.len() - 1].end;
            spans.push(EntitySpan {
                text: text[start..end].to_string(),
                label,
                start,
                end,
            });
        }
        i = last + 1;
    }

    spans
}

fn split_words(text: &str) -> Vec<Word<'_>> {
    let mut words: Vec<Word<'_>> = Vec::new();
    let mut offset = 0;

    for raw in text.split_whitespace() {
        let raw_start = offset + text[offset..].find(raw).unwrap_or(0);
        offset = raw_start + raw.len();

        let ends_run = raw.ends_with([',', ';', ':']);
        let trimmed = raw.trim_matches(|c: char| !c.is_alphanumeric() && c != '&' && c != '.');
        let trimmed = trimmed.trim_end_matches('.');
        if trimmed.is_empty() {
            if let Some(prev) = words.last_mut() {
                prev.ends_run = true;
            }
            continue;
        }

        let lead = raw.find(trimmed).unwrap_or(0);
        let start = raw_start + lead;
        words.push(Word {
            text: trimmed,
            start,
            end: start + trimmed.len(),
            ends_run,
        });
    }

    words
}

fn is_capitalized(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}

fn classify(run: &[Word]) -> Option<EntityLabel> {
    let has_org_keyword = run
        .iter()
        .any(|w| ORG_KEYWORDS.contains(&w.text.to_lowercase().as_str()));
    if has_org_keyword {
        return Some(EntityLabel::Org);
    }

    if run.len() == 1 {
        let w = run[0].text;
        let letters = w.chars().filter(|c| c.is_alphabetic()).count();
        let is_acronym = (2..=6).contains(&letters)
            && w.chars().all(|c| c.is_uppercase() || c.is_ascii_digit() || c == '&');
        return is_acronym.then_some(EntityLabel::Org);
    }

    let plain_names = run.iter().all(|w| {
        let mut chars = w.text.chars();
        chars.next().is_some_and(char::is_uppercase) && chars.all(char::is_lowercase)
    });
    if plain_names && (2..=3).contains(&run.len()) {
        return Some(EntityLabel::Person);
    }

    None
}
