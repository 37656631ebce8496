//! Punctuation-aware word tokenizer.
//!
//! Splits on whitespace, then peels opening punctuation off the front and
//! closing punctuation off the back of each chunk. Interior characters are never
//! split, so emails, URLs, dates like `2019-2021` and dotted abbreviations like
//! `B.Tech` stay whole.

const PREFIX_CHARS: &[char] = &[
    '(', '[', '{', '"', '\'', '“', '‘', '•', '●', '▪', '◦', '·', '*',
];

const SUFFIX_CHARS: &[char] = &[
    ')', ']', '}', '"', '\'', '”', '’', ',', ';', ':', '!', '?', '.', '•',
];

pub fn rule_tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for chunk in text.split_whitespace() {
        split_chunk(chunk, &mut tokens);
    }
    tokens
}

fn split_chunk(chunk: &str, tokens: &mut Vec<String>) {
    let mut rest = chunk;

    while let Some(c) = rest.chars().next() {
        if !PREFIX_CHARS.contains(&c) {
            break;
        }
        tokens.push(c.to_string());
        rest = &rest[c.len_utf8()..];
    }

    let mut suffixes = Vec::new();
    while let Some(c) = rest.chars().next_back() {
        if !SUFFIX_CHARS.contains(&c) || !splits_trailing(rest, c) {
            break;
        }
        suffixes.push(c.to_string());
        rest = &rest[..rest.len() - c.len_utf8()];
    }

    if !rest.is_empty() {
        tokens.push(rest.to_string());
    }
    tokens.extend(suffixes.into_iter().rev());
}

/// A trailing period stays on abbreviations whose last dotted segment is a
/// single character (`Ph.D.`, `e.g.`) and on the chunk `.` itself. Sentence-final
/// periods after dotted words (`Node.js.`) and every other suffix split off.
fn splits_trailing(rest: &str, c: char) -> bool {
    if c != '.' {
        return true;
    }
    let body = &rest[..rest.len() - 1];
    match body.rsplit_once('.') {
        None => !body.is_empty(),
        Some((_, last)) => last.chars().count() > 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_on_whitespace() {
        assert_eq!(rule_tokenize("Rust  and\nGo"), vec!["Rust", "and", "Go"]);
    }

    #[test]
    fn test_peels_parentheses_and_colon() {
        assert_eq!(
            rule_tokenize("Engineer (2019-2021): built"),
            vec!["Engineer", "(", "2019-2021", ")", ":", "built"]
        );
    }

    #[test]
    fn test_keeps_email_and_url_whole() {
        let tokens = rule_tokenize("Email: jane.doe@example.com https://github.com/jane");
        assert_eq!(
            tokens,
            vec!["Email", ":", "jane.doe@example.com", "https://github.com/jane"]
        );
    }

    #[test]
    fn test_trailing_period_split_only_without_inner_period() {
        assert_eq!(rule_tokenize("shipped it."), vec!["shipped", "it", "."]);
        assert_eq!(rule_tokenize("B.Tech"), vec!["B.Tech"]);
        assert_eq!(rule_tokenize("Ph.D."), vec!["Ph.D."]);
    }

    #[test]
    fn test_sentence_final_period_after_dotted_word() {
        assert_eq!(
            rule_tokenize("built APIs in Node.js."),
            vec!["built", "APIs", "in", "Node.js", "."]
        );
        assert_eq!(rule_tokenize("e.g."), vec!["e.g."]);
        assert_eq!(rule_tokenize("B.Tech."), vec!["B.Tech", "."]);
    }

    #[test]
    fn test_bullet_prefix_becomes_token() {
        assert_eq!(rule_tokenize("•Chatbot"), vec!["•", "Chatbot"]);
        assert_eq!(rule_tokenize("•"), vec!["•"]);
    }

    #[test]
    fn test_comma_separated_skills() {
        assert_eq!(
            rule_tokenize("Python, Docker, C++"),
            vec!["Python", ",", "Docker", ",", "C++"]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(rule_tokenize("   ").is_empty());
    }
}
