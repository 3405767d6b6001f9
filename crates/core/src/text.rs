//! Shared text-matching helpers for the keyword classifiers and extractors.

pub fn normalize(text: &str) -> String {
    text.trim().to_ascii_lowercase()
}

pub fn tokenize(text: &str) -> Vec<String> {
    text.chars()
        .map(|character| if character.is_ascii_alphanumeric() { character } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .map(|token| token.to_string())
        .collect()
}

/// Keyword match against normalized input. Multi-word phrases match as
/// substrings. Single words match per token: short keywords ("hi", "chat")
/// need an exact token so they cannot fire inside unrelated words, longer
/// ones ("organize", "remind") match as token prefixes to cover inflected
/// forms ("organized", "reminders").
pub fn contains_term(normalized: &str, tokens: &[String], term: &str) -> bool {
    if term.contains(' ') {
        return normalized.contains(term);
    }
    if term.len() >= 5 {
        tokens.iter().any(|token| token.starts_with(term))
    } else {
        tokens.iter().any(|token| token == term)
    }
}

pub fn contains_any(normalized: &str, tokens: &[String], terms: &[&str]) -> bool {
    terms.iter().any(|term| contains_term(normalized, tokens, term))
}

#[cfg(test)]
mod tests {
    use super::{contains_term, normalize, tokenize};

    #[test]
    fn short_terms_match_whole_tokens_only() {
        let normalized = normalize("Tell me about this and that");
        let tokens = tokenize(&normalized);
        assert!(!contains_term(&normalized, &tokens, "hi"));
        assert!(contains_term(&normalized, &tokens, "that"));
    }

    #[test]
    fn long_terms_match_inflected_forms() {
        let normalized = normalize("Can you help me get organized this week?");
        let tokens = tokenize(&normalized);
        assert!(contains_term(&normalized, &tokens, "organize"));
        assert!(!contains_term(&normalized, &tokens, "schedule"));
    }

    #[test]
    fn phrases_match_as_substrings() {
        let normalized = normalize("could you help me out");
        let tokens = tokenize(&normalized);
        assert!(contains_term(&normalized, &tokens, "help me"));
        assert!(!contains_term(&normalized, &tokens, "help us"));
    }

    #[test]
    fn tokenize_strips_punctuation() {
        assert_eq!(tokenize("what's up?!"), vec!["what", "s", "up"]);
    }
}
