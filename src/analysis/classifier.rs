use crate::domain::{NewsMessage, PositiveWords};

/// Share of positive tokens a headline has to exceed to count as positive.
pub const POSITIVE_RATIO_THRESHOLD: f64 = 0.5;

/// Decodes one wire line. Anything that is not a well-formed message is `None`,
/// which callers treat as a negative verdict.
pub fn parse_message(line: &str) -> Option<NewsMessage> {
    match serde_json::from_str::<NewsMessage>(line) {
        Ok(message) => Some(message),
        Err(err) => {
            tracing::debug!(target: "dispatcher", error = %err, "dropping malformed message");
            None
        }
    }
}

/// A headline is positive when strictly more than half of its space-separated
/// tokens are positive words.
pub fn is_positive(headline: &str, positive_words: &PositiveWords) -> bool {
    let mut tokens: Vec<&str> = headline.split(' ').collect();
    while tokens.last().is_some_and(|token| token.is_empty()) {
        tokens.pop();
    }
    if tokens.is_empty() {
        return false;
    }

    let positive = tokens
        .iter()
        .filter(|token| positive_words.contains(token))
        .count();
    let ratio = positive as f64 / tokens.len() as f64;
    ratio > POSITIVE_RATIO_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words() -> PositiveWords {
        ["up", "good", "high", "success"].into_iter().collect()
    }

    #[test]
    fn majority_of_positive_words_is_positive() {
        assert!(is_positive("up good high bad failure", &words()));
        assert!(is_positive("up good high down", &words()));
    }

    #[test]
    fn all_positive_words_is_positive() {
        assert!(is_positive("up good high success", &words()));
    }

    #[test]
    fn exactly_half_is_negative() {
        assert!(!is_positive("up good bad failure", &words()));
        assert!(!is_positive("up down", &words()));
    }

    #[test]
    fn minority_or_none_is_negative() {
        assert!(!is_positive("up bad failure", &words()));
        assert!(!is_positive("bad failure down fall", &words()));
    }

    #[test]
    fn empty_headline_is_negative() {
        assert!(!is_positive("", &words()));
        assert!(!is_positive("   ", &words()));
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert!(!is_positive("UP Good HIGH", &words()));
    }

    #[test]
    fn trailing_spaces_do_not_count_as_tokens() {
        assert!(is_positive("up down ", &["up", "down"].into_iter().collect()));
        assert!(is_positive("up good down  ", &words()));
    }

    #[test]
    fn doubled_spaces_produce_empty_tokens() {
        // "up", "", "good", "bad" -> 2 of 4
        assert!(!is_positive("up  good bad", &words()));
    }

    #[test]
    fn parses_wire_message() {
        let message = parse_message(r#"{"headline":"up","priority":9}"#).unwrap();
        assert_eq!(message, NewsMessage::new("up", 9));
    }

    #[test]
    fn malformed_lines_parse_to_none() {
        assert!(parse_message("").is_none());
        assert!(parse_message("not json").is_none());
        assert!(parse_message(r#"{"priority":3}"#).is_none());
        assert!(parse_message(r#"{"headline":5,"priority":3}"#).is_none());
        assert!(parse_message(r#"{"headline":"up","priority":3,"extra":1}"#).is_none());
    }
}
