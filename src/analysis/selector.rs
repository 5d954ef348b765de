use std::collections::HashSet;

use crate::domain::NewsMessage;

/// Picks what goes into a digest: first occurrence of each headline, highest
/// priority first (ties keep arrival order), at most `limit` entries.
pub fn select(messages: Vec<NewsMessage>, limit: usize) -> Vec<NewsMessage> {
    let mut seen = HashSet::with_capacity(messages.len());
    let mut selected: Vec<NewsMessage> = messages
        .into_iter()
        .filter(|message| seen.insert(message.headline.clone()))
        .collect();

    // sort_by is stable
    selected.sort_by(|a, b| b.priority.cmp(&a.priority));
    selected.truncate(limit);
    selected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(headline: &str, priority: i32) -> NewsMessage {
        NewsMessage::new(headline, priority)
    }

    #[test]
    fn selects_distinct_sorts_and_limits() {
        let messages = vec![
            msg("headline1", 1),
            msg("headline2", 0),
            msg("headline3", 2),
            msg("headline4", 0),
        ];

        let selected = select(messages, 3);

        assert_eq!(
            selected,
            vec![msg("headline3", 2), msg("headline1", 1), msg("headline2", 0)]
        );
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let selected = select(vec![msg("a", 1), msg("a", 5)], 2);
        assert_eq!(selected, vec![msg("a", 1)]);
    }

    #[test]
    fn ranks_by_priority_descending() {
        let selected = select(vec![msg("x", 1), msg("y", 3), msg("z", 2)], 2);
        assert_eq!(selected, vec![msg("y", 3), msg("z", 2)]);
    }

    #[test]
    fn ties_keep_arrival_order() {
        let selected = select(vec![msg("b", 4), msg("a", 4), msg("c", 4)], 10);
        assert_eq!(selected, vec![msg("b", 4), msg("a", 4), msg("c", 4)]);
    }

    #[test]
    fn zero_limit_selects_nothing() {
        assert!(select(vec![msg("x", 1), msg("y", 2)], 0).is_empty());
        assert!(select(Vec::new(), 3).is_empty());
    }

    #[test]
    fn length_bounded_by_distinct_headlines() {
        let messages = vec![msg("a", 1), msg("b", 2), msg("a", 3), msg("b", 0)];
        assert_eq!(select(messages, 10).len(), 2);
    }

    #[test]
    fn idempotent_on_own_output() {
        let messages = vec![
            msg("a", 2),
            msg("b", 9),
            msg("a", 7),
            msg("c", -1),
            msg("d", 9),
            msg("e", 0),
        ];
        for limit in 0..8 {
            let once = select(messages.clone(), limit);
            let twice = select(once.clone(), limit);
            assert_eq!(once, twice, "limit {limit}");
        }
    }
}
