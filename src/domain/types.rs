use std::collections::HashSet;

use chrono::{DateTime, Utc};

use super::message::NewsMessage;

/// Case-sensitive vocabulary whose words count towards a positive verdict.
#[derive(Debug, Clone, Default)]
pub struct PositiveWords {
    words: HashSet<String>,
}

impl PositiveWords {
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for PositiveWords {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            words: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Output of one report cycle.
#[derive(Debug, Clone)]
pub struct Digest {
    /// Number of positive messages drained in this cycle, duplicates included.
    pub total_positive_count: usize,
    /// Highest priority first, at most the configured limit.
    pub selected: Vec<NewsMessage>,
    pub generated_at: DateTime<Utc>,
}

impl Digest {
    pub fn new(total_positive_count: usize, selected: Vec<NewsMessage>) -> Self {
        Self {
            total_positive_count,
            selected,
            generated_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    pub received: u64,
    pub accepted: u64,
    pub malformed: u64,
}
