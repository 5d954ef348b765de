use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{config::FeedConfig, domain::NewsMessage, feed::weighted::WeightedPriority};

/// Produces random news: a few words from a fixed vocabulary and a weighted priority.
pub struct NewsGenerator<R = StdRng> {
    words: Vec<String>,
    min_words: usize,
    max_words: usize,
    priorities: WeightedPriority,
    rng: R,
}

impl NewsGenerator<StdRng> {
    /// Seeded from `FEED_SEED` when set, otherwise from OS entropy.
    pub fn from_config(config: &FeedConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::new(
            config.headline_words.clone(),
            config.min_words,
            config.max_words,
            WeightedPriority::new(&config.priority_weights),
            rng,
        )
    }
}

impl<R: Rng> NewsGenerator<R> {
    pub fn new(
        words: Vec<String>,
        min_words: usize,
        max_words: usize,
        priorities: WeightedPriority,
        rng: R,
    ) -> Self {
        Self {
            words,
            min_words,
            max_words: max_words.max(min_words),
            priorities,
            rng,
        }
    }

    pub fn generate(&mut self) -> NewsMessage {
        let priority = self.priorities.sample(&mut self.rng);
        NewsMessage::new(self.headline(), priority)
    }

    fn headline(&mut self) -> String {
        if self.words.is_empty() {
            return String::new();
        }
        let count = self.rng.random_range(self.min_words..=self.max_words);
        let mut picked = Vec::with_capacity(count);
        for _ in 0..count {
            let index = self.rng.random_range(0..self.words.len());
            picked.push(self.words[index].as_str());
        }
        picked.join(" ")
    }
}
