use rand::Rng;

/// Draws priorities `0..weights.len()` with probability proportional to their weight.
#[derive(Debug, Clone)]
pub struct WeightedPriority {
    cumulative: Vec<f64>,
    total: f64,
}

impl WeightedPriority {
    pub fn new(weights: &[f64]) -> Self {
        let mut total = 0.0;
        let cumulative = weights
            .iter()
            .map(|weight| {
                total += weight.max(0.0);
                total
            })
            .collect();
        Self { cumulative, total }
    }

    pub fn sample<R: Rng>(&self, rng: &mut R) -> i32 {
        if self.total <= 0.0 {
            return 0;
        }
        let target = rng.random::<f64>() * self.total;
        let index = self
            .cumulative
            .iter()
            .position(|&bound| bound > target)
            .unwrap_or(self.cumulative.len() - 1);
        index as i32
    }
}
