use ets_ports::RandomSource;

/// Deterministic stream for tests
///
/// - `normal` returns the mean (no noise)
/// - `gamma` returns the distribution mean `shape * scale`
/// - `uniform` maps the next unit draw from a repeating script onto
///   `[low, high)`; the default script is `[0.5]` (the midpoint)
/// - `index(upper)` returns `upper - 1`, which makes [`shuffle`] the identity
///
/// [`shuffle`]: ets_ports::shuffle
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    unit_draws: Vec<f64>,
    cursor: usize,
    gamma_value: Option<f64>,
}

impl ScriptedRandom {
    pub fn new() -> Self {
        Self {
            unit_draws: vec![0.5],
            cursor: 0,
            gamma_value: None,
        }
    }

    /// Replay these unit draws (each clamped to `[0, 1]`) for `uniform`
    pub fn with_unit_draws(mut self, draws: Vec<f64>) -> Self {
        if !draws.is_empty() {
            self.unit_draws = draws.into_iter().map(|d| d.clamp(0.0, 1.0)).collect();
            self.cursor = 0;
        }
        self
    }

    /// Return this value from every `gamma` draw
    pub fn with_gamma_value(mut self, value: f64) -> Self {
        self.gamma_value = Some(value);
        self
    }

    fn next_unit(&mut self) -> f64 {
        let draw = self.unit_draws[self.cursor % self.unit_draws.len()];
        self.cursor += 1;
        draw
    }
}

impl Default for ScriptedRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for ScriptedRandom {
    fn normal(&mut self, mean: f64, _std_dev: f64) -> f64 {
        mean
    }

    fn gamma(&mut self, shape: f64, scale: f64) -> f64 {
        self.gamma_value.unwrap_or(shape * scale)
    }

    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        if low >= high {
            return low;
        }
        low + (high - low) * self.next_unit()
    }

    fn index(&mut self, upper: usize) -> usize {
        upper.saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ets_ports::shuffle;

    #[test]
    fn test_shuffle_keeps_order() {
        let mut rng = ScriptedRandom::new();
        let mut items = vec!['a', 'b', 'c', 'd'];
        shuffle(&mut items, &mut rng);
        assert_eq!(items, vec!['a', 'b', 'c', 'd']);
    }

    #[test]
    fn test_uniform_replays_script() {
        let mut rng = ScriptedRandom::new().with_unit_draws(vec![0.0, 1.0, 0.25]);
        assert_relative_eq!(rng.uniform(10.0, 20.0), 10.0);
        assert_relative_eq!(rng.uniform(10.0, 20.0), 20.0);
        assert_relative_eq!(rng.uniform(10.0, 20.0), 12.5);
        assert_relative_eq!(rng.uniform(10.0, 20.0), 10.0);
    }

    #[test]
    fn test_noise_free_distributions() {
        let mut rng = ScriptedRandom::new();
        assert_eq!(rng.normal(4.0, 10.0), 4.0);
        assert_relative_eq!(rng.gamma(2.0, 700.0), 1400.0);

        let mut fixed = ScriptedRandom::new().with_gamma_value(100.0);
        assert_relative_eq!(fixed.gamma(2.0, 700.0), 100.0);
    }
}
