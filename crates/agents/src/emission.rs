//! Emission Model
//!
//! Stochastic daily emission path of one company.

use ets_core::DAYS_PER_YEAR;
use ets_ports::RandomSource;
use std::collections::VecDeque;

/// Capacity of the trailing emission buffer (one year of daily rates)
pub const TRAILING_WINDOW: usize = 365;

/// Number of most recent days in the short-horizon mean
const RECENT_WINDOW: usize = 10;

/// Tolerance subtracted before rounding a projection up
const CEIL_EPSILON: f64 = 1e-9;

/// Fixed-capacity ring buffer of the most recent daily emission rates
#[derive(Debug, Clone)]
pub struct TrailingEmissions {
    rates: VecDeque<f64>,
    capacity: usize,
}

impl TrailingEmissions {
    pub fn new(capacity: usize) -> Self {
        Self {
            rates: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    /// Append a rate, dropping the oldest beyond capacity
    pub fn push(&mut self, rate: f64) {
        if self.rates.len() == self.capacity {
            self.rates.pop_front();
        }
        self.rates.push_back(rate);
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Mean over the whole buffer, `None` when empty
    pub fn mean(&self) -> Option<f64> {
        if self.rates.is_empty() {
            return None;
        }
        Some(self.rates.iter().sum::<f64>() / self.rates.len() as f64)
    }

    /// Mean over the last `n` entries (or fewer if the buffer is shorter)
    pub fn recent_mean(&self, n: usize) -> Option<f64> {
        let take = n.min(self.rates.len());
        if take == 0 {
            return None;
        }
        let sum: f64 = self.rates.iter().rev().take(take).sum();
        Some(sum / take as f64)
    }

    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.rates.iter()
    }
}

/// Daily emission path
///
/// The rate follows a driftless random walk with Gaussian increments,
/// floored at zero.
#[derive(Debug, Clone)]
pub struct EmissionModel {
    rate: f64,
    total: f64,
    trailing: TrailingEmissions,
}

impl EmissionModel {
    /// Start from a daily rate; negative rates are clamped to zero
    pub fn new(initial_rate: f64) -> Self {
        Self {
            rate: initial_rate.max(0.0),
            total: 0.0,
            trailing: TrailingEmissions::new(TRAILING_WINDOW),
        }
    }

    /// Initial rate for a company expecting `expected_emission` per year
    pub fn sample_initial_rate(
        expected_emission: f64,
        noise: f64,
        rng: &mut dyn RandomSource,
    ) -> f64 {
        let rate = expected_emission / f64::from(DAYS_PER_YEAR) + rng.normal(0.0, noise);
        rate.max(0.0)
    }

    /// Emit one day: perturb the rate, record it and accumulate it
    pub fn step(&mut self, rate_noise: f64, rng: &mut dyn RandomSource) -> f64 {
        self.rate = (self.rate + rng.normal(0.0, rate_noise)).max(0.0);
        self.trailing.push(self.rate);
        self.total += self.rate;
        self.rate
    }

    /// Permanently cut the rate by `units`, never below zero
    pub fn reduce_rate(&mut self, units: f64) {
        self.rate = (self.rate - units).max(0.0);
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn trailing(&self) -> &TrailingEmissions {
        &self.trailing
    }

    /// Smoothed annual projection, rounded up
    ///
    /// Equal-weight average of the trailing-year mean, the mean of the last
    /// ten days and today's rate, annualised. Before the first emission the
    /// current rate stands in for both means.
    pub fn projected_annual_emission(&self) -> f64 {
        let long = self.trailing.mean().unwrap_or(self.rate);
        let recent = self.trailing.recent_mean(RECENT_WINDOW).unwrap_or(self.rate);
        let smoothed = (long + recent + self.rate) / 3.0;
        (smoothed * f64::from(DAYS_PER_YEAR) - CEIL_EPSILON).ceil().max(0.0)
    }
}
