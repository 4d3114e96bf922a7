//! Trading Policy
//!
//! How much of a projected shortage or surplus a company puts on the
//! market on a given day.

use ets_core::{DAYS_PER_YEAR, Day, Price, Quantity};
use ets_ports::RandomSource;

/// Share of expected annual emission held back from sale
const RISK_BUFFER_SHARE: f64 = 0.01;

/// Days before year end over which the held-back buffer is released
const RELEASE_WINDOW_DAYS: f64 = 14.0;

/// Daily decision of a company
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarketPosition {
    /// Nothing to do today
    Idle,
    /// Buy the next abatement step instead of allowances
    Abate,
    Buy { quantity: Quantity, price: Price },
    Sell { quantity: Quantity, price: Price },
}

/// Order sizing strategy, fixed at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TradingPolicy {
    /// Put the whole shortage or surplus on the market at once
    #[default]
    Simple,
    /// Size orders as a random share of the position, approaching the full
    /// position as the year end nears, and hold back a risk buffer when
    /// selling
    Advanced,
}

impl TradingPolicy {
    pub fn from_flag(advanced: bool) -> Self {
        if advanced {
            TradingPolicy::Advanced
        } else {
            TradingPolicy::Simple
        }
    }

    /// Units to bid for, given a positive `deficit`
    pub fn buy_quantity(&self, deficit: Quantity, day: Day, rng: &mut dyn RandomSource) -> Quantity {
        match self {
            TradingPolicy::Simple => deficit,
            TradingPolicy::Advanced => fractional(deficit, day, rng),
        }
    }

    /// Units to offer, given a positive `surplus`
    ///
    /// Returns zero when the advanced policy holds back everything.
    pub fn sell_quantity(
        &self,
        surplus: Quantity,
        expected_emission: f64,
        day: Day,
        rng: &mut dyn RandomSource,
    ) -> Quantity {
        match self {
            TradingPolicy::Simple => surplus,
            TradingPolicy::Advanced => {
                let buffer = risk_buffer(expected_emission, day);
                let available = surplus.saturating_sub(buffer);
                if available == 0 {
                    return 0;
                }
                fractional(available, day, rng)
            }
        }
    }
}

/// Share of the year already elapsed, in `[0, 1]`
fn year_progress(day: Day) -> f64 {
    (f64::from(day) / f64::from(DAYS_PER_YEAR)).clamp(0.0, 1.0)
}

/// Random share of `total`, drawn from `U(progress, 1)`, at least one unit
fn fractional(total: Quantity, day: Day, rng: &mut dyn RandomSource) -> Quantity {
    if total == 0 {
        return 0;
    }
    let fraction = rng.uniform(year_progress(day), 1.0).clamp(0.0, 1.0);
    let quantity = (total as f64 * fraction).ceil() as Quantity;
    quantity.clamp(1, total)
}

/// Units held back from sale: 1% of expected emission, shrinking linearly
/// to zero over the last two weeks of the year
fn risk_buffer(expected_emission: f64, day: Day) -> Quantity {
    let days_left = f64::from(DAYS_PER_YEAR.saturating_sub(day));
    let release = (days_left / RELEASE_WINDOW_DAYS).min(1.0);
    (RISK_BUFFER_SHARE * expected_emission.max(0.0) * release).ceil() as Quantity
}
