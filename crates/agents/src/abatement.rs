//! Abatement Curve
//!
//! Marginal cost of permanently cutting a company's daily emission rate by
//! one unit. Each step can be bought once, in order, and later steps never
//! cost less than earlier ones.

use ets_core::{Day, Price};
use ets_ports::RandomSource;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

/// Gamma shape of the first step's cost
const START_COST_SHAPE: f64 = 2.0;
/// Gamma scale of the first step's cost
const START_COST_SCALE: f64 = 700.0;
/// Decimal places kept on sampled costs
const COST_DECIMALS: u32 = 6;
/// Most steps a single curve can offer, whatever the emission rate
pub const MAX_ABATEMENT_STEPS: usize = 1_000;

/// Non-decreasing sequence of one-off abatement step costs
#[derive(Debug, Clone, PartialEq)]
pub struct AbatementCurve {
    costs: Vec<Price>,
}

impl AbatementCurve {
    /// Sample a curve for a company emitting `emission_rate` per day
    ///
    /// The first cost is Gamma(2, 700). The curve has
    /// `max(floor(3 * emission_rate), 1)` steps, at most
    /// [`MAX_ABATEMENT_STEPS`]; step `k` adds a Gaussian
    /// increment with standard deviation `k * factor`, clipped at zero,
    /// where `factor ~ U(0.5, 1.5)` is drawn once per company.
    pub fn sample(emission_rate: f64, rng: &mut dyn RandomSource) -> Self {
        let mut cost = rng.gamma(START_COST_SHAPE, START_COST_SCALE);
        let factor = rng.uniform(0.5, 1.5);
        let steps = ((emission_rate * 3.0).floor() as usize).clamp(1, MAX_ABATEMENT_STEPS);

        let mut costs = Vec::with_capacity(steps);
        for step in 0..steps {
            cost += rng.normal(0.0, step as f64 * factor).max(0.0);
            costs.push(to_price(cost));
        }

        Self { costs }
    }

    /// Build a curve from explicit costs, sorted into non-decreasing order
    pub fn from_costs(mut costs: Vec<Price>) -> Self {
        costs.sort();
        Self { costs }
    }

    /// Cost of the next step, if any remain
    pub fn next_cost(&self) -> Option<Price> {
        self.costs.first().copied()
    }

    /// Next step's cost amortised over the days left in the year
    ///
    /// On `day` the divisor is `366 - day`, floored at one for runs that
    /// outlast a single year.
    pub fn cost_per_ton(&self, day: Day) -> Option<Price> {
        let remaining = 366_i64.saturating_sub(i64::from(day)).max(1);
        self.next_cost()
            .map(|cost| cost / Decimal::from(remaining))
    }

    /// Buy the next step; it is gone for good
    pub fn consume(&mut self) -> Option<Price> {
        if self.costs.is_empty() {
            None
        } else {
            Some(self.costs.remove(0))
        }
    }

    pub fn costs(&self) -> &[Price] {
        &self.costs
    }

    pub fn len(&self) -> usize {
        self.costs.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.costs.is_empty()
    }

    /// True when every step costs at least as much as the one before
    pub fn is_monotone(&self) -> bool {
        self.costs.windows(2).all(|pair| pair[0] <= pair[1])
    }
}

fn to_price(value: f64) -> Price {
    Decimal::from_f64(value)
        .unwrap_or(Decimal::ZERO)
        .round_dp(COST_DECIMALS)
}
