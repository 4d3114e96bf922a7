//! Company Agent
//!
//! One emitting company with an annual allowance budget. It turns its noisy
//! emission observations into a daily order and adapts its price
//! expectation from how yesterday's order fared.

use ets_core::{AgentId, Day, Price, Quantity, TradingState};
use ets_ports::{RandomSource, Trader};
use log::{debug, trace};
use rust_decimal::Decimal;

use crate::abatement::AbatementCurve;
use crate::config::CompanyConfig;
use crate::emission::EmissionModel;
use crate::policy::{MarketPosition, TradingPolicy};

/// Adaptive company agent
#[derive(Debug, Clone)]
pub struct CompanyAgent {
    id: AgentId,
    config: CompanyConfig,
    policy: TradingPolicy,

    day: Day,
    emissions: EmissionModel,
    abatement: AbatementCurve,
    abatement_cost_per_ton: Option<Price>,
    abatements: u32,
    abatement_spend: Price,

    expected_emission: f64,
    allowance: f64,
    expected_deficit: i64,

    expected_market_price: Price,
    trade_price: Price,
    state: TradingState,
    count: Quantity,

    sale_counter: i64,
    buy_counter: i64,
}

impl CompanyAgent {
    /// Create a company, drawing its initial rate and abatement curve
    ///
    /// Draw order: emission-rate noise, then the abatement curve.
    pub fn new(id: usize, config: CompanyConfig, rng: &mut dyn RandomSource) -> Self {
        let rate = EmissionModel::sample_initial_rate(
            config.expected_emission,
            config.expected_emission_noise,
            rng,
        );
        let abatement = AbatementCurve::sample(rate, rng);
        Self::from_parts(id, config, rate, abatement)
    }

    /// Create a company from an explicit initial rate and abatement curve
    pub fn from_parts(
        id: usize,
        config: CompanyConfig,
        emission_rate: f64,
        abatement: AbatementCurve,
    ) -> Self {
        let expected_market_price = (config.min_sell_price + config.max_buy_price) / Decimal::TWO;
        let expected_emission = config.expected_emission;
        let allowance = config.initial_allowance;

        Self {
            id: AgentId::new(id),
            policy: config.trading_policy(),
            day: 1,
            emissions: EmissionModel::new(emission_rate),
            abatement_cost_per_ton: abatement.cost_per_ton(1),
            abatement,
            abatements: 0,
            abatement_spend: Decimal::ZERO,
            expected_emission,
            allowance,
            expected_deficit: (expected_emission - allowance).trunc() as i64,
            expected_market_price,
            trade_price: expected_market_price,
            state: TradingState::Idle,
            count: 0,
            sale_counter: 0,
            buy_counter: 0,
            config,
        }
    }

    /// Run one simulated day
    ///
    /// `market_price` is the reference price set at the close of the
    /// previous day.
    pub fn update(&mut self, market_price: Price, rng: &mut dyn RandomSource) {
        self.update_expected_market_price(market_price);
        self.emissions.step(self.config.emission_rate_noise, rng);
        self.abatement_cost_per_ton = self.abatement.cost_per_ton(self.day);
        self.update_expected_emission();
        self.update_market_position(rng);
        self.day += 1;
    }

    /// Adapt the believed fair price from yesterday's net trade outcome
    fn update_expected_market_price(&mut self, market_price: Price) {
        match self.state {
            TradingState::Sell => {
                if self.sale_counter > 0 {
                    self.expected_market_price += Decimal::ONE;
                } else if self.sale_counter < 0
                    && self.expected_market_price > self.config.min_sell_price
                {
                    self.expected_market_price = (self.expected_market_price - Decimal::ONE)
                        .max(self.config.min_sell_price);
                }
            }
            TradingState::Buy => {
                if self.buy_counter > 0 {
                    self.expected_market_price -= Decimal::ONE;
                } else if self.buy_counter < 0
                    && self.expected_market_price < self.config.max_buy_price
                {
                    self.expected_market_price = (self.expected_market_price + Decimal::ONE)
                        .min(self.config.max_buy_price);
                }
            }
            TradingState::Idle if self.day > 1 => {
                let gap = market_price - self.expected_market_price;
                self.expected_market_price += gap.clamp(-Decimal::ONE, Decimal::ONE);
            }
            TradingState::Idle => {}
        }

        self.sale_counter = 0;
        self.buy_counter = 0;
    }

    fn update_expected_emission(&mut self) {
        self.expected_emission = self.emissions.projected_annual_emission();
        self.expected_deficit = (self.expected_emission.ceil() - self.allowance).trunc() as i64;
    }

    fn update_market_position(&mut self, rng: &mut dyn RandomSource) {
        let previous = self.state;

        match self.decide_position(rng) {
            MarketPosition::Abate => {
                self.abate();
                self.go_idle();
            }
            MarketPosition::Buy { quantity, price } => {
                self.state = TradingState::Buy;
                self.count = quantity;
                self.trade_price = price;
            }
            MarketPosition::Sell { quantity, price } => {
                self.state = TradingState::Sell;
                self.count = quantity;
                self.trade_price = price;
            }
            MarketPosition::Idle => self.go_idle(),
        }

        if previous != self.state {
            trace!(
                "{} day {}: {} -> {} (deficit={}, count={})",
                self.id, self.day, previous, self.state, self.expected_deficit, self.count
            );
        }
    }

    /// Today's decision, before it is applied
    fn decide_position(&self, rng: &mut dyn RandomSource) -> MarketPosition {
        if self.expected_deficit > 0 {
            if self.abatement_is_cheaper() {
                return MarketPosition::Abate;
            }
            let quantity = self
                .policy
                .buy_quantity(self.expected_deficit as Quantity, self.day, rng);
            MarketPosition::Buy {
                quantity,
                price: self.expected_market_price.min(self.config.max_buy_price),
            }
        } else if self.expected_deficit <= -1 {
            let surplus = self.expected_deficit.unsigned_abs();
            let quantity =
                self.policy
                    .sell_quantity(surplus, self.expected_emission, self.day, rng);
            if quantity == 0 {
                return MarketPosition::Idle;
            }
            MarketPosition::Sell {
                quantity,
                price: self.expected_market_price.max(self.config.min_sell_price),
            }
        } else {
            MarketPosition::Idle
        }
    }

    /// The next abatement step per ton undercuts the expected market price
    fn abatement_is_cheaper(&self) -> bool {
        if !self.config.abatement_enabled {
            return false;
        }
        match self.abatement_cost_per_ton {
            Some(cost) => self.expected_market_price > cost,
            None => false,
        }
    }

    fn abate(&mut self) {
        if let Some(cost) = self.abatement.consume() {
            self.emissions.reduce_rate(1.0);
            self.abatements += 1;
            self.abatement_spend += cost;
            debug!(
                "{} day {}: abated one unit for {} (rate now {:.4}, {} steps left)",
                self.id,
                self.day,
                cost,
                self.emissions.rate(),
                self.abatement.len()
            );
        }
    }

    fn go_idle(&mut self) {
        self.state = TradingState::Idle;
        self.count = 0;
    }

    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn config(&self) -> &CompanyConfig {
        &self.config
    }

    pub fn policy(&self) -> TradingPolicy {
        self.policy
    }

    /// Next day to simulate
    pub fn day(&self) -> Day {
        self.day
    }

    pub fn emission_rate(&self) -> f64 {
        self.emissions.rate()
    }

    pub fn total_emission(&self) -> f64 {
        self.emissions.total()
    }

    pub fn emissions(&self) -> &EmissionModel {
        &self.emissions
    }

    /// Mean daily rate over the trailing year, if any day has passed
    pub fn trailing_mean(&self) -> Option<f64> {
        self.emissions.trailing().mean()
    }

    pub fn expected_emission(&self) -> f64 {
        self.expected_emission
    }

    pub fn allowance(&self) -> f64 {
        self.allowance
    }

    pub fn expected_deficit(&self) -> i64 {
        self.expected_deficit
    }

    pub fn abatement_curve(&self) -> &AbatementCurve {
        &self.abatement
    }

    pub fn abatement_costs(&self) -> &[Price] {
        self.abatement.costs()
    }

    pub fn abatement_cost_per_ton(&self) -> Option<Price> {
        self.abatement_cost_per_ton
    }

    /// Abatement steps bought so far
    pub fn abatements(&self) -> u32 {
        self.abatements
    }

    /// Total paid for abatement steps
    pub fn abatement_spend(&self) -> Price {
        self.abatement_spend
    }

    pub fn expected_market_price(&self) -> Price {
        self.expected_market_price
    }

    pub fn trade_price(&self) -> Price {
        self.trade_price
    }

    pub fn state(&self) -> TradingState {
        self.state
    }

    pub fn count(&self) -> Quantity {
        self.count
    }

    pub fn sale_counter(&self) -> i64 {
        self.sale_counter
    }

    pub fn buy_counter(&self) -> i64 {
        self.buy_counter
    }

    pub fn min_sell_price(&self) -> Price {
        self.config.min_sell_price
    }

    pub fn max_buy_price(&self) -> Price {
        self.config.max_buy_price
    }
}

impl Trader for CompanyAgent {
    fn id(&self) -> AgentId {
        self.id
    }

    fn daily_update(&mut self, market_price: Price, rng: &mut dyn RandomSource) {
        self.update(market_price, rng);
    }

    fn state(&self) -> TradingState {
        self.state
    }

    fn count(&self) -> Quantity {
        self.count
    }

    fn trade_price(&self) -> Price {
        self.trade_price
    }

    fn expected_deficit(&self) -> i64 {
        self.expected_deficit
    }

    fn buy_allowance(&mut self, amount: Quantity) {
        debug_assert!(amount <= self.count, "bought more than the open count");
        self.allowance += amount as f64;
        self.count = self.count.saturating_sub(amount);
        self.buy_counter += amount as i64;
    }

    fn sell_allowance(&mut self, amount: Quantity) {
        debug_assert!(amount <= self.count, "sold more than the open count");
        self.allowance -= amount as f64;
        self.count = self.count.saturating_sub(amount);
        self.sale_counter += amount as i64;
    }

    fn failed_buy(&mut self) {
        self.buy_counter -= self.count as i64;
    }

    fn failed_sell(&mut self) {
        self.sale_counter -= self.count as i64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ets_random::ScriptedRandom;
    use rust_decimal_macros::dec;

    /// A noise-free company emitting exactly `rate` per day
    fn company(rate: f64, allowance: f64, costs: Vec<Price>) -> CompanyAgent {
        let config = CompanyConfig::new(rate * 365.0, allowance, dec!(10), dec!(30))
            .with_noise(0.0, 0.0);
        CompanyAgent::from_parts(0, config, rate, AbatementCurve::from_costs(costs))
    }

    #[test]
    fn test_initial_state() {
        let agent = company(2.0, 700.0, vec![dec!(3650)]);

        assert_eq!(agent.day(), 1);
        assert_eq!(agent.state(), TradingState::Idle);
        assert_eq!(agent.count(), 0);
        assert_eq!(agent.expected_market_price(), dec!(20));
        assert_eq!(agent.trade_price(), dec!(20));
        assert_eq!(agent.expected_deficit(), 30);
        assert_eq!(agent.abatement_cost_per_ton(), Some(dec!(10)));
    }

    #[test]
    fn test_shortage_buys_at_expected_price() {
        // 2/day -> 730 projected against 700 held; abatement costs 36500/365 = 100 per ton, above 20
        let mut agent = company(2.0, 700.0, vec![dec!(36500)]);
        agent.update(dec!(20), &mut ScriptedRandom::new());

        assert_eq!(agent.state(), TradingState::Buy);
        assert_eq!(agent.count(), 30);
        assert_eq!(agent.trade_price(), dec!(20));
        assert_eq!(agent.day(), 2);
    }

    #[test]
    fn test_cheap_abatement_beats_buying() {
        // Next step costs 3650 / 365 = 10 per ton, below the expected price of 20
        let mut agent = company(2.0, 700.0, vec![dec!(3650), dec!(5000)]);
        agent.update(dec!(20), &mut ScriptedRandom::new());

        assert_eq!(agent.state(), TradingState::Idle);
        assert_eq!(agent.count(), 0);
        assert_eq!(agent.abatements(), 1);
        assert_eq!(agent.abatement_costs(), &[dec!(5000)]);
        assert_eq!(agent.emission_rate(), 1.0);
        assert_eq!(agent.abatement_spend(), dec!(3650));
    }

    #[test]
    fn test_abatement_disabled_always_buys() {
        let config = CompanyConfig::new(730.0, 700.0, dec!(10), dec!(30))
            .with_noise(0.0, 0.0)
            .with_abatement(false);
        let mut agent =
            CompanyAgent::from_parts(0, config, 2.0, AbatementCurve::from_costs(vec![dec!(1)]));
        agent.update(dec!(20), &mut ScriptedRandom::new());

        assert_eq!(agent.state(), TradingState::Buy);
        assert_eq!(agent.abatements(), 0);
    }

    #[test]
    fn test_surplus_sells_at_least_min_price() {
        let mut agent = company(1.0, 400.0, vec![dec!(36500)]);
        agent.update(dec!(20), &mut ScriptedRandom::new());

        assert_eq!(agent.expected_deficit(), -35);
        assert_eq!(agent.state(), TradingState::Sell);
        assert_eq!(agent.count(), 35);
        assert_eq!(agent.trade_price(), dec!(20));
    }

    #[test]
    fn test_small_surplus_stays_idle() {
        // Projection 365 against 365.5 held: truncated deficit 0
        let mut agent = company(1.0, 365.5, vec![dec!(36500)]);
        agent.update(dec!(20), &mut ScriptedRandom::new());

        assert_eq!(agent.expected_deficit(), 0);
        assert_eq!(agent.state(), TradingState::Idle);
    }

    #[test]
    fn test_trade_callbacks_conserve_allowance() {
        let mut agent = company(2.0, 700.0, vec![dec!(36500)]);
        agent.update(dec!(20), &mut ScriptedRandom::new());
        assert_eq!(agent.count(), 30);

        agent.buy_allowance(12);
        assert_eq!(agent.allowance(), 712.0);
        assert_eq!(agent.count(), 18);
        assert_eq!(agent.buy_counter(), 12);

        agent.failed_buy();
        assert_eq!(agent.buy_counter(), -6);
    }

    #[test]
    fn test_failed_sale_lowers_expectation_to_floor() {
        let mut agent = company(1.0, 400.0, vec![dec!(36500)]);
        let mut rng = ScriptedRandom::new();
        agent.update(dec!(20), &mut rng);
        assert_eq!(agent.state(), TradingState::Sell);

        for _ in 0..15 {
            agent.failed_sell();
            agent.update(dec!(20), &mut rng);
            assert!(agent.expected_market_price() >= agent.min_sell_price());
        }
        assert_eq!(agent.expected_market_price(), dec!(10));
    }

    #[test]
    fn test_successful_sale_raises_expectation() {
        let mut agent = company(1.0, 400.0, vec![dec!(36500)]);
        let mut rng = ScriptedRandom::new();
        agent.update(dec!(20), &mut rng);

        agent.sell_allowance(5);
        agent.failed_sell();
        // Net +5 -30: the day counts as a failure
        assert!(agent.sale_counter() < 0);

        agent.update(dec!(20), &mut rng);
        assert_eq!(agent.expected_market_price(), dec!(19));
        assert_eq!(agent.sale_counter(), 0);

        agent.sell_allowance(agent.count());
        agent.update(dec!(20), &mut rng);
        assert_eq!(agent.expected_market_price(), dec!(20));
    }

    #[test]
    fn test_failed_buy_raises_expectation_to_cap() {
        let mut agent = company(2.0, 700.0, vec![dec!(3650000)]);
        let mut rng = ScriptedRandom::new();
        agent.update(dec!(20), &mut rng);
        assert_eq!(agent.state(), TradingState::Buy);

        for _ in 0..15 {
            agent.failed_buy();
            agent.update(dec!(20), &mut rng);
            assert!(agent.expected_market_price() <= agent.max_buy_price());
        }
        assert_eq!(agent.expected_market_price(), dec!(30));
        assert_eq!(agent.trade_price(), dec!(30));
    }

    #[test]
    fn test_idle_drifts_toward_market() {
        let mut agent = company(1.0, 365.5, vec![dec!(36500)]);
        let mut rng = ScriptedRandom::new();

        // Day 1 never drifts
        agent.update(dec!(25.5), &mut rng);
        assert_eq!(agent.expected_market_price(), dec!(20));

        agent.update(dec!(25.5), &mut rng);
        assert_eq!(agent.expected_market_price(), dec!(21));

        for _ in 0..10 {
            agent.update(dec!(25.5), &mut rng);
        }
        assert_eq!(agent.expected_market_price(), dec!(25.5));
    }

    #[test]
    fn test_sell_never_exceeds_holdings() {
        // Nothing left to emit, 3.9 units held
        let config = CompanyConfig::new(0.0, 3.9, dec!(10), dec!(30)).with_noise(0.0, 0.0);
        let mut agent =
            CompanyAgent::from_parts(0, config, 0.0, AbatementCurve::from_costs(vec![dec!(1)]));
        agent.update(dec!(20), &mut ScriptedRandom::new());

        assert_eq!(agent.expected_deficit(), -3);
        assert_eq!(agent.state(), TradingState::Sell);
        assert_eq!(agent.count(), 3);

        agent.sell_allowance(3);
        assert!(agent.allowance() > 0.0);
    }

    #[test]
    fn test_huge_emitter_is_built_with_a_capped_curve() {
        let config = CompanyConfig::new(1e20, 0.0, dec!(10), dec!(30)).with_abatement(false);
        config.validate(0, false).unwrap();

        let mut rng = ScriptedRandom::new();
        let mut agent = CompanyAgent::new(0, config, &mut rng);
        assert!(agent.abatement_cost_per_ton().is_some());

        agent.update(dec!(20), &mut rng);
        assert_eq!(agent.state(), TradingState::Buy);
        assert!(agent.count() > 0);
    }

    #[test]
    fn test_full_sales_keep_allowance_non_negative() {
        let allowances = [0.5, 1.0, 3.9, 50.0, 364.99, 700.0];
        let rates = [0.0, 0.25, 1.0, 2.0];
        let mut rng = ScriptedRandom::new();

        for &allowance in &allowances {
            for &rate in &rates {
                let mut agent = company(rate, allowance, vec![dec!(1_000_000)]);
                for _ in 0..30 {
                    agent.update(dec!(20), &mut rng);
                    if agent.state() != TradingState::Sell {
                        continue;
                    }
                    let held = agent.allowance();
                    assert!(
                        agent.count() as f64 <= held.floor(),
                        "allowance {allowance}, rate {rate}: selling {} of {held}",
                        agent.count()
                    );
                    agent.sell_allowance(agent.count());
                    assert!(agent.allowance() >= 0.0);
                }
            }
        }
    }

    #[test]
    fn test_order_intent_follows_state() {
        let mut agent = company(2.0, 700.0, vec![dec!(36500)]);
        assert_eq!(agent.order_intent(), None);

        agent.update(dec!(20), &mut ScriptedRandom::new());
        assert_eq!(
            agent.order_intent(),
            Some((ets_core::Side::Buy, dec!(20), 30))
        );
    }
}
