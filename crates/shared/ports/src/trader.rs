use ets_core::{AgentId, Price, Quantity, Side, TradingState};

use crate::RandomSource;

/// Port for a market participant driven by the engine
///
/// The engine borrows traders for the length of one matching pass only.
/// It reads the order a trader decided on and calls back with fills and
/// failures; it never keeps a reference once the day is over.
pub trait Trader {
    /// Identifier used in trades and history
    fn id(&self) -> AgentId;

    /// Run the trader's daily decision process given yesterday's price
    fn daily_update(&mut self, market_price: Price, rng: &mut dyn RandomSource);

    /// Today's order direction
    fn state(&self) -> TradingState;

    /// Residual unfilled quantity of today's order
    fn count(&self) -> Quantity;

    /// Limit price of today's order
    fn trade_price(&self) -> Price;

    /// Projected annual shortage (positive) or surplus (negative)
    fn expected_deficit(&self) -> i64;

    /// Credit `amount` bought allowances
    fn buy_allowance(&mut self, amount: Quantity);

    /// Debit `amount` sold allowances
    fn sell_allowance(&mut self, amount: Quantity);

    /// The buy order ended the day with residual quantity
    fn failed_buy(&mut self);

    /// The sell order ended the day with residual quantity
    fn failed_sell(&mut self);

    /// The order to route today, if any
    fn order_intent(&self) -> Option<(Side, Price, Quantity)> {
        let side = self.state().side()?;
        match self.count() {
            0 => None,
            count => Some((side, self.trade_price(), count)),
        }
    }
}
