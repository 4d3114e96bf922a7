use ets_core::{AgentStateRecord, Day, Price, PriceRecord, Quantity, Trade, TradeRecord};
use serde::{Deserialize, Serialize};

/// Summary of one simulated trading day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayReport {
    pub day: Day,
    /// Orders routed to the auction
    pub orders: usize,
    /// Trades executed, in execution order
    pub trades: Vec<Trade>,
    /// Units traded
    pub volume: Quantity,
    /// Reference price after price discovery
    pub market_price: Price,
    /// Whether the curves crossed and set the price
    pub price_changed: bool,
}

/// Append-only daily records for the analysis layer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketHistory {
    pub trades: Vec<TradeRecord>,
    pub prices: Vec<PriceRecord>,
    pub agent_states: Vec<AgentStateRecord>,
}

impl MarketHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Days with a recorded market price
    pub fn days(&self) -> usize {
        self.prices.len()
    }

    pub fn total_volume(&self) -> Quantity {
        self.trades.iter().map(|trade| trade.amount).sum()
    }

    pub fn last_price(&self) -> Option<Price> {
        self.prices.last().map(|record| record.market_price)
    }

    /// Trades executed on `day`
    pub fn trades_on(&self, day: Day) -> impl Iterator<Item = &TradeRecord> {
        self.trades.iter().filter(move |trade| trade.day == day)
    }

    /// Agent states recorded on `day`
    pub fn states_on(&self, day: Day) -> impl Iterator<Item = &AgentStateRecord> {
        self.agent_states.iter().filter(move |state| state.day == day)
    }
}
