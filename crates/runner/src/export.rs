//! Dated JSON export of the market history

use std::path::Path;

use chrono::{Days, NaiveDate};
use ets_core::{AgentId, Day, Price, Quantity, TradingState};
use ets_market::MarketHistory;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimulationError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatedTrade {
    pub date: NaiveDate,
    pub day: Day,
    pub price: Price,
    pub amount: Quantity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatedPrice {
    pub date: NaiveDate,
    pub day: Day,
    pub market_price: Price,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatedAgentState {
    pub date: NaiveDate,
    pub day: Day,
    pub agent_id: AgentId,
    pub expected_deficit: i64,
    pub state: TradingState,
    pub count: Quantity,
}

/// Market history with calendar dates, ready for plotting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryExport {
    pub start_date: NaiveDate,
    pub trades: Vec<DatedTrade>,
    pub prices: Vec<DatedPrice>,
    pub agent_states: Vec<DatedAgentState>,
}

impl HistoryExport {
    /// Stamp every record of `history`; day 1 falls on `start_date`
    pub fn new(history: &MarketHistory, start_date: NaiveDate) -> Self {
        let date = |day: Day| date_of(start_date, day);

        Self {
            start_date,
            trades: history
                .trades
                .iter()
                .map(|trade| DatedTrade {
                    date: date(trade.day),
                    day: trade.day,
                    price: trade.price,
                    amount: trade.amount,
                })
                .collect(),
            prices: history
                .prices
                .iter()
                .map(|price| DatedPrice {
                    date: date(price.day),
                    day: price.day,
                    market_price: price.market_price,
                })
                .collect(),
            agent_states: history
                .agent_states
                .iter()
                .map(|state| DatedAgentState {
                    date: date(state.day),
                    day: state.day,
                    agent_id: state.agent_id,
                    expected_deficit: state.expected_deficit,
                    state: state.state,
                    count: state.count,
                })
                .collect(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = self.to_json()?;
        std::fs::write(path.as_ref(), json).map_err(|e| SimulationError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })
    }
}

/// Calendar date of simulated `day`, saturating at the last representable date
pub fn date_of(start_date: NaiveDate, day: Day) -> NaiveDate {
    let offset = u64::from(day.saturating_sub(1));
    start_date
        .checked_add_days(Days::new(offset))
        .unwrap_or(NaiveDate::MAX)
}
