//! Append-only daily records handed to the analysis layer.

use serde::{Deserialize, Serialize};

use super::TradingState;
use crate::values::{AgentId, Day, Price, Quantity};

/// One executed trade: `(day, trade_price, trade_amount)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub day: Day,
    pub price: Price,
    pub amount: Quantity,
}

/// Reference market price at the close of a day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub day: Day,
    pub market_price: Price,
}

/// A company's position right after its daily update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentStateRecord {
    pub day: Day,
    pub agent_id: AgentId,
    pub expected_deficit: i64,
    pub state: TradingState,
    pub count: Quantity,
}
