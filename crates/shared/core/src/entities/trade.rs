use serde::{Deserialize, Serialize};

use super::OrderId;
use super::history::TradeRecord;
use crate::values::{AgentId, Day, Price, Quantity};

/// Sequential identifier for a trade, unique within a run
pub type TradeId = u64;

/// Trade resulting from matching a buy and a sell order
///
/// Trades are appended to the market's trade log and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub id: TradeId,
    pub day: Day,
    pub buyer: AgentId,
    pub seller: AgentId,
    pub buy_order_id: OrderId,
    pub sell_order_id: OrderId,
    pub price: Price,
    pub quantity: Quantity,
}

impl Trade {
    /// The `(day, price, amount)` row kept in the trade log
    pub fn record(&self) -> TradeRecord {
        TradeRecord {
            day: self.day,
            price: self.price,
            amount: self.quantity,
        }
    }
}
