mod fill;
mod history;
mod order;
mod side;
mod trade;
mod trading_state;

pub use fill::Fill;
pub use history::{AgentStateRecord, PriceRecord, TradeRecord};
pub use order::{Order, OrderId};
pub use side::Side;
pub use trade::{Trade, TradeId};
pub use trading_state::TradingState;
