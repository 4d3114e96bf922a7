//! ETS Core Domain
//!
//! Pure domain types for the emissions trading simulation.
//! Nothing here draws random numbers or touches I/O.

pub mod entities;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{
    // History records
    AgentStateRecord,
    // Core trading entities
    Fill,
    Order,
    OrderId,
    PriceRecord,
    Side,
    Trade,
    TradeId,
    TradeRecord,
    TradingState,
};
pub use values::{AgentId, DAYS_PER_YEAR, Day, Price, Quantity};
