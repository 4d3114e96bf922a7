use serde::{Deserialize, Serialize};
use std::fmt;

use super::Side;

/// Today's market position of a company
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradingState {
    /// No order today (balanced, abated, or nothing to release)
    #[default]
    Idle,
    /// Covering a projected shortage
    Buy,
    /// Releasing a projected surplus
    Sell,
}

impl TradingState {
    /// Order side for an active state, `None` when idle
    pub fn side(&self) -> Option<Side> {
        match self {
            TradingState::Idle => None,
            TradingState::Buy => Some(Side::Buy),
            TradingState::Sell => Some(Side::Sell),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, TradingState::Idle)
    }
}

impl From<Side> for TradingState {
    fn from(side: Side) -> Self {
        match side {
            Side::Buy => TradingState::Buy,
            Side::Sell => TradingState::Sell,
        }
    }
}

impl fmt::Display for TradingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TradingState::Idle => "idle",
            TradingState::Buy => "buy",
            TradingState::Sell => "sell",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_mapping() {
        assert_eq!(TradingState::Idle.side(), None);
        assert_eq!(TradingState::Buy.side(), Some(Side::Buy));
        assert_eq!(TradingState::from(Side::Sell), TradingState::Sell);
    }

    #[test]
    fn test_serializes_lowercase() {
        let json = serde_json::to_string(&TradingState::Sell).unwrap();
        assert_eq!(json, "\"sell\"");
    }
}
