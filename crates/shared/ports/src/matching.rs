use ets_core::{Fill, Order, Side};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{ConfigError, MatchingResult, RandomSource};

/// Matching policy selected once at market construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchingMode {
    /// Sellers drive matching and trades execute at the buyer's limit
    SellerPreferred,
    /// Buyers drive matching and trades execute at the seller's limit
    BuyerPreferred,
}

impl MatchingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchingMode::SellerPreferred => "seller_preferred",
            MatchingMode::BuyerPreferred => "buyer_preferred",
        }
    }

    /// The side whose limit price becomes the execution price
    pub fn price_setter(&self) -> Side {
        match self {
            MatchingMode::SellerPreferred => Side::Buy,
            MatchingMode::BuyerPreferred => Side::Sell,
        }
    }
}

impl FromStr for MatchingMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "seller_preferred" => Ok(MatchingMode::SellerPreferred),
            "buyer_preferred" => Ok(MatchingMode::BuyerPreferred),
            other => Err(ConfigError::UnsupportedMatchingMode(other.to_string())),
        }
    }
}

impl fmt::Display for MatchingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Port for double-auction matching policies
///
/// A policy works on the day's order arena only: it fills orders in place
/// and reports the fills. Applying fills to the owning traders is the
/// market's job.
pub trait MatchingPolicy: Send {
    /// Which mode this policy implements
    fn mode(&self) -> MatchingMode;

    /// Check if two orders can match
    fn can_match(&self, buy_order: &Order, sell_order: &Order) -> bool {
        buy_order.side == Side::Buy
            && sell_order.side == Side::Sell
            && buy_order.price >= sell_order.price
            && buy_order.remaining_quantity() > 0
            && sell_order.remaining_quantity() > 0
    }

    /// Match the day's orders, filling them in place
    fn match_orders(
        &self,
        orders: &mut [Order],
        rng: &mut dyn RandomSource,
    ) -> MatchingResult<Vec<Fill>>;

    /// Get the name of the policy
    fn name(&self) -> &str {
        self.mode().as_str()
    }
}
