use ets_core::{OrderId, Price};
use thiserror::Error;

/// Domain-level errors for matching operations
///
/// Every variant is an invariant violation inside a matching pass, never a
/// recoverable business condition.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchingError {
    #[error("Order {order} has no residual quantity to trade")]
    EmptySide { order: OrderId },

    #[error("Orders do not cross: buy at {buy_price} below sell at {sell_price}")]
    PriceNotCrossed { buy_price: Price, sell_price: Price },

    #[error("Order {order} is on the wrong side for this leg")]
    WrongSide { order: OrderId },

    #[error("Order not found: {0}")]
    UnknownOrder(OrderId),
}

pub type MatchingResult<T> = std::result::Result<T, MatchingError>;

/// Configuration errors, fatal at construction
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unsupported matching mode: {0:?} (expected \"seller_preferred\" or \"buyer_preferred\")")]
    UnsupportedMatchingMode(String),

    #[error("Invalid agent #{index}: {reason}")]
    InvalidAgent { index: usize, reason: String },

    #[error("Invalid simulation setting: {0}")]
    InvalidSetting(String),

    #[error("Failed to read {path}: {error}")]
    Io { path: String, error: String },

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
