use ets_ports::MatchingError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarketError {
    #[error("Matching invariant violated: {0}")]
    Matching(#[from] MatchingError),

    #[error("Fill references trader #{0} outside the trader pool")]
    UnknownTrader(usize),
}

pub type Result<T> = std::result::Result<T, MarketError>;
