use ets_market::MarketError;
use ets_ports::ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Market error: {0}")]
    Market(#[from] MarketError),

    #[error("Failed to write {path}: {error}")]
    Io { path: String, error: String },

    #[error("Failed to serialize history: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimulationError>;
