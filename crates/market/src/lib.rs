//! ETS Market
//!
//! Runs one simulated trading day at a time:
//!
//! 1. Every trader updates against yesterday's price and routes its order
//! 2. The selected matching policy crosses buyers with sellers
//! 3. Fills are settled back onto the traders, residuals signal failure
//! 4. The day's supply/demand curves set the next reference price
//!
//! The market borrows the traders for the length of [`Market::run_day`]
//! and keeps only the append-only [`MarketHistory`].

// Application layer
pub mod application;

// Cross-cutting concerns
pub mod error;
pub mod model;

// Re-export main types for convenience
pub use application::Market;
pub use error::{MarketError, Result as MarketResult};
pub use model::{DayReport, MarketHistory};
