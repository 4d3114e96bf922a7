//! ETS Ports
//!
//! Port definitions (traits) for the emissions trading simulation.
//! These define the boundaries between the market engine, the company
//! agents and the source of randomness.

mod error;
mod matching;
mod random;
mod trader;

pub use error::{ConfigError, ConfigResult, MatchingError, MatchingResult};
pub use matching::{MatchingMode, MatchingPolicy};
pub use random::{RandomSource, shuffle};
pub use trader::Trader;
