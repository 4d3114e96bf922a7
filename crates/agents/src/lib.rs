//! Company Agents
//!
//! Boundedly-rational companies in a cap-and-trade market.
//!
//! Each simulated day a company:
//!
//! 1. Adapts its price expectation from yesterday's trade outcome
//! 2. Emits (a random walk on its daily emission rate, floored at zero)
//! 3. Re-prices its next abatement step over the remaining days
//! 4. Re-projects its annual emission and allowance deficit
//! 5. Decides to abate, buy, sell or stay idle
//!
//! # Components
//!
//! - **EmissionModel**: daily emission path and trailing-year projection
//! - **AbatementCurve**: non-decreasing marginal abatement costs
//! - **TradingPolicy**: simple or advanced order sizing
//! - **CompanyAgent**: ties the above together and implements [`Trader`]
//!
//! [`Trader`]: ets_ports::Trader

mod abatement;
mod company;
mod config;
mod emission;
mod policy;

pub use abatement::AbatementCurve;
pub use company::CompanyAgent;
pub use config::CompanyConfig;
pub use emission::{EmissionModel, TRAILING_WINDOW, TrailingEmissions};
pub use policy::{MarketPosition, TradingPolicy};
