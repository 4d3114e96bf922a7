//! ETS Runner - Cap-and-Trade Simulation Driver
//!
//! Wires the pieces of one simulated compliance year together:
//!
//! - **Config**: JSON simulation settings and the company population
//! - **Bootstrap**: builds the companies from explicit or generated configs
//! - **Simulation**: owns the random stream, the companies and the market,
//!   and steps them day by day
//! - **Export**: dated JSON history for the analysis layer
//!
//! ## Architecture
//!
//! ```text
//!   ┌───────────────────┐
//!   │ SimulationConfig  │
//!   └─────────┬─────────┘
//!             │ bootstrap
//!             ▼
//!   ┌───────────────────┐   daily update    ┌───────────────────┐
//!   │  CompanyAgent × N │ ◄──────────────── │      Market       │
//!   │                   │ ────────────────► │ (double auction)  │
//!   └───────────────────┘   orders, fills   └─────────┬─────────┘
//!                                                     │ history
//!                                                     ▼
//!                                           ┌───────────────────┐
//!                                           │  HistoryExport    │
//!                                           └───────────────────┘
//! ```

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod export;
pub mod simulation;

// Re-export main types
pub use bootstrap::{build_population, company_configs};
pub use config::{PopulationConfig, SimulationConfig, UniformRange};
pub use error::{Result, SimulationError};
pub use export::HistoryExport;
pub use simulation::{CompanySummary, Simulation, SimulationResults};
