//! Simulation configuration
//!
//! Loaded from JSON. Companies are either listed explicitly under
//! `agents` or generated from a `population` description.

use std::path::Path;

use chrono::NaiveDate;
use ets_agents::CompanyConfig;
use ets_core::{DAYS_PER_YEAR, Day, Price};
use ets_ports::{ConfigError, ConfigResult, MatchingMode};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Root configuration of one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Reference price before the first day
    pub initial_market_price: Price,

    /// `seller_preferred` or `buyer_preferred`
    pub matching_mode: String,

    /// Days to simulate
    #[serde(default = "default_days")]
    pub days: Day,

    /// Seed of the shared random stream; entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,

    /// Let companies sell allowances they do not hold
    #[serde(default)]
    pub allow_negative_allowance: bool,

    /// Calendar date of day 1 on exported records
    #[serde(default = "default_start_date")]
    pub start_date: NaiveDate,

    /// Explicit companies, in update order
    #[serde(default)]
    pub agents: Vec<CompanyConfig>,

    /// Generated companies, used when `agents` is empty
    #[serde(default)]
    pub population: Option<PopulationConfig>,
}

fn default_days() -> Day {
    DAYS_PER_YEAR
}

fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default()
}

impl SimulationConfig {
    pub fn new(initial_market_price: Price, mode: MatchingMode) -> Self {
        Self {
            initial_market_price,
            matching_mode: mode.as_str().to_string(),
            days: default_days(),
            seed: None,
            allow_negative_allowance: false,
            start_date: default_start_date(),
            agents: Vec::new(),
            population: None,
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::from_json(&content)
    }

    /// Parse configuration from JSON string
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_days(mut self, days: Day) -> Self {
        self.days = days;
        self
    }

    pub fn with_agents(mut self, agents: Vec<CompanyConfig>) -> Self {
        self.agents = agents;
        self
    }

    pub fn with_population(mut self, population: PopulationConfig) -> Self {
        self.population = Some(population);
        self
    }

    pub fn with_negative_allowance(mut self, allow: bool) -> Self {
        self.allow_negative_allowance = allow;
        self
    }

    pub fn matching_mode(&self) -> ConfigResult<MatchingMode> {
        self.matching_mode.parse()
    }

    /// Check everything that can be checked before drawing random numbers
    pub fn validate(&self) -> ConfigResult<()> {
        self.matching_mode()?;

        if self.initial_market_price < Decimal::ZERO {
            return Err(ConfigError::InvalidSetting(format!(
                "initial_market_price must not be negative, got {}",
                self.initial_market_price
            )));
        }
        if self.days == 0 {
            return Err(ConfigError::InvalidSetting("days must be positive".into()));
        }

        for (index, agent) in self.agents.iter().enumerate() {
            agent.validate(index, self.allow_negative_allowance)?;
        }

        match (&self.population, self.agents.is_empty()) {
            (_, false) => Ok(()),
            (Some(population), true) => population.validate(),
            (None, true) => Err(ConfigError::InvalidSetting(
                "no agents listed and no population to generate".into(),
            )),
        }
    }
}

/// Closed interval for a uniform draw
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UniformRange {
    pub low: f64,
    pub high: f64,
}

impl UniformRange {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    fn validate(&self, name: &str) -> ConfigResult<()> {
        if !self.low.is_finite() || !self.high.is_finite() || self.low < 0.0 {
            return Err(ConfigError::InvalidSetting(format!(
                "population.{} must be finite and non-negative",
                name
            )));
        }
        if self.low > self.high {
            return Err(ConfigError::InvalidSetting(format!(
                "population.{} has low {} above high {}",
                name, self.low, self.high
            )));
        }
        Ok(())
    }
}

fn default_unit_range() -> UniformRange {
    UniformRange::new(0.0, 100.0)
}

/// Uniformly drawn company population
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationConfig {
    /// Number of companies
    pub size: usize,

    #[serde(default = "default_unit_range")]
    pub expected_emission: UniformRange,

    #[serde(default = "default_unit_range")]
    pub initial_allowance: UniformRange,

    #[serde(default = "default_unit_range")]
    pub min_sell_price: UniformRange,

    #[serde(default = "default_unit_range")]
    pub max_buy_price: UniformRange,

    /// Share of companies using the advanced trading policy
    #[serde(default)]
    pub advanced_share: f64,

    #[serde(default = "default_abatement_enabled")]
    pub abatement_enabled: bool,
}

fn default_abatement_enabled() -> bool {
    true
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            size: 100,
            expected_emission: default_unit_range(),
            initial_allowance: default_unit_range(),
            min_sell_price: default_unit_range(),
            max_buy_price: default_unit_range(),
            advanced_share: 0.0,
            abatement_enabled: default_abatement_enabled(),
        }
    }
}

impl PopulationConfig {
    pub fn with_size(size: usize) -> Self {
        Self {
            size,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.size == 0 {
            return Err(ConfigError::InvalidSetting(
                "population.size must be positive".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.advanced_share) {
            return Err(ConfigError::InvalidSetting(format!(
                "population.advanced_share must lie in [0, 1], got {}",
                self.advanced_share
            )));
        }
        self.expected_emission.validate("expected_emission")?;
        self.initial_allowance.validate("initial_allowance")?;
        self.min_sell_price.validate("min_sell_price")?;
        self.max_buy_price.validate("max_buy_price")
    }
}
