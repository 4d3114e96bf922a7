//! Company Configuration
//!
//! Construction parameters of one company agent.

use ets_core::Price;
use ets_ports::{ConfigError, ConfigResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::policy::TradingPolicy;

/// Configuration for a company agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyConfig {
    /// Expected emission for the year
    pub expected_emission: f64,

    /// Allowances held at the start of the year
    pub initial_allowance: f64,

    /// Lowest price the company will ever sell at
    pub min_sell_price: Price,

    /// Highest price the company will ever pay
    pub max_buy_price: Price,

    /// Standard deviation of the initial daily rate around `expected_emission / 365`
    #[serde(default = "default_expected_emission_noise")]
    pub expected_emission_noise: f64,

    /// Standard deviation of the daily emission-rate increment
    #[serde(default = "default_emission_rate_noise")]
    pub emission_rate_noise: f64,

    /// Whether the company may buy abatement steps
    #[serde(default = "default_abatement_enabled")]
    pub abatement_enabled: bool,

    /// Use the advanced (fractional, buffered) order sizing
    #[serde(default)]
    pub advanced_trading_enabled: bool,
}

fn default_expected_emission_noise() -> f64 {
    0.1
}

fn default_emission_rate_noise() -> f64 {
    0.01
}

fn default_abatement_enabled() -> bool {
    true
}

impl Default for CompanyConfig {
    fn default() -> Self {
        Self {
            expected_emission: 1000.0,
            initial_allowance: 1000.0,
            min_sell_price: Decimal::from(20),
            max_buy_price: Decimal::from(80),
            expected_emission_noise: default_expected_emission_noise(),
            emission_rate_noise: default_emission_rate_noise(),
            abatement_enabled: default_abatement_enabled(),
            advanced_trading_enabled: false,
        }
    }
}

impl CompanyConfig {
    pub fn new(
        expected_emission: f64,
        initial_allowance: f64,
        min_sell_price: Price,
        max_buy_price: Price,
    ) -> Self {
        Self {
            expected_emission,
            initial_allowance,
            min_sell_price,
            max_buy_price,
            ..Default::default()
        }
    }

    /// Set both noise levels (builder pattern)
    pub fn with_noise(mut self, expected_emission_noise: f64, emission_rate_noise: f64) -> Self {
        self.expected_emission_noise = expected_emission_noise;
        self.emission_rate_noise = emission_rate_noise;
        self
    }

    /// Enable or disable abatement (builder pattern)
    pub fn with_abatement(mut self, enabled: bool) -> Self {
        self.abatement_enabled = enabled;
        self
    }

    /// Enable or disable advanced trading (builder pattern)
    pub fn with_advanced_trading(mut self, enabled: bool) -> Self {
        self.advanced_trading_enabled = enabled;
        self
    }

    pub fn trading_policy(&self) -> TradingPolicy {
        TradingPolicy::from_flag(self.advanced_trading_enabled)
    }

    /// Check the parameters of the company at position `index`
    pub fn validate(&self, index: usize, allow_negative_allowance: bool) -> ConfigResult<()> {
        let invalid = |reason: String| ConfigError::InvalidAgent { index, reason };

        if !self.expected_emission.is_finite() || self.expected_emission < 0.0 {
            return Err(invalid(format!(
                "expected_emission must be a non-negative number, got {}",
                self.expected_emission
            )));
        }
        if !self.initial_allowance.is_finite() {
            return Err(invalid("initial_allowance must be finite".to_string()));
        }
        if !allow_negative_allowance && self.initial_allowance < 0.0 {
            return Err(invalid(format!(
                "initial_allowance {} is negative and negative allowance is not allowed",
                self.initial_allowance
            )));
        }
        let bad_noise = |noise: f64| noise.is_nan() || noise < 0.0;
        if bad_noise(self.expected_emission_noise) || bad_noise(self.emission_rate_noise) {
            return Err(invalid("noise levels must be non-negative".to_string()));
        }
        if self.min_sell_price.is_sign_negative() {
            return Err(invalid(format!(
                "min_sell_price {} is negative",
                self.min_sell_price
            )));
        }
        if self.min_sell_price > self.max_buy_price {
            return Err(invalid(format!(
                "min_sell_price {} exceeds max_buy_price {}",
                self.min_sell_price, self.max_buy_price
            )));
        }
        Ok(())
    }
}
