//! Bootstrap - company population setup
//!
//! Turns a [`SimulationConfig`] into the ordered list of companies. All
//! draws come from the run's shared random stream: first the generated
//! parameters (company by company), then each company's own initial rate
//! and abatement curve.

use ets_agents::{CompanyAgent, CompanyConfig};
use ets_core::Price;
use ets_ports::{ConfigResult, RandomSource};
use log::info;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use crate::config::{PopulationConfig, SimulationConfig, UniformRange};

/// Company configurations in update order
///
/// Explicit `agents` win over a `population` description.
pub fn company_configs(config: &SimulationConfig, rng: &mut dyn RandomSource) -> Vec<CompanyConfig> {
    if !config.agents.is_empty() {
        return config.agents.clone();
    }
    match &config.population {
        Some(population) => generate(population, rng),
        None => Vec::new(),
    }
}

/// Validate the configuration and build every company
pub fn build_population(
    config: &SimulationConfig,
    rng: &mut dyn RandomSource,
) -> ConfigResult<Vec<CompanyAgent>> {
    config.validate()?;

    let configs = company_configs(config, rng);
    for (index, company) in configs.iter().enumerate() {
        company.validate(index, config.allow_negative_allowance)?;
    }

    let agents: Vec<CompanyAgent> = configs
        .into_iter()
        .enumerate()
        .map(|(index, company)| CompanyAgent::new(index, company, rng))
        .collect();

    let advanced = agents
        .iter()
        .filter(|agent| agent.config().advanced_trading_enabled)
        .count();
    info!(
        "Bootstrapped {} companies ({} advanced), total allowance {:.0}",
        agents.len(),
        advanced,
        agents.iter().map(|agent| agent.allowance()).sum::<f64>()
    );

    Ok(agents)
}

fn generate(population: &PopulationConfig, rng: &mut dyn RandomSource) -> Vec<CompanyConfig> {
    (0..population.size)
        .map(|_| {
            let expected_emission = draw(population.expected_emission, rng);
            let initial_allowance = draw(population.initial_allowance, rng);
            let mut min_sell_price = draw_price(population.min_sell_price, rng);
            let mut max_buy_price = draw_price(population.max_buy_price, rng);
            if min_sell_price > max_buy_price {
                std::mem::swap(&mut min_sell_price, &mut max_buy_price);
            }
            let advanced =
                population.advanced_share > 0.0 && rng.uniform(0.0, 1.0) < population.advanced_share;

            CompanyConfig::new(expected_emission, initial_allowance, min_sell_price, max_buy_price)
                .with_abatement(population.abatement_enabled)
                .with_advanced_trading(advanced)
        })
        .collect()
}

fn draw(range: UniformRange, rng: &mut dyn RandomSource) -> f64 {
    rng.uniform(range.low, range.high)
}

fn draw_price(range: UniformRange, rng: &mut dyn RandomSource) -> Price {
    Decimal::from_f64(draw(range, rng))
        .unwrap_or_default()
        .round_dp(2)
}
