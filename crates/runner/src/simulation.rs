//! Simulation - one compliance year end to end
//!
//! Owns the random stream, the companies and the market, and steps them
//! one day at a time. The companies are lent to the market for each day
//! and never shared beyond it.

use ets_agents::CompanyAgent;
use ets_core::{AgentId, Day, Price, Quantity, TradingState};
use ets_market::{DayReport, Market, MarketHistory};
use ets_random::SeededRandom;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::bootstrap::build_population;
use crate::config::SimulationConfig;
use crate::error::Result;

/// End-of-run state of one company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanySummary {
    pub agent_id: AgentId,
    pub allowance: f64,
    pub total_emission: f64,
    pub expected_deficit: i64,
    pub abatements: u32,
    pub abatement_spend: Price,
    pub expected_market_price: Price,
    pub state: TradingState,
}

impl CompanySummary {
    fn of(agent: &CompanyAgent) -> Self {
        Self {
            agent_id: agent.id(),
            allowance: agent.allowance(),
            total_emission: agent.total_emission(),
            expected_deficit: agent.expected_deficit(),
            abatements: agent.abatements(),
            abatement_spend: agent.abatement_spend(),
            expected_market_price: agent.expected_market_price(),
            state: agent.state(),
        }
    }

    /// Emitted more than it holds
    pub fn is_short(&self) -> bool {
        self.total_emission > self.allowance
    }
}

/// Simulation results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResults {
    /// Days simulated
    pub days: Day,
    pub total_trades: usize,
    pub total_volume: Quantity,
    pub final_market_price: Price,
    /// Abatement steps bought across all companies
    pub abatements: u32,
    pub companies: Vec<CompanySummary>,
    pub history: MarketHistory,
}

/// Full cap-and-trade simulation
pub struct Simulation {
    config: SimulationConfig,
    rng: SeededRandom,
    agents: Vec<CompanyAgent>,
    market: Market,
}

impl Simulation {
    /// Validate the configuration and build the companies and market
    pub fn new(config: SimulationConfig) -> Result<Self> {
        let mode = config.matching_mode()?;
        let mut rng = SeededRandom::from_seed_option(config.seed);
        let agents = build_population(&config, &mut rng)?;
        let market = Market::new(config.initial_market_price, mode);

        info!(
            "Simulation ready: {} companies, {} days, {} matching, seed {:?}",
            agents.len(),
            config.days,
            mode,
            config.seed
        );

        Ok(Self {
            config,
            rng,
            agents,
            market,
        })
    }

    /// Run a single day
    pub fn step(&mut self) -> Result<DayReport> {
        Ok(self.market.run_day(&mut self.agents, &mut self.rng)?)
    }

    /// Run the remaining configured days and collect the results
    pub fn run(mut self) -> Result<SimulationResults> {
        while self.market.day() < self.config.days {
            self.step()?;
        }

        let companies: Vec<CompanySummary> = self.agents.iter().map(CompanySummary::of).collect();
        self.report_negative_allowances(&companies);

        let history = self.market.into_history();
        let results = SimulationResults {
            days: self.config.days,
            total_trades: history.trades.len(),
            total_volume: history.total_volume(),
            final_market_price: history
                .last_price()
                .unwrap_or(self.config.initial_market_price),
            abatements: companies.iter().map(|company| company.abatements).sum(),
            companies,
            history,
        };

        info!(
            "Simulation finished after {} days: {} trades, volume {}, final price {}, {} abatements",
            results.days,
            results.total_trades,
            results.total_volume,
            results.final_market_price,
            results.abatements
        );

        Ok(results)
    }

    fn report_negative_allowances(&self, companies: &[CompanySummary]) {
        if !self.config.allow_negative_allowance {
            return;
        }
        for company in companies.iter().filter(|company| company.allowance < 0.0) {
            warn!(
                "{} ends with negative allowance {}",
                company.agent_id, company.allowance
            );
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn agents(&self) -> &[CompanyAgent] {
        &self.agents
    }

    pub fn market(&self) -> &Market {
        &self.market
    }

    /// Last completed day
    pub fn day(&self) -> Day {
        self.market.day()
    }
}
