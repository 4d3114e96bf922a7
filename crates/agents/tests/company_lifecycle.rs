//! Company lifecycle tests
//!
//! Drive seeded companies through whole simulated years without a market
//! and check the invariants that must hold whatever the random draws.

use ets_agents::{CompanyAgent, CompanyConfig};
use ets_core::{DAYS_PER_YEAR, TradingState};
use ets_ports::Trader;
use ets_random::SeededRandom;
use rust_decimal_macros::dec;

const SEED: u64 = 7;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn short_company() -> CompanyConfig {
    CompanyConfig::new(1200.0, 900.0, dec!(15), dec!(60))
}

fn long_company() -> CompanyConfig {
    CompanyConfig::new(600.0, 900.0, dec!(15), dec!(60))
}

/// Run a company for a year with every order left unfilled
fn run_unfilled_year(agent: &mut CompanyAgent, rng: &mut SeededRandom) {
    for _ in 0..DAYS_PER_YEAR {
        agent.daily_update(dec!(30), rng);
        match agent.state() {
            TradingState::Buy => agent.failed_buy(),
            TradingState::Sell => agent.failed_sell(),
            TradingState::Idle => {}
        }
    }
}

// ============================================================================
// Invariants
// ============================================================================

#[test]
fn test_daily_invariants_hold_for_a_year() {
    init_logging();
    let mut rng = SeededRandom::new(SEED);
    let configs = [
        short_company(),
        long_company(),
        short_company().with_advanced_trading(true),
        long_company().with_advanced_trading(true),
        short_company().with_abatement(false),
    ];

    for (index, config) in configs.into_iter().enumerate() {
        let mut agent = CompanyAgent::new(index, config, &mut rng);
        assert!(agent.abatement_curve().is_monotone());

        for _ in 0..DAYS_PER_YEAR {
            agent.daily_update(dec!(30), &mut rng);

            assert!(agent.emission_rate() >= 0.0);
            assert!(agent.abatement_curve().is_monotone());
            if agent.state().is_idle() {
                assert_eq!(agent.count(), 0, "{} idle with open count", agent.id());
            } else {
                assert!(agent.count() > 0, "{} trading nothing", agent.id());
            }
        }
        assert_eq!(agent.day(), DAYS_PER_YEAR + 1);
    }
}

#[test]
fn test_unfilled_buyer_converges_to_price_cap() {
    init_logging();
    let mut rng = SeededRandom::new(SEED);
    let mut agent =
        CompanyAgent::new(0, short_company().with_abatement(false), &mut rng);

    run_unfilled_year(&mut agent, &mut rng);

    assert_eq!(agent.state(), TradingState::Buy);
    assert_eq!(agent.expected_market_price(), agent.max_buy_price());
    assert_eq!(agent.trade_price(), dec!(60));
}

#[test]
fn test_unfilled_seller_converges_to_price_floor() {
    init_logging();
    let mut rng = SeededRandom::new(SEED);
    let mut agent = CompanyAgent::new(0, long_company(), &mut rng);

    run_unfilled_year(&mut agent, &mut rng);

    assert_eq!(agent.state(), TradingState::Sell);
    assert_eq!(agent.expected_market_price(), agent.min_sell_price());
    assert_eq!(agent.trade_price(), dec!(15));
}

#[test]
fn test_total_emission_tracks_daily_rates() {
    let mut rng = SeededRandom::new(SEED);
    let mut agent = CompanyAgent::new(0, long_company(), &mut rng);

    let mut summed = 0.0;
    for _ in 0..30 {
        agent.daily_update(dec!(30), &mut rng);
        summed += agent.emission_rate();
    }

    assert!((agent.total_emission() - summed).abs() < 1e-9);
    assert_eq!(agent.emissions().trailing().len(), 30);
}

// ============================================================================
// Trading callbacks
// ============================================================================

#[test]
fn test_pairwise_trade_conserves_allowance() {
    let mut rng = SeededRandom::new(SEED);
    let mut buyer = CompanyAgent::new(0, short_company().with_abatement(false), &mut rng);
    let mut seller = CompanyAgent::new(1, long_company(), &mut rng);

    buyer.daily_update(dec!(30), &mut rng);
    seller.daily_update(dec!(30), &mut rng);
    assert_eq!(buyer.state(), TradingState::Buy);
    assert_eq!(seller.state(), TradingState::Sell);

    let before = buyer.allowance() + seller.allowance();
    let amount = buyer.count().min(seller.count());
    buyer.buy_allowance(amount);
    seller.sell_allowance(amount);

    assert_eq!(buyer.allowance() + seller.allowance(), before);
    assert_eq!(buyer.buy_counter(), amount as i64);
    assert_eq!(seller.sale_counter(), amount as i64);
}

#[test]
fn test_full_fill_raises_seller_expectation() {
    let mut rng = SeededRandom::new(SEED);
    let mut seller = CompanyAgent::new(0, long_company(), &mut rng);

    seller.daily_update(dec!(30), &mut rng);
    let expected = seller.expected_market_price();
    seller.sell_allowance(seller.count());
    seller.daily_update(dec!(30), &mut rng);

    assert_eq!(seller.expected_market_price(), expected + dec!(1));
}

// ============================================================================
// Determinism and configuration
// ============================================================================

#[test]
fn test_same_seed_same_trajectory() {
    let trajectory = |seed: u64| {
        let mut rng = SeededRandom::new(seed);
        let mut agent = CompanyAgent::new(0, short_company(), &mut rng);
        let mut states = Vec::new();
        for _ in 0..60 {
            agent.daily_update(dec!(30), &mut rng);
            states.push((agent.state(), agent.count(), agent.expected_deficit()));
        }
        (states, agent.abatements(), agent.total_emission())
    };

    assert_eq!(trajectory(SEED), trajectory(SEED));
}

#[test]
fn test_company_from_json_config() {
    let json = r#"{
        "expected_emission": 730,
        "initial_allowance": 700,
        "min_sell_price": "10",
        "max_buy_price": "30",
        "advanced_trading_enabled": true
    }"#;
    let config: CompanyConfig = serde_json::from_str(json).unwrap();
    assert!(config.validate(0, false).is_ok());
    assert_eq!(config.emission_rate_noise, 0.01);
    assert!(config.abatement_enabled);

    let mut rng = SeededRandom::new(SEED);
    let agent = CompanyAgent::new(3, config, &mut rng);
    assert_eq!(agent.expected_market_price(), dec!(20));
    assert_eq!(agent.expected_deficit(), 30);
    assert!(!agent.abatement_costs().is_empty());
}
