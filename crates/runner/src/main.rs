use ets_runner::{HistoryExport, Simulation, SimulationConfig};

fn print_help() {
    eprintln!(
        r#"ETS Simulator - cap-and-trade allowance market

USAGE:
    ets-sim <CONFIG> [HISTORY]

ARGS:
    <CONFIG>     JSON simulation configuration
    [HISTORY]    Write the dated market history to this JSON file

OPTIONS:
    --help       Print this help message

ENVIRONMENT VARIABLES:
    RUST_LOG     Log level filter (default: info)

EXAMPLES:
    # Run a configured year
    ets-sim config.json

    # Run and keep the history for plotting
    RUST_LOG=debug ets-sim config.json history.json
"#
    );
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        log::error!("Simulation failed: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        print_help();
        return Ok(());
    }

    let (config_path, history_path) = match args.as_slice() {
        [config] => (config, None),
        [config, history] => (config, Some(history)),
        _ => {
            print_help();
            std::process::exit(1);
        }
    };

    log::info!("Loading configuration from: {}", config_path);
    let config = SimulationConfig::from_file(config_path)?;
    let start_date = config.start_date;

    let results = Simulation::new(config)?.run()?;

    let short = results
        .companies
        .iter()
        .filter(|company| company.is_short())
        .count();
    log::info!("Companies: {} ({} short at year end)", results.companies.len(), short);
    log::info!("Trades: {}", results.total_trades);
    log::info!("Volume: {}", results.total_volume);
    log::info!("Final market price: {}", results.final_market_price);
    log::info!("Abatements: {}", results.abatements);

    if let Some(path) = history_path {
        HistoryExport::new(&results.history, start_date).write_to(path)?;
        log::info!("History written to: {}", path);
    }

    Ok(())
}
