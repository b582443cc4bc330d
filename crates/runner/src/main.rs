use tradewire_runner::{RunnerConfig, run_session};

fn print_help() {
    eprintln!(
        r#"Tradewire Runner - scripted session against the simulated trading front

USAGE:
    tradewire-runner [OPTIONS]

OPTIONS:
    -c, --config <PATH>     Load configuration from JSON file
    -h, --help              Print this help message

ENVIRONMENT VARIABLES:
    RUST_LOG                Log level filter (default: info)

EXAMPLES:
    # Run with defaults
    tradewire-runner

    # Run with config file, debug logging
    RUST_LOG=debug tradewire-runner --config runner.json
"#
    );
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let mut config_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            "--config" | "-c" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --config requires a path argument");
                    std::process::exit(1);
                }
                config_path = Some(args[i].clone());
            }
            arg => {
                eprintln!("Unknown argument: {}", arg);
                print_help();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let config = match config_path {
        Some(path) => {
            log::info!("Loading configuration from: {}", path);
            RunnerConfig::from_file(&path)?
        }
        None => RunnerConfig::default(),
    };

    let report = run_session(&config).await?;

    println!("Trading day:      {}", report.trading_day);
    println!("Front/session:    {}/{}", report.front_id, report.session_id);
    println!("Orders placed:    {}", report.orders_placed);
    println!("Orders cancelled: {}", report.orders_cancelled);
    println!("Orders resting:   {}", report.orders_resting);
    println!("Trades:           {}", report.trades);
    for position in &report.positions {
        println!(
            "Position:         {} {:?} {}",
            position.instrument_id, position.direction, position.position
        );
    }
    println!("Balance:          {}", report.balance);
    if report.pending_at_exit > 0 {
        println!("Pending at exit:  {}", report.pending_at_exit);
    }

    Ok(())
}
