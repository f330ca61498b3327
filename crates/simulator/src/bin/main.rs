//! Prisoners-problem simulator CLI.
//!
//! Runs repeated simulations of the 100 prisoners problem and prints
//! cumulative statistics across runs.

use clap::Parser;
use parole_simulation::SimulationConfig;
use parole_simulator::{Campaign, LogRenderSink};

#[derive(Parser)]
#[command(name = "parole-sim")]
#[command(about = "Repeated-run simulator for the 100 prisoners problem")]
#[command(version)]
struct Cli {
    /// Number of prisoners (and drawers)
    #[arg(long, default_value = "100")]
    prisoners: usize,

    /// Strategy: optimal or random
    #[arg(long, default_value = "optimal")]
    strategy: String,

    /// Number of runs
    #[arg(long, default_value = "1000")]
    runs: u64,

    /// Delay between ticks (e.g. "5ms"); zero runs as fast as possible
    #[arg(long, default_value = "0ms")]
    delay: humantime::Duration,

    /// Seed for a reproducible campaign (each run derives its own)
    #[arg(long)]
    seed: Option<u64>,

    /// Log every rendered frame at debug level
    #[arg(long)]
    log_frames: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let mut config = SimulationConfig::from_name(cli.prisoners, &cli.strategy)?;
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    config.controls().set_delay(*cli.delay);

    let campaign = Campaign::new(config, cli.runs);
    let report = if cli.log_frames {
        campaign.run_with(|| Box::new(LogRenderSink)).await
    } else {
        campaign.run().await
    };
    report.print();

    Ok(())
}
