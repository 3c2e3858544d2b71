use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use twinopt::{init_tracing, optimize_with_deadline, OptimizerConfig, QuantumOptimizer};

/// Run one optimization request and print the normalized result as JSON.
#[derive(Debug, Parser)]
#[command(name = "twinopt", version, about)]
struct Cli {
    /// Problem kind: `hospital` or `warehouse`
    kind: String,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Skip the specialized solver and always simulate
    #[arg(long)]
    simulate: bool,

    /// Give up after this many milliseconds
    #[arg(long, default_value_t = 30_000)]
    deadline_ms: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => OptimizerConfig::load(path)?,
        None => OptimizerConfig::new(),
    };
    if let Some(seed) = cli.seed {
        config = config.with_random_seed(seed);
    }
    if cli.simulate {
        config = config.with_quantum(false);
    }

    let optimizer = Arc::new(QuantumOptimizer::new(config)?);
    let result =
        optimize_with_deadline(optimizer, cli.kind, Duration::from_millis(cli.deadline_ms)).await?;

    println!("{}", result.to_json()?);
    Ok(())
}
