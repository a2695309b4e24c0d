//! 7-day per-category ridership forecast.

use anyhow::Context;
use clap::Parser;
use ridership_forecast::data::load_table;
use ridership_forecast::report::render_daily_table;
use ridership_forecast::runner::{run_daily, ForecastConfig};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "daily_forecast", about = "Forecast daily journeys per service category")]
struct Args {
    /// Path to the daily ridership CSV.
    input: PathBuf,

    /// Number of days to forecast.
    #[arg(long, default_value_t = 7)]
    horizon: usize,

    /// Leading observations to discard before fitting.
    #[arg(long, default_value_t = 100)]
    warm_up_skip: usize,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let table = load_table(&args.input)
        .with_context(|| format!("loading {}", args.input.display()))?;

    let mut config = ForecastConfig::daily();
    config.horizon = args.horizon;
    config.warm_up_skip = args.warm_up_skip;

    let report = run_daily(&table, &config).context("running daily forecasts")?;
    print!("{}", render_daily_table(&report));
    Ok(())
}
