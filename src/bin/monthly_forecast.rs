//! 12-month forecast of aggregated total journeys, with confidence intervals
//! and a rendered chart.

use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;
use ridership_forecast::data::load_table;
use ridership_forecast::report::render_monthly_chart;
use ridership_forecast::runner::{forecast_total_with_interval, ForecastConfig};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "monthly_forecast", about = "Forecast monthly total journeys")]
struct Args {
    /// Path to the daily ridership CSV.
    input: PathBuf,

    /// Number of months to forecast.
    #[arg(long, default_value_t = 12)]
    horizon: usize,

    /// Output path for the forecast chart.
    #[arg(long, default_value = "monthly_forecast.png")]
    output: PathBuf,

    /// Date whose total is replaced by the same-weekday average before
    /// aggregation (ISO format).
    #[arg(long, default_value = "2024-09-29")]
    impute_date: NaiveDate,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let mut table = load_table(&args.input)
        .with_context(|| format!("loading {}", args.input.display()))?;

    match table.impute_total_anomaly(args.impute_date) {
        Some(value) => info!(date = %args.impute_date, value, "replaced anomalous total"),
        None => info!(date = %args.impute_date, "no anomaly imputation applied"),
    }

    let monthly = table.monthly_totals().context("aggregating monthly totals")?;

    let mut config = ForecastConfig::monthly();
    config.horizon = args.horizon;

    let forecast = forecast_total_with_interval(&monthly, &config)
        .context("fitting the monthly model")?;

    println!("{}", forecast.summary);
    println!("{:<12}{:>14}{:>14}{:>14}", "Month", "Forecast", "Lower 95%", "Upper 95%");
    for (i, date) in forecast.dates.iter().enumerate() {
        println!(
            "{:<12}{:>14.0}{:>14.0}{:>14.0}",
            date.format("%Y-%m").to_string(),
            forecast.mean[i],
            forecast.lower[i],
            forecast.upper[i],
        );
    }

    render_monthly_chart(&monthly, &forecast, &args.output).context("rendering chart")?;
    info!(path = %args.output.display(), "wrote forecast chart");
    Ok(())
}
