//! Exploratory summary statistics for the daily ridership dataset.

use anyhow::Context;
use clap::Parser;
use ridership_forecast::analysis::{
    day_of_week_averages, monthly_averages, service_averages, summarize, weekday_month_pivot,
};
use ridership_forecast::data::{load_table, month_name, weekday_name};
use ridership_forecast::report::render_weekday_month_heatmap;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "summary_stats", about = "Summary statistics for daily ridership")]
struct Args {
    /// Path to the daily ridership CSV.
    input: PathBuf,

    /// Optional output path for the weekday-by-month heatmap PNG.
    #[arg(long)]
    heatmap: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let table = load_table(&args.input)
        .with_context(|| format!("loading {}", args.input.display()))?;
    let stats = summarize(&table).context("computing summary statistics")?;

    println!("Observations: {} days", table.len());
    println!();
    println!("Average weekday total: {:>12.0}", stats.weekday_avg);
    println!("Average weekend total: {:>12.0}", stats.weekend_avg);
    println!("Weekend drop:          {:>11.1}%", stats.weekend_drop_pct);
    println!();

    println!("Average total by day of week:");
    for (weekday, avg) in day_of_week_averages(&table) {
        println!("  {:<10}{:>12.0}", weekday_name(weekday), avg);
    }
    println!(
        "  Busiest: {} ({:.0}), quietest: {} ({:.0})",
        weekday_name(stats.busiest_day),
        stats.busiest_day_avg,
        weekday_name(stats.quietest_day),
        stats.quietest_day_avg,
    );
    println!();

    println!("Average daily total by month:");
    for (month, avg) in monthly_averages(&table) {
        println!("  {:<10}{:>12.0}", month_name(month), avg);
    }
    println!(
        "  Busiest: {} ({:.0}), quietest: {} ({:.0})",
        month_name(stats.busiest_month),
        stats.busiest_month_avg,
        month_name(stats.quietest_month),
        stats.quietest_month_avg,
    );
    println!();

    println!("Average daily journeys by service:");
    for (service, avg) in service_averages(&table) {
        println!("  {:<14}{:>12.0}", service.column_name(), avg);
    }
    println!();

    let pivot = weekday_month_pivot(&table);
    println!("Average daily total by weekday and month:");
    print!("  {:<11}", "");
    for &month in &pivot.months {
        print!("{:>10}", &month_name(month)[..3]);
    }
    println!();
    for (weekday, cells) in &pivot.rows {
        print!("  {:<11}", weekday_name(*weekday));
        for &cell in cells {
            if cell.is_finite() {
                print!("{:>10.0}", cell);
            } else {
                print!("{:>10}", "-");
            }
        }
        println!();
    }

    if let Some(path) = &args.heatmap {
        render_weekday_month_heatmap(&pivot, path).context("rendering heatmap")?;
        info!(path = %path.display(), "wrote heatmap");
    }
    Ok(())
}
