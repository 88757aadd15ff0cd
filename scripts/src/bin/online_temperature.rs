//! One-step-ahead temperature forecasting with an exponential moving average.

use anyhow::{Context, Result};
use clap::Parser;
use mlearn::config::OnlineConfig;
use mlearn::online::{generate_temperature_data, ExponentialSmoothing, OnlineRun};
use mlearn::plot::{save_chart, LineChart, CRIMSON, STEEL_BLUE};
use mlearn_scripts::{init_logging, CommonArgs};

#[derive(Parser, Debug)]
struct Args {
    #[command(flatten)]
    common: CommonArgs,

    #[arg(long, default_value_t = 30)]
    days: usize,

    /// Smoothing factor.
    #[arg(long, default_value_t = 0.3)]
    alpha: f64,
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();
    let config = OnlineConfig::default()
        .days(args.days)
        .alpha(args.alpha)
        .seed(args.common.seed);

    println!("Simple Online Learning for Temperature Prediction\n");
    let temperatures = generate_temperature_data(config.days, config.noise, config.seed)?;
    let mut estimator = ExponentialSmoothing::new(config.alpha)?;
    let run = OnlineRun::replay(&mut estimator, &temperatures)?;

    println!("{:>4} {:>8} {:>10} {:>10} {:>10}", "Day", "Actual", "Predicted", "Error", "MAE");
    println!("{}", "-".repeat(60));
    for step in run.reported_steps() {
        println!(
            "{:4} {:8.2}°C {:9.2}°C {:9.2}°C {:9.2}°C",
            step.day, step.actual, step.predicted, step.error, step.running_mae
        );
    }

    let indexed = |values: &[f64]| -> Vec<(f64, f64)> {
        values.iter().enumerate().map(|(i, &v)| (i as f64, v)).collect()
    };
    let chart = LineChart::new(format!(
        "Simple Online Temperature Prediction (MAE: {:.2}°C)",
        run.mae
    ))
    .x_label("Day")
    .y_label("Temperature (°C)")
    .series("Actual", indexed(&run.actual), STEEL_BLUE)
    .series("Predicted", indexed(&run.predictions), CRIMSON)
    .footnote(format!("Using exponential moving average with α = {}", config.alpha));
    let path = args.common.chart_path("simple_temperature_prediction");
    save_chart(&chart, &path).with_context(|| format!("writing {}", path.display()))?;
    println!("\nResults saved to {}", path.display());

    let actual_last = run.actual.last().copied().unwrap_or(f64::NAN);
    println!("\nModel performance:");
    println!("Mean Absolute Error: {:.2}°C", run.mae);
    println!(
        "Final prediction: {:.2}°C (Actual: {actual_last:.2}°C)",
        run.last_prediction()
    );
    Ok(())
}
