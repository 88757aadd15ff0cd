//! Closed-form normal density at a single point, with the curve around it.

use anyhow::{Context, Result};
use clap::Parser;
use mlearn::distributions::{linspace, normal_pdf};
use mlearn::plot::{save_chart, LineChart, STEEL_BLUE};
use mlearn_scripts::{init_logging, CommonArgs};

#[derive(Parser, Debug)]
struct Args {
    #[command(flatten)]
    common: CommonArgs,

    /// Point at which to evaluate the density.
    #[arg(long, default_value_t = 180.0)]
    x: f64,

    #[arg(long, default_value_t = 170.0)]
    mean: f64,

    #[arg(long, default_value_t = 10.0)]
    std_dev: f64,
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();
    anyhow::ensure!(args.std_dev > 0.0, "std_dev must be positive, got {}", args.std_dev);

    let pdf_value = normal_pdf(args.x, args.mean, args.std_dev);
    println!("PDF at x = {}: {pdf_value:.4}", args.x);

    let curve = linspace(args.mean - 4.0 * args.std_dev, args.mean + 4.0 * args.std_dev, 100)
        .into_iter()
        .map(|x| (x, normal_pdf(x, args.mean, args.std_dev)))
        .collect();
    let chart = LineChart::new("Normal Distribution PDF")
        .x_label("x (e.g. Height in cm)")
        .y_label("Probability Density")
        .series("Normal PDF", curve, STEEL_BLUE)
        .vline(args.x, format!("x = {}", args.x))
        .marker((args.x, pdf_value), format!("pdf = {pdf_value:.4}"));
    let path = args.common.chart_path("normal_pdf");
    save_chart(&chart, &path).with_context(|| format!("writing {}", path.display()))?;

    println!("Chart saved to {}", path.display());
    Ok(())
}
