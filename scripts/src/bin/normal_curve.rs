//! Density of N(70, 10²) over μ ± 4σ.

use anyhow::{Context, Result};
use clap::Parser;
use mlearn::distributions::Normal;
use mlearn::plot::{save_chart, LineChart, STEEL_BLUE};
use mlearn_scripts::{init_logging, CommonArgs};

#[derive(Parser, Debug)]
struct Args {
    #[command(flatten)]
    common: CommonArgs,

    #[arg(long, default_value_t = 70.0)]
    mean: f64,

    #[arg(long, default_value_t = 10.0)]
    std_dev: f64,
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let normal = Normal::new(args.mean, args.std_dev)?;
    let chart = LineChart::new("Normal Distribution Curve")
        .x_label("Value")
        .y_label("Density")
        .series("Normal Distribution", normal.curve(4.0, 1000), STEEL_BLUE)
        .vline(normal.mean(), "Mean");
    let path = args.common.chart_path("normal_curve");
    save_chart(&chart, &path).with_context(|| format!("writing {}", path.display()))?;

    println!(
        "Peak density {:.4} at x = {}",
        normal.pdf(normal.mean()),
        normal.mean()
    );
    println!("Chart saved to {}", path.display());
    Ok(())
}
