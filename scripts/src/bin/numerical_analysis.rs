//! Years of experience vs salary: scatter with regression and mean lines.

use anyhow::{Context, Result};
use clap::Parser;
use mlearn::plot::{save_chart, ScatterChart};
use mlearn::stats::pearson_correlation;
use mlearn::synthetic::experience_vs_salary;
use mlearn_scripts::{init_logging, CommonArgs};

#[derive(Parser, Debug)]
struct Args {
    #[command(flatten)]
    common: CommonArgs,

    /// Number of employees.
    #[arg(long, default_value_t = 100)]
    samples: usize,
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let data = experience_vs_salary(args.samples, args.common.seed)?;
    let correlation = pearson_correlation(&data.x, &data.y).context("correlation is undefined")?;

    let chart = ScatterChart::new("Years of Experience vs Salary", data.x, data.y)?
        .x_label("Years of Experience")
        .y_label("Annual Salary ($)")
        .with_regression_line()
        .with_mean_lines()
        .annotation(format!("Correlation: {correlation:.2}"));
    let path = args.common.chart_path("exp_vs_salary");
    save_chart(&chart, &path).with_context(|| format!("writing {}", path.display()))?;

    println!("Scatter plot saved as '{}'", path.display());
    println!("Correlation coefficient: {correlation:.3}");
    Ok(())
}
