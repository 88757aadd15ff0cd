//! Study method vs exam result: crosstab and stacked bar chart.

use anyhow::{Context, Result};
use clap::Parser;
use mlearn::plot::{save_chart, StackedBarChart, MINT, SALMON};
use mlearn::stats::crosstab;
use mlearn::synthetic::study_method_outcomes;
use mlearn_scripts::{init_logging, CommonArgs};

#[derive(Parser, Debug)]
struct Args {
    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let (methods, results) = study_method_outcomes();
    let table = crosstab(&methods, &results)?;

    let chart = StackedBarChart::from_table("Exam Results by Study Method", &table, &[SALMON, MINT])
        .x_label("Study Method")
        .y_label("Number of Students");
    let path = args.common.chart_path("study_method_vs_result");
    save_chart(&chart, &path).with_context(|| format!("writing {}", path.display()))?;

    println!("{table}");
    println!("Stacked bar chart saved as '{}'", path.display());
    Ok(())
}
