//! Exam score per study method for the fixed ten-student table.

use anyhow::{Context, Result};
use clap::Parser;
use mlearn::plot::{save_chart, BoxPlot};
use mlearn::stats::{group_values, mean};
use mlearn::synthetic::{study_method_scores, STUDY_METHODS};
use mlearn_scripts::{init_logging, CommonArgs};

#[derive(Parser, Debug)]
struct Args {
    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let scores = study_method_scores();
    let groups = group_values(&scores.labels, &scores.values, &STUDY_METHODS);

    let chart = BoxPlot::new("Exam Performance by Study Method", groups.clone())
        .x_label("Study Method")
        .y_label("Exam Score")
        .with_means();
    let path = args.common.chart_path("study_method_vs_scores");
    save_chart(&chart, &path).with_context(|| format!("writing {}", path.display()))?;

    for (method, values) in &groups {
        let m = mean(values).with_context(|| format!("no scores for {method}"))?;
        println!("{method:<11} mean {m:.2} ({} students)", values.len());
    }
    println!("Box plot saved as '{}'", path.display());
    Ok(())
}
