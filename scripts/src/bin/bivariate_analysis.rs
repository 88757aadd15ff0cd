//! Study hours vs exam score: correlation, regression scatter and a box plot
//! of scores per study-hour group.

use anyhow::{Context, Result};
use clap::Parser;
use mlearn::plot::{save_chart, BoxPlot, ScatterChart};
use mlearn::stats::{group_values, pearson_correlation, Summary};
use mlearn::synthetic::{study_groups, study_hours_vs_scores, STUDY_GROUP_LABELS};
use mlearn_scripts::{init_logging, CommonArgs};

#[derive(Parser, Debug)]
struct Args {
    #[command(flatten)]
    common: CommonArgs,

    /// Number of students.
    #[arg(long, default_value_t = 100)]
    samples: usize,
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let data = study_hours_vs_scores(args.samples, args.common.seed)?;
    let correlation = pearson_correlation(&data.x, &data.y).context("correlation is undefined")?;

    let scatter = ScatterChart::new("Study Hours vs Exam Score", data.x.clone(), data.y.clone())?
        .x_label("Study Hours")
        .y_label("Exam Score")
        .with_regression_line();
    let scatter_path = args.common.chart_path("study_hours_vs_scores");
    save_chart(&scatter, &scatter_path).with_context(|| format!("writing {}", scatter_path.display()))?;

    let (labels, scores): (Vec<&str>, Vec<f64>) = study_groups(&data.x)?
        .into_iter()
        .zip(&data.y)
        .filter_map(|(group, &score)| group.map(|g| (g, score)))
        .unzip();
    let groups = group_values(&labels, &scores, &STUDY_GROUP_LABELS);

    let boxplot = BoxPlot::new("Exam Score by Study Hours", groups.clone())
        .x_label("Study Hours")
        .y_label("Exam Score");
    let box_path = args.common.chart_path("study_groups_vs_scores");
    save_chart(&boxplot, &box_path).with_context(|| format!("writing {}", box_path.display()))?;

    println!("Correlation coefficient: {correlation:.2}");
    println!("\nScore summary by study group:");
    println!("{:<7} {}", "group", Summary::header());
    for (label, values) in &groups {
        match Summary::describe(values) {
            Some(summary) => println!("{label:<7} {summary}"),
            None => println!("{label:<7} {:>6}", 0),
        }
    }
    println!("\nCharts saved to {} and {}", scatter_path.display(), box_path.display());
    Ok(())
}
