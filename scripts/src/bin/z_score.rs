//! Z-score, percentile and outlier report for a class of students.

use anyhow::{Context, Result};
use clap::Parser;
use mlearn::plot::{save_chart, HistogramChart};
use mlearn::stats::{ZScoreReport, OUTLIER_THRESHOLD};
use mlearn::synthetic::STUDENT_SCORES;
use mlearn_scripts::{init_logging, CommonArgs};

#[derive(Parser, Debug)]
struct Args {
    #[command(flatten)]
    common: CommonArgs,

    /// Histogram bins.
    #[arg(long, default_value_t = 5)]
    bins: usize,
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let report = ZScoreReport::from_scores(&STUDENT_SCORES)?;

    println!("\nStudent Z-Score Report");
    println!("{}", "-".repeat(50));
    print!("{report}");
    println!("\nSummary Statistics:");
    println!("Mean Score: {:.2}", report.mean);
    println!("Standard Deviation: {:.2}", report.std_dev);
    println!("\nNote: Outliers are marked where |Z-score| > {OUTLIER_THRESHOLD}");

    let scores = report.records.iter().map(|r| r.score).collect();
    let chart = HistogramChart::new("Distribution of Student Scores", scores, args.bins)
        .x_label("Score")
        .y_label("Count")
        .with_mean_line()
        .with_density_curve();
    let path = args.common.chart_path("student_scores");
    save_chart(&chart, &path).with_context(|| format!("writing {}", path.display()))?;
    println!("Histogram saved to {}", path.display());
    Ok(())
}
