//! Product category vs sales: box plot with jittered points and means.

use anyhow::{Context, Result};
use clap::Parser;
use mlearn::plot::{save_chart, BoxPlot};
use mlearn::stats::{group_values, BoxStats, Summary};
use mlearn::synthetic::{category_sales, SALES_CATEGORIES};
use mlearn_scripts::{init_logging, CommonArgs};

#[derive(Parser, Debug)]
struct Args {
    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let sales = category_sales(args.common.seed)?;
    let groups = group_values(&sales.labels, &sales.values, &SALES_CATEGORIES);

    let chart = BoxPlot::new("Sales Distribution by Product Category", groups.clone())
        .x_label("Product Category")
        .y_label("Sales ($)")
        .with_means()
        .with_jitter(args.common.seed);
    let path = args.common.chart_path("category_vs_sales");
    save_chart(&chart, &path).with_context(|| format!("writing {}", path.display()))?;

    println!("{:<12} {}", "category", Summary::header());
    for (category, values) in &groups {
        let summary = Summary::describe(values).context("empty category")?;
        println!("{category:<12} {summary}");
    }
    for (category, values) in &groups {
        if let Some(stats) = BoxStats::from_data(values) {
            if !stats.outliers.is_empty() {
                println!("{category}: {} outliers", stats.outliers.len());
            }
        }
    }
    println!("Box plot saved as '{}'", path.display());
    Ok(())
}
