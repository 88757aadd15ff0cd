//! Batch house-price workflow: generate data, train, predict.

use anyhow::{Context, Result};
use clap::Parser;
use mlearn::config::PipelineConfig;
use mlearn::pipeline::run_pipeline;
use mlearn_scripts::{init_logging, CommonArgs};
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    #[command(flatten)]
    common: CommonArgs,

    /// JSON file overriding the pipeline defaults.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => PipelineConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => PipelineConfig::default()
            .seed(args.common.seed)
            .plot_format(args.common.plot_format()),
    }
    .with_root(&args.common.output_dir);

    println!("=== Batch Processing ML Example ===\n");
    let run = run_pipeline(&config).context("batch pipeline failed")?;

    if run.generated {
        println!("Generated {} samples in {}", config.n_samples, run.dataset_path.display());
    }

    let training = &run.training;
    println!("\n=== Starting Batch Training ===");
    println!(
        "Trained on {} rows, evaluated on {}",
        training.train_rows, training.test_rows
    );
    println!(
        "Trained model with MSE: {:.2}, R²: {:.4}",
        training.metrics.mse, training.metrics.r_squared
    );
    for (name, weight) in &training.coefficients {
        println!("  {name:<10} {weight:>12.4}");
    }
    println!("  {:<10} {:>12.4}", "intercept", training.bias);
    println!("Model saved to {}", training.model_path.display());
    if let Some(chart) = &training.chart_path {
        println!("Feature importance plot saved to {}", chart.display());
    }
    for old in &training.pruned {
        println!("Removed old model {}", old.display());
    }

    println!("\n=== Making Predictions ===");
    println!("Predictions made for new houses:");
    print!("{}", run.predictions);
    println!("Predictions saved to {}", run.predictions.path.display());

    println!("\n=== Batch Processing Complete ===");
    Ok(())
}
