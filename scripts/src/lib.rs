//! Shared command-line plumbing for the tutorial programs.

use clap::Args;
use mlearn::config::PlotFormat;
use mlearn::random::DEFAULT_SEED;
use std::path::PathBuf;

/// Flags every program accepts.
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Directory that receives charts and other artifacts.
    #[arg(long, default_value = "output")]
    pub output_dir: PathBuf,

    /// Seed for the synthetic data.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Write charts as PNG instead of SVG.
    #[arg(long)]
    pub png: bool,
}

impl CommonArgs {
    pub fn plot_format(&self) -> PlotFormat {
        if self.png {
            PlotFormat::Png
        } else {
            PlotFormat::Svg
        }
    }

    /// `<output_dir>/<stem>.<svg|png>`
    pub fn chart_path(&self, stem: &str) -> PathBuf {
        self.output_dir
            .join(format!("{stem}.{}", self.plot_format().extension()))
    }
}

/// Installs `env_logger`, defaulting to `info` when `RUST_LOG` is unset.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Cli {
        #[command(flatten)]
        common: CommonArgs,
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["prog"]);
        assert_eq!(cli.common.seed, 42);
        assert_eq!(cli.common.chart_path("x"), PathBuf::from("output/x.svg"));
    }

    #[test]
    fn test_png_flag() {
        let cli = Cli::parse_from(["prog", "--png", "--output-dir", "out", "--seed", "7"]);
        assert_eq!(cli.common.seed, 7);
        assert_eq!(cli.common.chart_path("x"), PathBuf::from("out/x.png"));
    }
}
