use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use visa_stats::config::{
    DEFAULT_FUZZY_THRESHOLD, DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_DIR, DEFAULT_TOP_LIMIT,
    DEFAULT_TOP_YEAR,
};
use visa_stats::{PipelineConfig, RunSummary};

/// Clean, enrich, and chart Japan visa issuance statistics
#[derive(Parser, Debug)]
#[command(name = "visa-stats", version, about)]
struct Cli {
    /// Input CSV (with header row)
    #[arg(long, default_value = DEFAULT_INPUT_PATH)]
    input: PathBuf,

    /// Directory for the three charts and the cleaned CSV
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Minimum fuzzy score (0-100) for replacing a country name
    #[arg(long, default_value_t = DEFAULT_FUZZY_THRESHOLD, value_parser = clap::value_parser!(u8).range(0..=100))]
    threshold: u8,

    /// Year for the top-countries chart
    #[arg(long, default_value_t = DEFAULT_TOP_YEAR)]
    year: i32,

    /// Number of countries in the top-countries chart
    #[arg(long, default_value_t = DEFAULT_TOP_LIMIT)]
    top: usize,

    /// Local plotly.js to inline so the charts open offline (default: CDN)
    #[arg(long)]
    plotly_js: Option<PathBuf>,
}

impl From<Cli> for PipelineConfig {
    fn from(cli: Cli) -> Self {
        PipelineConfig::new(cli.input, cli.output_dir)
            .with_threshold(cli.threshold)
            .with_top(cli.year, cli.top)
            .with_plotly_js(cli.plotly_js)
    }
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "visa_stats=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = PipelineConfig::from(Cli::parse());
    report(visa_stats::run(&config))
}

/// Print the outcome once and map it to the process exit status
fn report(result: anyhow::Result<RunSummary>) -> ExitCode {
    match result {
        Ok(summary) => {
            println!("✅ Pipeline complete: {}", summary.summary());
            for path in &summary.outputs {
                println!("   {}", path.display());
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!("Pipeline failed: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags_reproduces_defaults() {
        let cli = Cli::parse_from(["visa-stats"]);
        assert_eq!(PipelineConfig::from(cli), PipelineConfig::default());
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from([
            "visa-stats",
            "--input",
            "data.csv",
            "--output-dir",
            "out",
            "--threshold",
            "90",
            "--year",
            "2016",
            "--top",
            "5",
            "--plotly-js",
            "vendor/plotly.min.js",
        ]);
        let config = PipelineConfig::from(cli);

        assert_eq!(config.input_path, PathBuf::from("data.csv"));
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.fuzzy_threshold, 90);
        assert_eq!(config.top_year, 2016);
        assert_eq!(config.top_limit, 5);
        assert_eq!(config.plotly_js, Some(PathBuf::from("vendor/plotly.min.js")));
    }

    #[test]
    fn test_failed_run_exits_with_failure() {
        let code = report(Err(anyhow::anyhow!("input missing")));
        assert_eq!(format!("{:?}", code), format!("{:?}", ExitCode::FAILURE));
    }

    #[test]
    fn test_threshold_out_of_range_is_rejected() {
        assert!(Cli::try_parse_from(["visa-stats", "--threshold", "101"]).is_err());
    }
}
