//! CLI entry point for the anxiety survey scorer.
//!
//! Provides subcommands for rendering the age-group chart and for printing
//! or saving the aggregated summary.

use anyhow::Result;
use anxiety_survey::analyzers::analyzer::analyze;
use anxiety_survey::output::{self, chart, svg};
use anxiety_survey::survey::BucketPolicy;
use clap::{Args, Parser, Subcommand};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "anxiety_survey")]
#[command(about = "Scores anxiety survey responses by age group", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct InputArgs {
    /// Survey CSV file (header row plus at least 43 columns per row)
    #[arg(value_name = "FILE", default_value = "anxiety_survey_canada_2020.csv")]
    input: PathBuf,

    /// Fold age groups outside 1..=6 into the last group instead of failing
    #[arg(long, default_value_t = false)]
    fold_unknown_groups: bool,
}

impl InputArgs {
    fn policy(&self) -> BucketPolicy {
        if self.fold_unknown_groups {
            BucketPolicy::FoldIntoLast
        } else {
            BucketPolicy::Strict
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Render the interactive age-group chart as HTML
    Chart {
        #[command(flatten)]
        input: InputArgs,

        /// HTML file to write the chart to
        #[arg(short, long, default_value = "anxiety_by_age.html")]
        output: PathBuf,

        /// Optional: also render a static SVG chart to this path
        #[arg(long)]
        svg: Option<PathBuf>,

        /// Optional: also write the JSON summary to this path
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Log the per-group summary, optionally saving it as JSON
    Summary {
        #[command(flatten)]
        input: InputArgs,

        /// JSON file to write the summary to (logged when omitted)
        #[arg(long)]
        json: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/anxiety_survey.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("anxiety_survey.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(env_filter("RUST_LOG", "info"));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(env_filter("RUST_LOG_JSON", "debug"));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Chart {
            input,
            output: html_path,
            svg: svg_path,
            json,
        } => {
            let aggregate = analyze(&input.input, input.policy())?;
            output::log_table(&aggregate);

            let figure = chart::build_figure(&aggregate);
            chart::write_html(&html_path, &figure)?;
            info!(path = %html_path.display(), "Chart written");

            if let Some(path) = svg_path {
                svg::write_svg(&path, &aggregate)?;
                info!(path = %path.display(), "SVG chart written");
            }
            if let Some(path) = json {
                output::write_json(&path, &aggregate)?;
                info!(path = %path.display(), "Summary written");
            }
        }
        Commands::Summary { input, json } => {
            let aggregate = analyze(&input.input, input.policy())?;
            output::log_table(&aggregate);

            match json {
                Some(path) => {
                    output::write_json(&path, &aggregate)?;
                    info!(path = %path.display(), "Summary written");
                }
                None => output::print_json(&aggregate)?,
            }
        }
    }

    Ok(())
}

/// Filter from the `var` environment variable, or `default` when it is unset
/// or invalid.
fn env_filter(var: &str, default: &str) -> EnvFilter {
    EnvFilter::try_from_env(var).unwrap_or_else(|_| EnvFilter::new(default))
}
