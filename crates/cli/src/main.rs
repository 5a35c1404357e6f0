mod render;

use clap::Parser;
use colored::Colorize;
use render::{renderer_for, JsonRenderer, ReportRenderer};
use rr_core::engine::{ReportEngine, ReportOptions};
use rr_protocol::IngestLimits;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "runreport",
    version,
    about = "Aggregate experiment run directories into a metrics report"
)]
struct Cli {
    /// Run directory; repeat for multiple runs.
    #[arg(long = "run", required = true)]
    run: Vec<PathBuf>,

    /// Metric to report; repeat to set display order. Disables ranking.
    #[arg(long = "metric")]
    metric: Vec<String>,

    /// Baseline run for config overrides: 1-based index or run dir name.
    #[arg(long = "base-run")]
    base_run: Option<String>,

    /// Max files scanned per run directory.
    #[arg(long, default_value_t = IngestLimits::default().max_files)]
    max_files: usize,

    /// Max timeseries records read per file.
    #[arg(long, default_value_t = IngestLimits::default().max_records)]
    max_records: usize,

    /// Max points kept per series after downsampling.
    #[arg(long, default_value_t = IngestLimits::default().max_points)]
    max_points: usize,

    /// Max metrics selected for display.
    #[arg(long, default_value_t = IngestLimits::default().max_metrics)]
    max_metrics: usize,

    /// Max config file size in bytes.
    #[arg(long, default_value_t = IngestLimits::default().max_config_bytes)]
    max_config_bytes: u64,

    /// Max config keys selected for display.
    #[arg(long, default_value_t = IngestLimits::default().max_config_keys)]
    max_config_keys: usize,

    /// Max image candidates kept per run.
    #[arg(long, default_value_t = IngestLimits::default().max_images)]
    max_images: usize,

    /// Output file; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Output format: json or md.
    #[arg(long, default_value = "json")]
    format: String,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let options = ReportOptions {
        metrics: cli.metric,
        base_run: cli.base_run,
        limits: IngestLimits {
            max_files: cli.max_files,
            max_records: cli.max_records,
            max_points: cli.max_points,
            max_metrics: cli.max_metrics,
            max_config_bytes: cli.max_config_bytes,
            max_config_keys: cli.max_config_keys,
            max_images: cli.max_images,
        },
    };

    let report = ReportEngine::new(options).build_report(&cli.run)?;

    for run in &report.runs {
        for warning in &run.warnings {
            eprintln!("{} {}: {}", "warning".yellow().bold(), run.name, warning);
        }
    }

    let renderer: Box<dyn ReportRenderer> = match renderer_for(&cli.format) {
        Some(renderer) => renderer,
        None => {
            eprintln!(
                "{} unknown format '{}', falling back to json",
                "warning".yellow().bold(),
                cli.format
            );
            Box::new(JsonRenderer)
        }
    };
    let rendered = renderer.render(&report)?;

    match &cli.out {
        Some(path) => {
            fs::write(path, rendered)?;
            eprintln!("{} {}", "wrote".green().bold(), path.display());
        }
        None => print!("{rendered}"),
    }

    Ok(())
}
