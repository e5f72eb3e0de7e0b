//! CLI entry point for the student record rater.
//!
//! Provides subcommands for running the metric analysis over a roster CSV
//! and for exporting flattened chart data for the plotting scripts.

use anyhow::{Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use student_record_rater::metrics::engine::analyze_roster;
use student_record_rater::metrics::types::AnalysisConfig;
use student_record_rater::output::{print_json, print_pretty, write_json, write_report};
use student_record_rater::parser::load_roster;
use student_record_rater::plotdata::{
    SeriesKind, average_gpa_by_term, series, series_mean, units_vs_gpa,
};
use student_record_rater::roster::QuarterCode;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "student_record_rater")]
#[command(about = "A tool to analyze student quarterly academic records", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute per-student metrics over a roster CSV and write the report
    Analyze {
        /// Path to the roster CSV
        #[arg(value_name = "ROSTER_CSV")]
        input: PathBuf,

        /// CSV file to write the report to
        #[arg(short, long, default_value = "csv_analysis.csv")]
        output: PathBuf,

        /// Units required for the degree
        #[arg(long, default_value_t = 180)]
        required_units: u32,

        /// Per-quarter unit target used for pacing and on-track checks
        #[arg(long, default_value_t = 16)]
        units_per_quarter: u32,

        /// Also log the report as pretty JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Export flattened chart data for the plotting scripts
    PlotData {
        /// Path to the roster CSV
        #[arg(value_name = "ROSTER_CSV")]
        input: PathBuf,

        /// Which chart series to export
        #[arg(short, long, value_enum, default_value = "gpa")]
        series: SeriesArg,

        /// Restrict to one quarter type (WQ, SQ, or FQ); omit for all quarters
        #[arg(short, long)]
        quarter: Option<String>,

        /// JSON file to write the series to
        #[arg(short, long, default_value = "chart_data.json")]
        output: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SeriesArg {
    /// All-student GPA observations plus the cohort average
    Gpa,
    /// All-student CS GPA observations
    CsGpa,
    /// (cs_units, gpa) scatter points
    GpaVsCsUnits,
    /// (total_units, gpa) scatter points
    GpaVsTotalUnits,
    /// Average GPA per term, chronological
    AvgOverTime,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/student_record_rater.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("student_record_rater.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            input,
            output,
            required_units,
            units_per_quarter,
            json,
        } => {
            let roster = load_roster(&input)?;
            let cfg = AnalysisConfig {
                required_units,
                units_per_quarter,
            };

            let reports = analyze_roster(&roster, &cfg);
            print_pretty(&reports);
            if json {
                print_json(&reports)?;
            }
            write_report(&output, &reports)?;

            info!(
                input = %input.display(),
                output = %output.display(),
                students = reports.len(),
                "Analysis complete"
            );
        }
        Commands::PlotData {
            input,
            series: series_arg,
            quarter,
            output,
        } => {
            let roster = load_roster(&input)?;
            let quarter = parse_quarter(quarter.as_deref())?;

            match series_arg {
                SeriesArg::Gpa => {
                    let values = series(&roster, SeriesKind::OverallGpa, quarter);
                    let average = series_mean(&roster, SeriesKind::OverallGpa, quarter);
                    write_json(&output, &json!({ "values": values, "average_gpa": average }))?;
                }
                SeriesArg::CsGpa => {
                    let values = series(&roster, SeriesKind::CsGpa, quarter);
                    write_json(&output, &values)?;
                }
                SeriesArg::GpaVsCsUnits => {
                    let points = units_vs_gpa(&roster, SeriesKind::CsUnits, quarter);
                    write_json(&output, &points)?;
                }
                SeriesArg::GpaVsTotalUnits => {
                    let points = units_vs_gpa(&roster, SeriesKind::TotalUnits, quarter);
                    write_json(&output, &points)?;
                }
                SeriesArg::AvgOverTime => {
                    let averages = average_gpa_by_term(&roster);
                    write_json(&output, &averages)?;
                }
            }

            info!(
                input = %input.display(),
                output = %output.display(),
                "Chart data export complete"
            );
        }
    }

    Ok(())
}

fn parse_quarter(label: Option<&str>) -> Result<Option<QuarterCode>> {
    match label {
        None => Ok(None),
        Some(l) => match QuarterCode::from_label(l) {
            Some(q) => Ok(Some(q)),
            None => bail!("unknown quarter {l:?}, expected WQ, SQ, or FQ"),
        },
    }
}
