//! CLI entry point for the student performance tracker.
//!
//! Loads attendance and grades from CSV, then prints recaps, writes
//! Markdown/HTML reports or exports the recap. `menu` starts an interactive
//! session on an empty registry.

mod menu;
mod table;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use student_tracker::grading::GradingPolicy;
use student_tracker::ingest::bootstrap_from_csv;
use student_tracker::output::{recap_json, save_text, write_recap_csv};
use student_tracker::report::{build_html_report, build_markdown_report};
use student_tracker::{RecapRow, Registry};
use tracing::{debug, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "student_tracker")]
#[command(about = "Track attendance and grades, and build class reports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the recap of every student
    Recap {
        #[command(flatten)]
        data: DataArgs,
    },
    /// Print students whose final score is below the remedial threshold
    Remedial {
        #[command(flatten)]
        data: DataArgs,
    },
    /// Render the recap as a Markdown or HTML report
    Report {
        #[command(flatten)]
        data: DataArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = ReportFormat::Markdown)]
        format: ReportFormat,

        /// Output path (defaults to out/report.md or out/report.html)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Only include remedial students
        #[arg(long, default_value_t = false)]
        remedial: bool,
    },
    /// Export the recap as CSV or JSON
    Export {
        #[command(flatten)]
        data: DataArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,

        /// Output path (defaults to out/recap.csv or out/recap.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Start the interactive menu
    Menu {
        /// Grading policy JSON file (falls back to $TRACKER_POLICY)
        #[arg(long)]
        policy: Option<PathBuf>,
    },
}

#[derive(Args)]
struct DataArgs {
    /// Attendance CSV (student_id, name, week1..weekN)
    #[arg(short, long, default_value = "data/attendance.csv")]
    attendance: PathBuf,

    /// Grades CSV (student_id, quiz, assignment, mid, final)
    #[arg(short, long, default_value = "data/grades.csv")]
    grades: PathBuf,

    /// Grading policy JSON file (falls back to $TRACKER_POLICY)
    #[arg(long)]
    policy: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum ReportFormat {
    Markdown,
    Html,
}

impl ReportFormat {
    fn file_name(self) -> &'static str {
        match self {
            ReportFormat::Markdown => "report.md",
            ReportFormat::Html => "report.html",
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportFormat {
    Csv,
    Json,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/student_tracker.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("student_tracker.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Recap { data } => {
            let registry = load_registry(&data)?;
            let rows: Vec<RecapRow> = registry.recap().collect();
            println!("{}", table::format_recap("Student Performance Recap", &rows));
            let summary = registry.class_summary();
            info!(
                students = summary.students,
                mean_final_score = summary.mean_final_score,
                remedial = summary.remedial,
                "Class summary"
            );
        }
        Commands::Remedial { data } => {
            let registry = load_registry(&data)?;
            let rows: Vec<RecapRow> = registry.remedial().collect();
            let title = format!(
                "Remedial Students (final score < {})",
                registry.policy().remedial_below
            );
            println!("{}", table::format_recap(&title, &rows));
        }
        Commands::Report {
            data,
            format,
            output,
            remedial,
        } => {
            let registry = load_registry(&data)?;
            let rows: Vec<RecapRow> = if remedial {
                registry.remedial().collect()
            } else {
                registry.recap().collect()
            };
            let path = write_report(&rows, format, output)?;
            println!("Report saved to {}", path.display());
        }
        Commands::Export {
            data,
            format,
            output,
        } => {
            let registry = load_registry(&data)?;
            let rows: Vec<RecapRow> = registry.recap().collect();
            match format {
                ExportFormat::Csv => {
                    let path = output.unwrap_or_else(|| PathBuf::from("out/recap.csv"));
                    write_recap_csv(&path, &rows)?;
                }
                ExportFormat::Json => {
                    let path = output.unwrap_or_else(|| PathBuf::from("out/recap.json"));
                    save_text(&path, &recap_json(&rows)?)?;
                }
            }
        }
        Commands::Menu { policy } => {
            let registry = Registry::with_policy(resolve_policy(policy)?)?;
            menu::run(registry)?;
        }
    }

    Ok(())
}

/// Picks the policy file from the flag, then `$TRACKER_POLICY`, else the built-in default.
fn resolve_policy(flag: Option<PathBuf>) -> Result<GradingPolicy> {
    let path = flag.or_else(|| std::env::var_os("TRACKER_POLICY").map(PathBuf::from));
    match path {
        Some(path) => GradingPolicy::load(&path)
            .with_context(|| format!("Failed to load grading policy from {}", path.display())),
        None => {
            debug!("Using default grading policy");
            Ok(GradingPolicy::default())
        }
    }
}

fn load_registry(data: &DataArgs) -> Result<Registry> {
    let mut registry = Registry::with_policy(resolve_policy(data.policy.clone())?)?;
    bootstrap_from_csv(&mut registry, &data.attendance, &data.grades)
        .context("Failed to load CSV data")?;
    Ok(registry)
}

/// Renders and saves a report, refusing to write one without any rows.
/// Returns the path written; without `output` the report goes under `out/`.
fn write_report(
    rows: &[RecapRow],
    format: ReportFormat,
    output: Option<PathBuf>,
) -> Result<PathBuf> {
    if rows.is_empty() {
        anyhow::bail!("No data to report");
    }

    let content = match format {
        ReportFormat::Markdown => build_markdown_report(rows),
        ReportFormat::Html => build_html_report(rows),
    };
    let path = output.unwrap_or_else(|| Path::new("out").join(format.file_name()));
    save_text(&path, &content)?;
    Ok(path)
}
