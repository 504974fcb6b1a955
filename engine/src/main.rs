// `cashflow` binary: runs the engine on a CSV file and prints the JSON response.
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use engine::config::EngineSettings;
use engine::data::UploadedFile;
use engine::exit_code_for_status;
use engine::services::{into_http_parts, ScheduleService};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "cashflow", version, about = "Savings schedule and statistics from monthly income/expense CSVs")]
struct Cli {
    /// JSON settings file (falls back to $CASHFLOW_CONFIG, then built-in defaults)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Running-balance schedule plus trend and descriptive statistics
    Schedule {
        /// Monthly CSV with Month, Date, Total Income and Fixed Expenses columns
        csv: PathBuf,
    },

    /// Season-aware repayment plan derived from the income history
    Plan {
        csv: PathBuf,

        #[arg(long)]
        total_amount: f64,

        #[arg(long)]
        term_months: u32,

        /// First payment date, YYYY-MM-DD (default: today)
        #[arg(long)]
        start: Option<NaiveDate>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:#}", err);
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let settings = EngineSettings::resolve(cli.config.as_deref())?;
    init_tracing(&settings.log_filter);

    let service = ScheduleService::new(settings);
    let (status, body) = match cli.command {
        Command::Schedule { csv } => {
            let upload = read_upload(&csv)?;
            into_http_parts(&service.generate_schedule(Some(&upload)))
        }
        Command::Plan {
            csv,
            total_amount,
            term_months,
            start,
        } => {
            let upload = read_upload(&csv)?;
            let start = start.unwrap_or_else(|| Local::now().date_naive());
            into_http_parts(&service.plan_repayment(Some(&upload), total_amount, term_months, start))
        }
    };

    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&body)?
    } else {
        serde_json::to_string(&body)?
    };
    println!("{}", rendered);

    Ok(ExitCode::from(exit_code_for_status(status)))
}

fn read_upload(path: &Path) -> Result<UploadedFile> {
    UploadedFile::from_path(path).with_context(|| format!("Failed to open CSV file '{}'", path.display()))
}

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    // Logs go to stderr so stdout only carries JSON.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
