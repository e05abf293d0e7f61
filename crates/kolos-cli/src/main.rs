mod commands;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "kolos")]
#[command(about = "Kolos member intake: transcript extraction and signal generation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Extract a profile from a call transcript
    Extract {
        /// Transcript file; reads stdin when omitted
        file: Option<PathBuf>,
    },
    /// Generate signals from a profile JSON document
    Signals {
        /// Profile JSON file; reads stdin when omitted
        file: Option<PathBuf>,
        /// Signal date (YYYY-MM-DD); defaults to today in UTC
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Extract a profile from a transcript and generate its signals
    Run {
        /// Transcript file; reads stdin when omitted
        file: Option<PathBuf>,
        /// Signal date (YYYY-MM-DD); defaults to today in UTC
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output = match cli.command {
        Commands::Extract { file } => commands::run_extract(file.as_deref())?,
        Commands::Signals { file, date } => commands::run_signals(file.as_deref(), date)?,
        Commands::Run { file, date } => commands::run_pipeline(file.as_deref(), date)?,
    };

    println!("{output}");
    Ok(())
}
