use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use sessreport_core::Pipeline;
use sessreport_logging::{init_tracing, LogFormat, Logger};

mod config;
mod summary;

use config::{Overrides, ProjectConfig, Settings};

#[derive(Parser, Debug)]
#[command(
    name = "sessreport",
    about = "Per-user and global session statistics from user/session record files",
    version,
    author
)]
struct Cli {
    /// Record file to read (default: data.txt)
    input: Option<PathBuf>,

    /// Report file to write (default: result.json)
    output: Option<PathBuf>,

    /// Path to config file (default: ./sessreport.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log output format
    #[arg(long, value_enum)]
    log_format: Option<LogFormatChoice>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Suppress pipeline progress events
    #[arg(short, long)]
    quiet: bool,

    /// Print a human-readable summary after writing the report
    #[arg(long)]
    summary: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormatChoice {
    Pretty,
    Json,
    Compact,
}

impl From<LogFormatChoice> for LogFormat {
    fn from(choice: LogFormatChoice) -> Self {
        match choice {
            LogFormatChoice::Pretty => LogFormat::Pretty,
            LogFormatChoice::Json => LogFormat::Json,
            LogFormatChoice::Compact => LogFormat::Compact,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let project_config = match cli.config {
        Some(ref path) => Some(ProjectConfig::load_from(path)?),
        None => {
            let working_dir = std::env::current_dir().context("Failed to get current directory")?;
            ProjectConfig::load(&working_dir)?
        }
    };

    let settings = Settings::resolve(
        Overrides {
            input: cli.input,
            output: cli.output,
            log_format: cli.log_format.map(Into::into),
            verbose: cli.verbose,
        },
        project_config,
    );

    init_tracing(&settings.log_level, settings.log_format);

    let logger = if cli.quiet {
        Logger::quiet()
    } else {
        Logger::new(settings.log_format)
    };

    let pipeline = Pipeline::new(&settings.input, &settings.output);
    let report = pipeline
        .run(&logger)
        .with_context(|| format!("Failed to build report from {}", settings.input.display()))?;

    if cli.summary {
        summary::print_summary(&report);
    }

    Ok(())
}
