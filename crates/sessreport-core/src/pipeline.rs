use std::path::PathBuf;

use sessreport_logging::{LogEvent, Logger};
use sessreport_records::UserRegistry;

use crate::error::ReportError;
use crate::report::{build_report, Report};
use crate::writer::write_report;

/// Reads an input file, builds the report and writes it to the output file.
#[derive(Debug, Clone)]
pub struct Pipeline {
    input: PathBuf,
    output: PathBuf,
}

impl Pipeline {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }

    /// Run all three phases. The output file is only touched once the report
    /// has been built successfully.
    pub fn run(&self, logger: &Logger) -> Result<Report, ReportError> {
        logger.log(&LogEvent::RunStarted {
            input: self.input.clone(),
            output: self.output.clone(),
        });

        let result = self.run_phases(logger);
        if let Err(ref e) = result {
            logger.log(&LogEvent::RunFailed {
                error: e.to_string(),
            });
        }
        result
    }

    fn run_phases(&self, logger: &Logger) -> Result<Report, ReportError> {
        let text = std::fs::read_to_string(&self.input).map_err(|source| ReportError::Read {
            path: self.input.clone(),
            source,
        })?;
        logger.log(&LogEvent::InputLoaded {
            input: self.input.clone(),
            lines: text.lines().count(),
            bytes: text.len(),
        });

        let report = process(&text, logger)?;

        let bytes = write_report(&self.output, &report)?;
        logger.log(&LogEvent::ReportWritten {
            output: self.output.clone(),
            bytes,
        });
        tracing::info!(
            users = report.global.total_users,
            sessions = report.global.total_sessions,
            output = %self.output.display(),
            "Report complete"
        );

        Ok(report)
    }
}

/// Parse, register and aggregate `text` entirely in memory.
pub fn process(text: &str, logger: &Logger) -> Result<Report, ReportError> {
    let population = UserRegistry::from_text(text)?;
    logger.log(&LogEvent::RecordsRegistered {
        users: population.users().len(),
        sessions: population.session_count(),
    });

    build_report(&population, |full_name| {
        logger.log(&LogEvent::NameCollision {
            full_name: full_name.to_string(),
        })
    })
}
