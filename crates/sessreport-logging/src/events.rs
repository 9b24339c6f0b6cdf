use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::PathBuf;

/// Structured log events for one report run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LogEvent {
    RunStarted {
        input: PathBuf,
        output: PathBuf,
    },
    InputLoaded {
        input: PathBuf,
        lines: usize,
        bytes: usize,
    },
    RecordsRegistered {
        users: usize,
        sessions: usize,
    },
    /// Two users share a full name; the later user's metrics replace the earlier ones.
    NameCollision {
        full_name: String,
    },
    ReportWritten {
        output: PathBuf,
        bytes: usize,
    },
    RunFailed {
        error: String,
    },
}

impl LogEvent {
    /// Add a timestamp to serialize with the event
    fn with_timestamp(&self) -> serde_json::Value {
        let mut value = serde_json::to_value(self).unwrap_or_default();
        if let Some(obj) = value.as_object_mut() {
            obj.insert(
                "timestamp".to_string(),
                serde_json::Value::String(chrono::Utc::now().to_rfc3339()),
            );
        }
        value
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format with colors
    #[default]
    Pretty,
    /// JSON lines format for machine consumption
    Json,
    /// Compact single-line format
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            "compact" => Ok(LogFormat::Compact),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

/// Logger for pipeline events. Everything goes to stderr so report bytes
/// written to stdout or a file are never interleaved with log output.
pub struct Logger {
    format: LogFormat,
    quiet: bool,
}

impl Logger {
    pub fn new(format: LogFormat) -> Self {
        Self {
            format,
            quiet: false,
        }
    }

    /// A logger that drops every event.
    pub fn quiet() -> Self {
        Self {
            format: LogFormat::default(),
            quiet: true,
        }
    }

    pub fn log(&self, event: &LogEvent) {
        if self.quiet {
            return;
        }
        if let Some(line) = self.render(event) {
            let _ = writeln!(std::io::stderr(), "{}", line);
        }
    }

    /// Render an event in this logger's format. `None` means the format skips it.
    pub fn render(&self, event: &LogEvent) -> Option<String> {
        match self.format {
            LogFormat::Json => Some(event.with_timestamp().to_string()),
            LogFormat::Pretty => Self::render_pretty(event),
            LogFormat::Compact => Some(Self::render_compact(event)),
        }
    }

    fn render_pretty(event: &LogEvent) -> Option<String> {
        let line = match event {
            LogEvent::RunStarted { input, output } => format!(
                "{} {} {} {}",
                "▶".bright_cyan(),
                input.display().to_string().bold(),
                "→".dimmed(),
                output.display()
            ),
            LogEvent::InputLoaded { lines, bytes, .. } => format!(
                "  {} {} {}, {} bytes",
                "Read".dimmed(),
                lines,
                if *lines == 1 { "line" } else { "lines" },
                bytes
            ),
            LogEvent::RecordsRegistered { users, sessions } => format!(
                "  {} {} {}, {} {}",
                "Registered".dimmed(),
                users,
                if *users == 1 { "user" } else { "users" },
                sessions,
                if *sessions == 1 { "session" } else { "sessions" }
            ),
            LogEvent::NameCollision { full_name } => format!(
                "  {} Duplicate full name {:?}; later user's stats replace earlier ones",
                "⚠".bright_yellow(),
                full_name
            ),
            LogEvent::ReportWritten { output, bytes } => format!(
                "  {} Wrote {} ({} bytes)",
                "✓".bright_green(),
                output.display(),
                bytes
            ),
            LogEvent::RunFailed { error } => {
                format!("  {} {}", "✗".bright_red(), error.bright_red())
            }
        };
        Some(line)
    }

    fn render_compact(event: &LogEvent) -> String {
        let timestamp = chrono::Utc::now().format("%H:%M:%S");
        match event {
            LogEvent::RunStarted { input, output } => format!(
                "[{}] run:start {} {}",
                timestamp,
                input.display(),
                output.display()
            ),
            LogEvent::InputLoaded { lines, bytes, .. } => {
                format!("[{}] input:loaded {}l {}b", timestamp, lines, bytes)
            }
            LogEvent::RecordsRegistered { users, sessions } => {
                format!("[{}] records:{}u {}s", timestamp, users, sessions)
            }
            LogEvent::NameCollision { full_name } => {
                format!("[{}] collision:{}", timestamp, full_name)
            }
            LogEvent::ReportWritten { output, bytes } => {
                format!("[{}] report:written {} {}b", timestamp, output.display(), bytes)
            }
            LogEvent::RunFailed { error } => format!("[{}] error:{}", timestamp, error),
        }
    }
}
