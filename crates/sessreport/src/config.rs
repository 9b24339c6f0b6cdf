//! Project configuration file support for sessreport.
//!
//! Loads configuration from `sessreport.toml` in the working directory, or
//! from an explicit `--config` path.

use anyhow::{Context, Result};
use serde::Deserialize;
use sessreport_logging::LogFormat;
use std::path::{Path, PathBuf};

/// The config file name
pub const CONFIG_FILE_NAME: &str = "sessreport.toml";

/// Input file used when neither the CLI nor the config names one
pub const DEFAULT_INPUT: &str = "data.txt";

/// Output file used when neither the CLI nor the config names one
pub const DEFAULT_OUTPUT: &str = "result.json";

/// Log level used when neither `--verbose` nor the config sets one
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Project-level configuration loaded from `sessreport.toml`
#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Record file to read
    pub input: Option<PathBuf>,
    /// Report file to write
    pub output: Option<PathBuf>,
    /// Tracing filter, e.g. `info` or `sessreport_core=debug`
    pub log_level: Option<String>,
    /// Format for pipeline events and tracing output
    pub log_format: Option<LogFormat>,
}

impl ProjectConfig {
    /// Load configuration from the working directory.
    ///
    /// Returns:
    /// - `Ok(Some(config))` if file exists and parses successfully
    /// - `Ok(None)` if file does not exist
    /// - `Err(...)` if file exists but fails to parse (hard error)
    pub fn load(working_dir: &Path) -> Result<Option<Self>> {
        let config_path = working_dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            return Ok(None);
        }

        Self::load_from(&config_path).map(Some)
    }

    /// Load configuration from an explicit path. A missing file is an error.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let config: ProjectConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        Ok(config)
    }
}

/// Effective settings after merging CLI arguments, config and defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub input: PathBuf,
    pub output: PathBuf,
    pub log_level: String,
    pub log_format: LogFormat,
}

/// Values supplied on the command line.
#[derive(Debug, Default)]
pub struct Overrides {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub log_format: Option<LogFormat>,
    pub verbose: bool,
}

impl Settings {
    /// Priority: CLI > config file > built-in default
    pub fn resolve(overrides: Overrides, config: Option<ProjectConfig>) -> Self {
        let config = config.unwrap_or_default();

        let log_level = if overrides.verbose {
            "debug".to_string()
        } else {
            config
                .log_level
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
        };

        Self {
            input: overrides
                .input
                .or(config.input)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT)),
            output: overrides
                .output
                .or(config.output)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
            log_level,
            log_format: overrides
                .log_format
                .or(config.log_format)
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        assert!(ProjectConfig::load(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_load_full_config() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"
input = "records.txt"
output = "out/report.json"
log_level = "info"
log_format = "json"
"#,
        )
        .unwrap();

        let config = ProjectConfig::load(dir.path()).unwrap().unwrap();
        assert_eq!(config.input, Some(PathBuf::from("records.txt")));
        assert_eq!(config.output, Some(PathBuf::from("out/report.json")));
        assert_eq!(config.log_level.as_deref(), Some("info"));
        assert_eq!(config.log_format, Some(LogFormat::Json));
    }

    #[test]
    fn test_unknown_field_is_an_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "inputs = \"x\"\n").unwrap();
        assert!(ProjectConfig::load(dir.path()).is_err());
    }

    #[test]
    fn test_load_from_missing_path_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(ProjectConfig::load_from(&dir.path().join("nope.toml")).is_err());
    }

    #[test]
    fn test_resolve_defaults() {
        let settings = Settings::resolve(Overrides::default(), None);
        assert_eq!(settings.input, PathBuf::from("data.txt"));
        assert_eq!(settings.output, PathBuf::from("result.json"));
        assert_eq!(settings.log_level, "warn");
        assert_eq!(settings.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_resolve_priority() {
        let config = ProjectConfig {
            input: Some(PathBuf::from("config-in.txt")),
            output: Some(PathBuf::from("config-out.json")),
            log_level: Some("info".to_string()),
            log_format: Some(LogFormat::Compact),
        };
        let overrides = Overrides {
            input: Some(PathBuf::from("cli-in.txt")),
            verbose: true,
            ..Overrides::default()
        };

        let settings = Settings::resolve(overrides, Some(config));
        assert_eq!(settings.input, PathBuf::from("cli-in.txt"));
        assert_eq!(settings.output, PathBuf::from("config-out.json"));
        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.log_format, LogFormat::Compact);
    }
}
