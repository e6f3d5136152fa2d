use super::serde_helpers::{load_env_path_opt, load_env_var, load_env_var_opt};
use super::ConfigError;
use crate::domain::Severity;
use crate::logger::{ConsoleLogger, Logger};
use crate::serializer::Indent;
use crate::sink::{ConsoleSink, OutputChannels};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

#[derive(Parser, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[command(author, version, about, long_about = None)]
#[serde(default)]
pub struct LoggerConfig {
    /// Minimum severity that is emitted (error, warn, info, debug)
    #[arg(
        long,
        env = "LOG_THRESHOLD",
        default_value = "info",
        value_parser = Severity::from_str
    )]
    pub threshold: Severity,

    /// Indentation: a number of spaces or a literal string (compact if unset)
    #[arg(long, env = "LOG_INDENT", allow_negative_numbers = true)]
    pub indent: Option<Indent>,

    /// Level of rask-logger's own diagnostics on stderr
    #[arg(
        long,
        env = "RASK_LOGGER_DIAGNOSTICS",
        default_value = "warn",
        value_parser = Severity::from_str
    )]
    pub diagnostics: Severity,

    /// Configuration file path (optional, replaces the other settings)
    #[serde(skip)]
    #[arg(long, env = "CONFIG_FILE")]
    pub config_file: Option<PathBuf>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            threshold: Severity::Info,
            indent: None,
            diagnostics: Severity::Warn,
            config_file: None,
        }
    }
}

impl LoggerConfig {
    pub fn from_args<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let config = LoggerConfig::try_parse_from(args)
            .map_err(|e| ConfigError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = LoggerConfig::default();

        load_env_var("LOG_THRESHOLD", &mut config.threshold)?;
        load_env_var_opt("LOG_INDENT", &mut config.indent)?;
        load_env_var("RASK_LOGGER_DIAGNOSTICS", &mut config.diagnostics)?;
        load_env_path_opt("CONFIG_FILE", &mut config.config_file);

        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading logger configuration");
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&content)?;
        config.config_file = Some(path.to_path_buf());
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: LoggerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Replaces this configuration with the file named by `config_file`, if any.
    pub fn resolve_file(self) -> Result<Self, ConfigError> {
        match &self.config_file {
            Some(path) => Self::from_file(path),
            None => Ok(self),
        }
    }

    pub fn indent_spec(&self) -> Indent {
        self.indent.clone().unwrap_or_default()
    }

    pub fn build_console_logger(&self) -> ConsoleLogger {
        ConsoleLogger::console(self.threshold, self.indent_spec())
    }

    pub fn build_console_logger_with<C: OutputChannels>(&self, channels: C) -> ConsoleLogger<C> {
        Logger::new(
            self.threshold,
            ConsoleSink::with_channels(channels, self.indent_spec()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LoggerConfig::default();
        assert_eq!(config.threshold, Severity::Info);
        assert_eq!(config.indent_spec(), Indent::None);
        assert_eq!(config.diagnostics, Severity::Warn);
    }

    #[test]
    fn test_from_toml_str() {
        let config = LoggerConfig::from_toml_str(
            r#"
            threshold = "debug"
            indent = 2
            "#,
        )
        .unwrap();
        assert_eq!(config.threshold, Severity::Debug);
        assert_eq!(config.indent_spec(), Indent::Spaces(2));
        assert_eq!(config.diagnostics, Severity::Warn);

        let config = LoggerConfig::from_toml_str("indent = \"\\t\"").unwrap();
        assert_eq!(config.indent_spec(), Indent::Literal("\t".to_string()));
    }

    #[test]
    fn test_from_toml_str_accepts_severity_aliases() {
        let config = LoggerConfig::from_toml_str("threshold = \"warning\"").unwrap();
        assert_eq!(config.threshold, Severity::Warn);

        let config = LoggerConfig::from_toml_str(
            r#"
            threshold = "WARN"
            diagnostics = "Debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.threshold, Severity::Warn);
        assert_eq!(config.diagnostics, Severity::Debug);
    }

    #[test]
    fn test_from_toml_str_negative_indent_is_compact() {
        let config = LoggerConfig::from_toml_str("indent = -2").unwrap();
        assert_eq!(config.indent_spec(), Indent::None);
    }

    #[test]
    fn test_from_toml_str_rejects_unknown_threshold() {
        let result = LoggerConfig::from_toml_str("threshold = \"verbose\"");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_build_console_logger_uses_threshold() {
        let config = LoggerConfig {
            threshold: Severity::Error,
            ..LoggerConfig::default()
        };
        let logger = config.build_console_logger();
        assert_eq!(logger.threshold(), Severity::Error);
        assert_eq!(logger.sink().indent(), &Indent::None);
    }

    #[test]
    fn test_build_console_logger_with_channels() {
        let config = LoggerConfig {
            threshold: Severity::Warn,
            indent: Some(Indent::Spaces(2)),
            ..LoggerConfig::default()
        };
        let logger = config.build_console_logger_with(crate::sink::MemoryChannels::new());
        logger.warn("kept").unwrap();
        logger.info("dropped").unwrap();

        let lines = logger.sink().channels().stderr_lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("{\n  \"level\": \"warn\""), "{}", lines[0]);
        assert!(logger.sink().channels().stdout_lines().is_empty());
    }
}
