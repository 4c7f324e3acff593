//! Logger configuration
//!
//! Every field has a default, so a JSON document only needs to name what it
//! changes:
//!
//! ```
//! use rust_fanout_logger::{Directive, LoggerConfig};
//!
//! let config = LoggerConfig::from_json_str(r#"{ "project_name": "billing", "verbosity": "CONSOLE_ONLY" }"#)
//!     .unwrap();
//! assert_eq!(config.project_name, "billing");
//! assert_eq!(config.verbosity, Directive::ConsoleOnly);
//! assert_eq!(config.log_dir.to_str(), Some("./logs"));
//! ```

use super::directive::Directive;
use super::error::{LoggerError, Result};
use super::log_level::EnabledLevels;
use super::template::{Template, ADDITIONAL_TEMPLATE, CONSOLE_TEMPLATE, FILE_TEMPLATE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_LOG_DIR: &str = "./logs";
pub const DEFAULT_PROJECT_NAME: &str = "project";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Directory holding session files, created on `init` when missing
    pub log_dir: PathBuf,
    /// Prefix of session file names: `<project_name>_log_<date>.log`
    pub project_name: String,
    /// Session verbosity used by `init()`
    pub verbosity: Directive,
    /// Record the calling function of each event
    pub capture_trace: bool,
    /// Levels shown on the console used by `init()`
    pub enabled_levels: EnabledLevels,
    pub console_template: Template,
    pub file_template: Template,
    pub additional_template: Template,
    /// Gzip the session file when the session ends
    pub compress_on_exit: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            project_name: DEFAULT_PROJECT_NAME.to_string(),
            verbosity: Directive::FileAndConsole,
            capture_trace: true,
            enabled_levels: EnabledLevels::all(),
            console_template: Template::new(CONSOLE_TEMPLATE),
            file_template: Template::new(FILE_TEMPLATE),
            additional_template: Template::new(ADDITIONAL_TEMPLATE),
            compress_on_exit: false,
        }
    }
}

impl LoggerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            LoggerError::io_operation(
                "reading logger configuration",
                path.display().to_string(),
                e,
            )
        })?;
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject settings that would produce broken file names or multi-line events
    pub fn validate(&self) -> Result<()> {
        if self.project_name.trim().is_empty() {
            return Err(LoggerError::config("project_name", "must not be empty"));
        }
        if self.project_name.contains(['/', '\\']) {
            return Err(LoggerError::config(
                "project_name",
                "must not contain path separators",
            ));
        }

        let templates = [
            ("console_template", &self.console_template),
            ("file_template", &self.file_template),
            ("additional_template", &self.additional_template),
        ];
        for (name, template) in templates {
            if template.as_str().contains(['\n', '\r']) {
                return Err(LoggerError::config(name, "must not contain line breaks"));
            }
        }

        Ok(())
    }
}
