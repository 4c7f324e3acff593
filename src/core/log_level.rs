//! Log level definitions

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Info,
    Success,
    Error,
    Warning,
    Debug,
}

impl LogLevel {
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Info,
        LogLevel::Success,
        LogLevel::Error,
        LogLevel::Warning,
        LogLevel::Debug,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Success => "SUCCESS",
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARNING",
            LogLevel::Debug => "DEBUG",
        }
    }

    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::Info => Blue,
            LogLevel::Success => Green,
            LogLevel::Error => Red,
            LogLevel::Warning => Yellow,
            LogLevel::Debug => Magenta,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "INFO" => Ok(LogLevel::Info),
            "SUCCESS" => Ok(LogLevel::Success),
            "ERROR" => Ok(LogLevel::Error),
            "WARNING" | "WARN" => Ok(LogLevel::Warning),
            "DEBUG" => Ok(LogLevel::Debug),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}

/// Levels allowed to reach the console sink.
///
/// The file sink does not consult this set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnabledLevels(BTreeSet<LogLevel>);

impl EnabledLevels {
    pub fn all() -> Self {
        Self(LogLevel::ALL.into_iter().collect())
    }

    pub fn none() -> Self {
        Self(BTreeSet::new())
    }

    pub fn contains(&self, level: LogLevel) -> bool {
        self.0.contains(&level)
    }

    pub fn iter(&self) -> impl Iterator<Item = LogLevel> + '_ {
        self.0.iter().copied()
    }
}

impl Default for EnabledLevels {
    fn default() -> Self {
        Self::all()
    }
}

impl FromIterator<LogLevel> for EnabledLevels {
    fn from_iter<I: IntoIterator<Item = LogLevel>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
