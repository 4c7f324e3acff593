//! Dispatch directives and per-event sink routing
//!
//! A [`Directive`] is used both as the global verbosity mode of a session and as
//! a per-call override. A per-call directive can only narrow the destinations
//! implied by the global mode: both must agree for a sink to fire.

use super::log_level::{EnabledLevels, LogLevel};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Directive {
    FileOnly,
    ConsoleOnly,
    #[default]
    FileAndConsole,
}

impl Directive {
    pub fn to_str(&self) -> &'static str {
        match self {
            Directive::FileOnly => "FILE_ONLY",
            Directive::ConsoleOnly => "CONSOLE_ONLY",
            Directive::FileAndConsole => "FILE_AND_CONSOLE",
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

/// Set of per-call directives attached to one log call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Directives {
    file_only: bool,
    console_only: bool,
    file_and_console: bool,
}

impl Directives {
    /// No per-call restriction
    pub const fn none() -> Self {
        Self {
            file_only: false,
            console_only: false,
            file_and_console: false,
        }
    }

    pub const fn file_only() -> Self {
        Self {
            file_only: true,
            ..Self::none()
        }
    }

    pub const fn console_only() -> Self {
        Self {
            console_only: true,
            ..Self::none()
        }
    }

    #[must_use]
    pub fn with(mut self, directive: Directive) -> Self {
        self.insert(directive);
        self
    }

    pub fn insert(&mut self, directive: Directive) {
        match directive {
            Directive::FileOnly => self.file_only = true,
            Directive::ConsoleOnly => self.console_only = true,
            Directive::FileAndConsole => self.file_and_console = true,
        }
    }

    pub fn contains(&self, directive: Directive) -> bool {
        match directive {
            Directive::FileOnly => self.file_only,
            Directive::ConsoleOnly => self.console_only,
            Directive::FileAndConsole => self.file_and_console,
        }
    }
}

impl From<Directive> for Directives {
    fn from(directive: Directive) -> Self {
        Self::none().with(directive)
    }
}

impl FromIterator<Directive> for Directives {
    fn from_iter<I: IntoIterator<Item = Directive>>(iter: I) -> Self {
        iter.into_iter().fold(Self::none(), Directives::with)
    }
}

/// Which sinks receive one event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Route {
    pub console: bool,
    pub file: bool,
    pub streams: bool,
}

impl Route {
    /// Decide the destinations of one event.
    ///
    /// The file sink ignores `enabled`: only the console is
    /// filtered by level.
    pub fn resolve(
        mode: Directive,
        directives: Directives,
        level: LogLevel,
        enabled: &EnabledLevels,
    ) -> Self {
        let console = !directives.contains(Directive::FileOnly)
            && mode != Directive::FileOnly
            && enabled.contains(level);

        let file =
            !directives.contains(Directive::ConsoleOnly) && mode != Directive::ConsoleOnly;

        let streams = !directives.contains(Directive::ConsoleOnly)
            && !directives.contains(Directive::FileOnly)
            && mode == Directive::FileAndConsole;

        Self {
            console,
            file,
            streams,
        }
    }
}
