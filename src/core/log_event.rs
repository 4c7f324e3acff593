//! Log event structure

use super::log_level::LogLevel;
use chrono::{DateTime, Local};
use std::fmt::{self, Display, Write as _};

/// Message body of one log call.
///
/// Each part is rendered with `Display` and followed by a single space, so
/// `["a", "b"]` becomes `"a b "`. The trailing space is part of the persisted
/// line format.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    body: String,
}

impl Message {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a message from several parts
    pub fn from_parts<I>(parts: I) -> Self
    where
        I: IntoIterator,
        I::Item: Display,
    {
        parts.into_iter().fold(Self::new(), |message, part| message.part(part))
    }

    /// Append one part followed by the separator
    #[must_use]
    pub fn part(mut self, part: impl Display) -> Self {
        self.push(part);
        self
    }

    pub fn push(&mut self, part: impl Display) {
        // Writing into a String cannot fail
        let _ = write!(self.body, "{}", part);
        self.body.push(' ');
    }

    pub fn as_str(&self) -> &str {
        &self.body
    }

    pub fn into_string(self) -> String {
        self.body
    }

    /// Escape line breaks so one event always maps to one line
    fn sanitize(self) -> String {
        if self.body.contains(&['\n', '\r'][..]) {
            self.body.replace('\n', "\\n").replace('\r', "\\r")
        } else {
            self.body
        }
    }
}

impl Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.body)
    }
}

impl From<&str> for Message {
    fn from(part: &str) -> Self {
        Self::new().part(part)
    }
}

impl From<String> for Message {
    fn from(part: String) -> Self {
        Self::new().part(part)
    }
}

impl From<&String> for Message {
    fn from(part: &String) -> Self {
        Self::new().part(part)
    }
}

/// One dispatched log call, rendered independently per sink.
///
/// The timestamp is captured once when the event is built and shared by every
/// token and every sink rendering of the event.
#[derive(Debug, Clone)]
pub struct LogEvent {
    pub sequence: u64,
    pub timestamp: DateTime<Local>,
    pub caller: String,
    pub level: LogLevel,
    pub message: String,
}

impl LogEvent {
    pub fn new(sequence: u64, level: LogLevel, caller: impl Into<String>, message: Message) -> Self {
        Self {
            sequence,
            timestamp: Local::now(),
            caller: caller.into(),
            level,
            message: message.sanitize(),
        }
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = timestamp;
        self
    }
}
