//! Appender trait for log output destinations

use super::{error::Result, log_event::LogEvent};

/// A sink that renders and writes one event per call.
///
/// Each appender owns its template; `append` is expected to emit exactly one
/// line per event.
pub trait Appender: Send {
    fn append(&mut self, event: &LogEvent) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
