//! Console appender implementation

use crate::core::{Appender, LogEvent, LogLevel, Result, Template, CONSOLE_TEMPLATE};
use std::io::{self, Write};

/// ANSI reset escape written after every colored line
pub const RESET: &str = "\x1b[0m";

/// Foreground escape for a level's color
pub fn color_escape(level: LogLevel) -> String {
    format!("\x1b[{}m", level.color_code().to_fg_str())
}

/// Writes one colored line per event.
///
/// The escape codes are always emitted (unless colors are disabled) so output
/// does not depend on terminal detection.
pub struct ConsoleAppender {
    writer: Box<dyn Write + Send>,
    template: Template,
    use_colors: bool,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Console output redirected to any writer
    pub fn with_writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            writer: Box::new(writer),
            template: Template::new(CONSOLE_TEMPLATE),
            use_colors: true,
        }
    }

    #[must_use]
    pub fn with_template(mut self, template: Template) -> Self {
        self.template = template;
        self
    }

    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    fn format_line(&self, event: &LogEvent) -> String {
        let body = self.template.render(event);
        if self.use_colors {
            format!("{}{}{}\n", color_escape(event.level), body, RESET)
        } else {
            format!("{}\n", body)
        }
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, event: &LogEvent) -> Result<()> {
        // One write call per line keeps prefix, body and reset together
        let line = self.format_line(event);
        self.writer.write_all(line.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appenders::SharedBuffer;
    use crate::core::Message;

    #[test]
    fn test_colored_line() {
        let buffer = SharedBuffer::new();
        let mut console = ConsoleAppender::with_writer(buffer.clone());

        let event = LogEvent::new(0, LogLevel::Error, "run", Message::from("boom"));
        console.append(&event).unwrap();

        assert_eq!(buffer.contents(), "\x1b[31m[run]\tboom \x1b[0m\n");
    }

    #[test]
    fn test_level_colors() {
        assert_eq!(color_escape(LogLevel::Info), "\x1b[34m");
        assert_eq!(color_escape(LogLevel::Success), "\x1b[32m");
        assert_eq!(color_escape(LogLevel::Warning), "\x1b[33m");
        assert_eq!(color_escape(LogLevel::Debug), "\x1b[35m");
    }

    #[test]
    fn test_plain_line_with_custom_template() {
        let buffer = SharedBuffer::new();
        let mut console = ConsoleAppender::with_writer(buffer.clone())
            .with_colors(false)
            .with_template(Template::new("%t: %C"));

        let event = LogEvent::new(0, LogLevel::Success, "", Message::from("done"));
        console.append(&event).unwrap();

        assert_eq!(buffer.contents(), "SUCCESS: done \n");
    }
}
