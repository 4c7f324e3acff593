//! Additional output stream appender

use crate::core::{Appender, LogEvent, Result, Template, ADDITIONAL_TEMPLATE};
use std::io::Write;

/// Any registered writer receiving the additional-stream rendering.
///
/// Writability is not checked up front: a broken stream only surfaces as an
/// error on its first write.
pub struct StreamAppender {
    writer: Box<dyn Write + Send>,
    template: Template,
    name: String,
}

impl StreamAppender {
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self::from_boxed(Box::new(writer))
    }

    pub fn from_boxed(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer,
            template: Template::new(ADDITIONAL_TEMPLATE),
            name: "stream".to_string(),
        }
    }

    #[must_use]
    pub fn with_template(mut self, template: Template) -> Self {
        self.template = template;
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl Appender for StreamAppender {
    fn append(&mut self, event: &LogEvent) -> Result<()> {
        let mut line = self.template.render(event);
        line.push('\n');

        self.writer.write_all(line.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
