//! Template-driven message rendering
//!
//! A template is plain text with percent-escaped tokens:
//!
//! | Token | Value |
//! |---|---|
//! | `%Y` `%M` `%D` | year / month / day |
//! | `%H` `%m` `%S` `%N` | hour / minute / second / millisecond |
//! | `%d` | date stamp `%Y-%M-%D@%H-%m-%S` |
//! | `%h` | time stamp `%H:%m:%S:%N` |
//! | `%T` | caller name |
//! | `%C` | message body |
//! | `%n` | event sequence number |
//! | `%t` | level name |
//!
//! A `%` followed by any other character is copied verbatim together with that
//! character, and a `%` ending the template is copied as is. Rendering never fails.

use super::log_event::LogEvent;
use chrono::{DateTime, Datelike, Local, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Write as _;

/// Default template for console lines
pub const CONSOLE_TEMPLATE: &str = "[%T]\t%C";

/// Default template for log file lines
pub const FILE_TEMPLATE: &str = "[%n-%h-%t]\t[%T]\t%C";

/// Default template for additional stream lines
pub const ADDITIONAL_TEMPLATE: &str = "[%n-%t]\t[%T]\t%C";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    SubSecond,
    Date,
    Time,
    Caller,
    Content,
    Sequence,
    Level,
}

impl Token {
    fn from_char(c: char) -> Option<Self> {
        Some(match c {
            'Y' => Token::Year,
            'M' => Token::Month,
            'D' => Token::Day,
            'H' => Token::Hour,
            'm' => Token::Minute,
            'S' => Token::Second,
            'N' => Token::SubSecond,
            'd' => Token::Date,
            'h' => Token::Time,
            'T' => Token::Caller,
            'C' => Token::Content,
            'n' => Token::Sequence,
            't' => Token::Level,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Token(Token),
}

/// A compiled template, reusable across events
#[derive(Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let segments = Self::compile(&source);
        Self { source, segments }
    }

    fn compile(source: &str) -> Vec<Segment> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.chars();

        while let Some(c) = chars.next() {
            if c != '%' {
                literal.push(c);
                continue;
            }

            match chars.next() {
                Some(next) => match Token::from_char(next) {
                    Some(token) => {
                        if !literal.is_empty() {
                            segments.push(Segment::Literal(std::mem::take(&mut literal)));
                        }
                        segments.push(Segment::Token(token));
                    }
                    None => {
                        literal.push('%');
                        literal.push(next);
                    }
                },
                None => literal.push('%'),
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }
        segments
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Render the template for one event
    #[must_use]
    pub fn render(&self, event: &LogEvent) -> String {
        let mut out = String::with_capacity(self.source.len() + event.message.len() + 32);
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Token(token) => Self::resolve(&mut out, *token, event),
            }
        }
        out
    }

    fn resolve(out: &mut String, token: Token, event: &LogEvent) {
        let ts = &event.timestamp;
        // Writing into a String cannot fail
        let _ = match token {
            Token::Year => write!(out, "{}", ts.year()),
            Token::Month => write!(out, "{}", ts.month()),
            Token::Day => write!(out, "{}", ts.day()),
            Token::Hour => write!(out, "{}", ts.hour()),
            Token::Minute => write!(out, "{}", ts.minute()),
            Token::Second => write!(out, "{}", ts.second()),
            Token::SubSecond => write!(out, "{:03}", millis(ts)),
            Token::Date => out.write_str(&date_stamp(ts)),
            Token::Time => out.write_str(&time_stamp(ts)),
            Token::Caller => out.write_str(&event.caller),
            Token::Content => out.write_str(&event.message),
            Token::Sequence => write!(out, "{}", event.sequence),
            Token::Level => out.write_str(event.level.to_str()),
        };
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Template").field(&self.source).finish()
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl From<&str> for Template {
    fn from(source: &str) -> Self {
        Self::new(source)
    }
}

impl From<String> for Template {
    fn from(source: String) -> Self {
        Self::new(source)
    }
}

impl Serialize for Template {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.source)
    }
}

impl<'de> Deserialize<'de> for Template {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Template::new)
    }
}

/// Render a template string for one event without keeping the compiled form
pub fn render(template: &str, event: &LogEvent) -> String {
    Template::new(template).render(event)
}

fn millis(ts: &DateTime<Local>) -> u32 {
    // Leap seconds report nanos >= 1e9
    (ts.nanosecond() / 1_000_000).min(999)
}

/// `Y-M-D@H-m-S` without padding, also used for session file names
pub fn date_stamp(ts: &DateTime<Local>) -> String {
    format!(
        "{}-{}-{}@{}-{}-{}",
        ts.year(),
        ts.month(),
        ts.day(),
        ts.hour(),
        ts.minute(),
        ts.second()
    )
}

/// `H:m:S:NNN`, only the milliseconds are padded
pub fn time_stamp(ts: &DateTime<Local>) -> String {
    format!(
        "{}:{}:{}:{:03}",
        ts.hour(),
        ts.minute(),
        ts.second(),
        millis(ts)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::log_event::Message;
    use crate::core::log_level::LogLevel;
    use chrono::TimeZone;

    fn fixed_event() -> LogEvent {
        // 2025-01-08 09:05:03.042 local time
        let ts = Local
            .with_ymd_and_hms(2025, 1, 8, 9, 5, 3)
            .single()
            .expect("valid datetime")
            + chrono::Duration::milliseconds(42);
        LogEvent::new(3, LogLevel::Info, "run", Message::from("test")).with_timestamp(ts)
    }

    #[test]
    fn test_default_file_template() {
        let line = Template::new(FILE_TEMPLATE).render(&fixed_event());
        assert_eq!(line, "[3-9:5:3:042-INFO]\t[run]\ttest ");
    }

    #[test]
    fn test_default_console_and_additional_templates() {
        let event = fixed_event();
        assert_eq!(render(CONSOLE_TEMPLATE, &event), "[run]\ttest ");
        assert_eq!(render(ADDITIONAL_TEMPLATE, &event), "[3-INFO]\t[run]\ttest ");
    }

    #[test]
    fn test_date_tokens() {
        let event = fixed_event();
        assert_eq!(render("%Y/%M/%D %H.%m.%S.%N", &event), "2025/1/8 9.5.3.042");
        assert_eq!(render("%d", &event), "2025-1-8@9-5-3");
        assert_eq!(render("%h", &event), "9:5:3:042");
    }

    #[test]
    fn test_unknown_token_is_literal() {
        let event = fixed_event();
        assert_eq!(render("100%x done %%", &event), "100%x done %%");
        assert_eq!(render("50%", &event), "50%");
        assert_eq!(render("%", &event), "%");
        assert_eq!(render("%é%t", &event), "%éINFO");
    }

    #[test]
    fn test_template_without_tokens() {
        let template = Template::new("plain text");
        assert_eq!(template.render(&fixed_event()), "plain text");
        assert_eq!(template.as_str(), "plain text");
    }

    #[test]
    fn test_template_serde_as_string() {
        let template = Template::new(ADDITIONAL_TEMPLATE);
        let json = serde_json::to_string(&template).unwrap();
        assert_eq!(json, "\"[%n-%t]\\t[%T]\\t%C\"");
        let parsed: Template = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, template);
    }
}
