//! Core logger types and traits

pub mod appender;
pub mod caller;
pub mod config;
pub mod directive;
pub mod error;
pub mod log_event;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod sequencer;
pub mod template;

pub use appender::Appender;
pub use caller::resolve_caller;
pub use config::LoggerConfig;
pub use directive::{Directive, Directives, Route};
pub use error::{LoggerError, Result};
pub use log_event::{LogEvent, Message};
pub use log_level::{EnabledLevels, LogLevel};
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use sequencer::Sequencer;
pub use template::{
    date_stamp, render, time_stamp, Template, Token, ADDITIONAL_TEMPLATE, CONSOLE_TEMPLATE,
    FILE_TEMPLATE,
};
