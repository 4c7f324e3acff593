//! # Rust Fanout Logger
//!
//! A session-based logging facility writing every event to up to three kinds
//! of destinations: a colored console, one log file per session and any number
//! of additional output streams.
//!
//! ## Features
//!
//! - **Sessions**: `init` opens `<project>_log_<date>.log`, `exit` closes it
//! - **Routing**: a session verbosity plus per-call directives choose the sinks
//! - **Templates**: `%` tokens for sequence, level, caller, time and message
//! - **Caller names**: the calling function is recorded with each event
//! - **Thread safe**: share one `Logger` through an `Arc`
//!
//! ```
//! use rust_fanout_logger::prelude::*;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let logger = Logger::builder()
//!     .log_dir(dir.path())
//!     .project_name("demo")
//!     .console_writer(SharedBuffer::new())
//!     .build()
//!     .unwrap();
//!
//! logger.init().unwrap();
//! logger.info(Message::from("processed").part(3).part("items"));
//! logger.exit().unwrap();
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, FileAppender, SharedBuffer, StreamAppender};
    pub use crate::core::{
        Appender, Directive, Directives, EnabledLevels, LogEvent, LogLevel, Logger,
        LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, Message, Result, Template,
    };
}

pub use appenders::{compress_file, ConsoleAppender, FileAppender, SharedBuffer, StreamAppender};
pub use core::{
    date_stamp, render, resolve_caller, time_stamp, Appender, Directive, Directives,
    EnabledLevels, LogEvent, LogLevel, Logger, LoggerBuilder, LoggerConfig, LoggerError,
    LoggerMetrics, Message, Result, Route, Sequencer, Template, Token, ADDITIONAL_TEMPLATE,
    CONSOLE_TEMPLATE, FILE_TEMPLATE,
};
