//! Logging macros recording the calling function.
//!
//! The macros take the message as a list of parts, rendered one after the
//! other with a space after each, and name the function they are written in
//! as the event's caller. The name is fixed at compile time, so no stack walk
//! is needed.
//!
//! # Examples
//!
//! ```
//! use rust_fanout_logger::prelude::*;
//! use rust_fanout_logger::{info, warning};
//!
//! let console = SharedBuffer::new();
//! let logger = Logger::builder()
//!     .verbosity(Directive::ConsoleOnly)
//!     .console_writer(console.clone())
//!     .colors(false)
//!     .build()
//!     .unwrap();
//!
//! fn serve(logger: &Logger) {
//!     let port = 8080;
//!     info!(logger, "listening on", port);
//!     warning!(logger, directive = Directive::ConsoleOnly; "no TLS configured");
//! }
//! serve(&logger);
//!
//! assert_eq!(
//!     console.lines(),
//!     vec!["[serve]\tlistening on 8080 ", "[serve]\tno TLS configured "]
//! );
//! ```

/// Name of the function the macro is expanded in
#[doc(hidden)]
#[macro_export]
macro_rules! __caller {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        $crate::core::caller::caller_from_type_name(type_name_of(f))
    }};
}

/// Log at an explicit level.
///
/// ```
/// # use rust_fanout_logger::prelude::*;
/// # let logger = Logger::builder().verbosity(Directive::ConsoleOnly)
/// #     .console_writer(SharedBuffer::new()).build().unwrap();
/// use rust_fanout_logger::log;
/// log!(logger, LogLevel::Success, "uploaded", 3, "files");
/// log!(logger, LogLevel::Debug, directive = Directive::FileOnly; "cache state", "warm");
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, directive = $directive:expr; $($part:expr),+ $(,)?) => {
        $logger.log_from(
            $level,
            $crate::Message::new()$(.part($part))+,
            $crate::Directives::from($directive),
            &$crate::__caller!(),
        )
    };
    ($logger:expr, $level:expr, $($part:expr),+ $(,)?) => {
        $logger.log_from(
            $level,
            $crate::Message::new()$(.part($part))+,
            $crate::Directives::none(),
            &$crate::__caller!(),
        )
    };
}

#[macro_export]
macro_rules! info {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($rest)+)
    };
}

#[macro_export]
macro_rules! success {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Success, $($rest)+)
    };
}

#[macro_export]
macro_rules! error {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($rest)+)
    };
}

#[macro_export]
macro_rules! warning {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warning, $($rest)+)
    };
}

#[macro_export]
macro_rules! debug {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($rest)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::appenders::SharedBuffer;
    use crate::core::{Directive, LogLevel, Logger};

    fn console_logger() -> (Logger, SharedBuffer) {
        let console = SharedBuffer::new();
        let logger = Logger::builder()
            .verbosity(Directive::ConsoleOnly)
            .console_writer(console.clone())
            .colors(false)
            .build()
            .unwrap();
        (logger, console)
    }

    #[test]
    fn test_caller_is_enclosing_function() {
        assert_eq!(__caller!(), "test_caller_is_enclosing_function");
    }

    #[test]
    fn test_caller_inside_closure() {
        let name = (|| __caller!())();
        assert_eq!(name, "test_caller_inside_closure");
    }

    #[test]
    fn test_level_macros() {
        let (logger, console) = console_logger();

        info!(logger, "info");
        success!(logger, "success");
        error!(logger, "error", 500);
        warning!(logger, "warning");
        debug!(logger, "debug", true);

        assert_eq!(
            console.lines(),
            vec![
                "[test_level_macros]\tinfo ",
                "[test_level_macros]\tsuccess ",
                "[test_level_macros]\terror 500 ",
                "[test_level_macros]\twarning ",
                "[test_level_macros]\tdebug true ",
            ]
        );
    }

    #[test]
    fn test_log_macro_with_directive() {
        let (logger, console) = console_logger();

        // File-only events never reach the console
        log!(logger, LogLevel::Info, directive = Directive::FileOnly; "hidden");
        log!(logger, LogLevel::Info, directive = Directive::ConsoleOnly; "shown", 1,);

        assert_eq!(console.lines(), vec!["[test_log_macro_with_directive]\tshown 1 "]);
    }

    #[test]
    fn test_caller_empty_without_trace_capture() {
        let console = SharedBuffer::new();
        let logger = Logger::builder()
            .verbosity(Directive::ConsoleOnly)
            .capture_trace(false)
            .console_writer(console.clone())
            .colors(false)
            .build()
            .unwrap();

        info!(logger, "anonymous");
        assert_eq!(console.lines(), vec!["[]\tanonymous "]);
    }
}
