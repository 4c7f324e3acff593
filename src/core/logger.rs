//! Main logger implementation
//!
//! A [`Logger`] owns the state of one logging facility: the session file, the
//! verbosity policy, the console writer, the additional streams and the event
//! counter. It is an explicit object rather than a process global, so several
//! independent loggers can live side by side; share one between threads with
//! an `Arc`.
//!
//! Every dispatch runs under a single lock covering sequence assignment,
//! rendering and the writes of all selected sinks. Lines therefore never
//! interleave and the file is always in sequence order.

use super::{
    appender::Appender,
    caller,
    config::LoggerConfig,
    directive::{Directive, Directives, Route},
    error::{LoggerError, Result},
    log_event::{LogEvent, Message},
    log_level::{EnabledLevels, LogLevel},
    metrics::LoggerMetrics,
    sequencer::Sequencer,
    template::Template,
};
use crate::appenders::{compress_file, ConsoleAppender, FileAppender, StreamAppender};
use parking_lot::Mutex;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

pub struct Logger {
    config: LoggerConfig,
    state: Mutex<LoggerState>,
    sequencer: Sequencer,
    capture_trace: AtomicBool,
    metrics: LoggerMetrics,
}

struct LoggerState {
    /// Open between a successful `init` and the matching `exit`
    session: Option<FileAppender>,
    verbosity: Directive,
    enabled_levels: EnabledLevels,
    console: ConsoleAppender,
    streams: Vec<StreamAppender>,
}

enum CallerSource<'a> {
    Stack,
    Named(&'a str),
}

impl Logger {
    pub fn new(config: LoggerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_parts(config, ConsoleAppender::new()))
    }

    fn from_parts(config: LoggerConfig, console: ConsoleAppender) -> Self {
        let console = console.with_template(config.console_template.clone());

        Self {
            state: Mutex::new(LoggerState {
                session: None,
                verbosity: config.verbosity,
                enabled_levels: config.enabled_levels.clone(),
                console,
                streams: Vec::new(),
            }),
            sequencer: Sequencer::new(),
            capture_trace: AtomicBool::new(config.capture_trace),
            metrics: LoggerMetrics::new(),
            config,
        }
    }

    /// Start a session with the configured verbosity, trace capture and levels
    pub fn init(&self) -> Result<()> {
        self.init_with(
            self.config.verbosity,
            self.config.capture_trace,
            self.config.enabled_levels.clone(),
        )
    }

    /// Start a session: create the log directory if needed, open a new session
    /// file and restart event numbering at 0.
    ///
    /// Calling it while a session is open emits a warning and returns
    /// [`LoggerError::AlreadyInitialized`] without touching the session.
    pub fn init_with(
        &self,
        verbosity: Directive,
        capture_trace: bool,
        enabled_levels: EnabledLevels,
    ) -> Result<()> {
        let mut state = self.state.lock();

        if state.session.is_some() {
            let caller = self.caller(CallerSource::Stack);
            self.dispatch_locked(
                &mut state,
                LogLevel::Warning,
                Message::from("Log already init"),
                Directives::none(),
                caller,
            );
            return Err(LoggerError::AlreadyInitialized);
        }

        let opened = ensure_dir(&self.config.log_dir).and_then(|dir_created| {
            FileAppender::create(
                &self.config.log_dir,
                &self.config.project_name,
                self.config.file_template.clone(),
            )
            .map(|file| (file, dir_created))
        });

        let (file, dir_created) = match opened {
            Ok(opened) => opened,
            Err(e) => {
                let caller = self.caller(CallerSource::Stack);
                self.diagnose(&mut state, format!("Log error: {}", e), caller);
                return Err(e);
            }
        };

        state.session = Some(file);
        state.verbosity = verbosity;
        state.enabled_levels = enabled_levels;
        self.capture_trace.store(capture_trace, Ordering::Relaxed);
        self.sequencer.reset();

        let caller = self.caller(CallerSource::Stack);
        self.dispatch_locked(
            &mut state,
            LogLevel::Info,
            Message::from("Log start"),
            Directives::file_only(),
            caller.clone(),
        );

        if dir_created {
            self.dispatch_locked(
                &mut state,
                LogLevel::Warning,
                Message::from("Log directory created"),
                Directives::none(),
                caller,
            );
        }

        Ok(())
    }

    /// End the session: write the closing event, then flush and release the file.
    ///
    /// Without an open session this emits a console-only error and returns
    /// [`LoggerError::NotInitialized`].
    pub fn exit(&self) -> Result<()> {
        let caller = self.caller(CallerSource::Stack);
        let mut state = self.state.lock();

        if state.session.is_none() {
            self.dispatch_locked(
                &mut state,
                LogLevel::Error,
                Message::from("Please init before exit"),
                Directives::console_only(),
                caller,
            );
            return Err(LoggerError::NotInitialized);
        }

        self.dispatch_locked(
            &mut state,
            LogLevel::Info,
            Message::from("End log"),
            Directives::file_only(),
            caller.clone(),
        );

        let closed = state
            .session
            .take()
            .map_or(Err(LoggerError::NotInitialized), FileAppender::close)
            .and_then(|path| {
                if self.config.compress_on_exit {
                    compress_file(&path)
                } else {
                    Ok(path)
                }
            });

        match closed {
            Ok(_) => Ok(()),
            Err(e) => {
                self.diagnose(&mut state, format!("Failed to close log file: {}", e), caller);
                Err(e)
            }
        }
    }

    /// Add an output stream receiving every event routed to additional streams.
    ///
    /// Allowed at any time, including before `init`. Streams are never removed.
    pub fn register_stream(&self, stream: impl Write + Send + 'static) {
        self.register_boxed_stream(Box::new(stream));
    }

    pub fn register_boxed_stream(&self, stream: Box<dyn Write + Send>) {
        let mut state = self.state.lock();
        let name = format!("stream#{}", state.streams.len());
        state.streams.push(
            StreamAppender::from_boxed(stream)
                .with_template(self.config.additional_template.clone())
                .with_name(name),
        );
    }

    pub fn log(&self, level: LogLevel, message: impl Into<Message>) {
        self.dispatch(level, message.into(), Directives::none(), CallerSource::Stack);
    }

    /// Log with per-call directives narrowing the session's destinations
    pub fn log_with(
        &self,
        level: LogLevel,
        message: impl Into<Message>,
        directives: impl Into<Directives>,
    ) {
        self.dispatch(level, message.into(), directives.into(), CallerSource::Stack);
    }

    /// Log with an explicit caller label instead of inspecting the stack.
    ///
    /// The logging macros go through here with the name of the function they
    /// are expanded in. The label is still dropped when trace capture is off.
    pub fn log_from(&self, level: LogLevel, message: Message, directives: Directives, caller: &str) {
        self.dispatch(level, message, directives, CallerSource::Named(caller));
    }

    #[inline]
    pub fn info(&self, message: impl Into<Message>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    pub fn success(&self, message: impl Into<Message>) {
        self.log(LogLevel::Success, message);
    }

    #[inline]
    pub fn error(&self, message: impl Into<Message>) {
        self.log(LogLevel::Error, message);
    }

    #[inline]
    pub fn warning(&self, message: impl Into<Message>) {
        self.log(LogLevel::Warning, message);
    }

    #[inline]
    pub fn debug(&self, message: impl Into<Message>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    pub fn info_with(&self, message: impl Into<Message>, directives: impl Into<Directives>) {
        self.log_with(LogLevel::Info, message, directives);
    }

    #[inline]
    pub fn success_with(&self, message: impl Into<Message>, directives: impl Into<Directives>) {
        self.log_with(LogLevel::Success, message, directives);
    }

    #[inline]
    pub fn error_with(&self, message: impl Into<Message>, directives: impl Into<Directives>) {
        self.log_with(LogLevel::Error, message, directives);
    }

    #[inline]
    pub fn warning_with(&self, message: impl Into<Message>, directives: impl Into<Directives>) {
        self.log_with(LogLevel::Warning, message, directives);
    }

    #[inline]
    pub fn debug_with(&self, message: impl Into<Message>, directives: impl Into<Directives>) {
        self.log_with(LogLevel::Debug, message, directives);
    }

    pub fn flush(&self) -> Result<()> {
        let mut state = self.state.lock();
        state.console.flush()?;
        if let Some(file) = state.session.as_mut() {
            file.flush()?;
        }
        for stream in state.streams.iter_mut() {
            stream.flush()?;
        }
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.state.lock().session.is_some()
    }

    /// Path of the open session file
    pub fn current_log_path(&self) -> Option<PathBuf> {
        self.state
            .lock()
            .session
            .as_ref()
            .map(|file| file.path().to_path_buf())
    }

    pub fn stream_count(&self) -> usize {
        self.state.lock().streams.len()
    }

    pub fn verbosity(&self) -> Directive {
        self.state.lock().verbosity
    }

    pub fn enabled_levels(&self) -> EnabledLevels {
        self.state.lock().enabled_levels.clone()
    }

    /// Sequence number the next event will receive
    pub fn next_sequence(&self) -> u64 {
        self.sequencer.peek()
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    fn caller(&self, source: CallerSource<'_>) -> String {
        if !self.capture_trace.load(Ordering::Relaxed) {
            return String::new();
        }

        match source {
            CallerSource::Stack => caller::resolve_caller(0),
            CallerSource::Named(name) => name.to_string(),
        }
    }

    fn dispatch(
        &self,
        level: LogLevel,
        message: Message,
        directives: Directives,
        source: CallerSource<'_>,
    ) {
        // Stack inspection only looks at this thread, keep it outside the lock
        let caller = self.caller(source);
        let mut state = self.state.lock();
        self.dispatch_locked(&mut state, level, message, directives, caller);
    }

    fn dispatch_locked(
        &self,
        state: &mut LoggerState,
        level: LogLevel,
        message: Message,
        directives: Directives,
        caller: String,
    ) {
        let event = LogEvent::new(self.sequencer.next(), level, caller, message);
        self.metrics.record_dispatched();

        let route = Route::resolve(state.verbosity, directives, level, &state.enabled_levels);

        if route.console {
            match isolate(|| state.console.append(&event)) {
                Ok(()) => {
                    self.metrics.record_console_write();
                }
                Err(e) => {
                    // The console is the diagnostic channel itself
                    self.metrics.record_dropped();
                    eprintln!("[LOGGER ERROR] Console write failed: {}", e);
                }
            }
        }

        if route.file {
            let written = match state.session.as_mut() {
                Some(file) => file
                    .append(&event)
                    .map_err(|e| format!("Failed to write log file: {}", e)),
                None => Err("Please init logger".to_string()),
            };

            match written {
                Ok(()) => {
                    self.metrics.record_file_write();
                }
                Err(reason) => {
                    self.metrics.record_dropped();
                    self.diagnose(state, reason, event.caller.clone());
                }
            }
        }

        if route.streams {
            let mut failures = Vec::new();
            for stream in state.streams.iter_mut() {
                match isolate(|| stream.append(&event)) {
                    Ok(()) => {
                        self.metrics.record_stream_write();
                    }
                    Err(e) => {
                        self.metrics.record_dropped();
                        failures.push(format!("Write to {} failed: {}", stream.name(), e));
                    }
                }
            }

            for reason in failures {
                self.diagnose(state, reason, event.caller.clone());
            }
        }
    }

    /// Report an internal failure as a console-only error event.
    ///
    /// Console-only events never select the file or the streams, so this
    /// cannot recurse.
    fn diagnose(&self, state: &mut LoggerState, reason: String, caller: String) {
        self.dispatch_locked(
            state,
            LogLevel::Error,
            Message::from(reason),
            Directives::console_only(),
            caller,
        );
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::from_parts(LoggerConfig::default(), ConsoleAppender::new())
    }
}

/// Create the log directory, reporting whether it had to be created
fn ensure_dir(dir: &Path) -> Result<bool> {
    if dir.is_dir() {
        return Ok(false);
    }

    fs::create_dir_all(dir).map_err(|e| {
        LoggerError::io_operation("creating log directory", dir.display().to_string(), e)
    })?;
    Ok(true)
}

/// Run one appender call, turning a panic into an error so that a faulty
/// writer cannot take the caller down with it
fn isolate(append: impl FnOnce() -> Result<()>) -> Result<()> {
    match std::panic::catch_unwind(std::panic::AssertUnwindSafe(append)) {
        Ok(result) => result,
        Err(panic_info) => {
            let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = panic_info.downcast_ref::<String>() {
                s.clone()
            } else {
                "Unknown panic".to_string()
            };
            Err(LoggerError::writer(format!("appender panicked: {}", panic_msg)))
        }
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use rust_fanout_logger::prelude::*;
///
/// let console = SharedBuffer::new();
/// let logger = Logger::builder()
///     .project_name("billing")
///     .log_dir(std::env::temp_dir().join("billing-logs"))
///     .verbosity(Directive::ConsoleOnly)
///     .console_writer(console.clone())
///     .build()
///     .unwrap();
///
/// logger.info("ready");
/// assert!(console.contents().contains("ready "));
/// ```
pub struct LoggerBuilder {
    config: LoggerConfig,
    console: Option<Box<dyn Write + Send>>,
    use_colors: bool,
    streams: Vec<Box<dyn Write + Send>>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            config: LoggerConfig::default(),
            console: None,
            use_colors: true,
            streams: Vec::new(),
        }
    }

    /// Replace the whole configuration
    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.log_dir = dir.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn project_name(mut self, name: impl Into<String>) -> Self {
        self.config.project_name = name.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn verbosity(mut self, verbosity: Directive) -> Self {
        self.config.verbosity = verbosity;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn capture_trace(mut self, capture_trace: bool) -> Self {
        self.config.capture_trace = capture_trace;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn enabled_levels(mut self, levels: impl IntoIterator<Item = LogLevel>) -> Self {
        self.config.enabled_levels = levels.into_iter().collect();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn console_template(mut self, template: impl Into<Template>) -> Self {
        self.config.console_template = template.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn file_template(mut self, template: impl Into<Template>) -> Self {
        self.config.file_template = template.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn additional_template(mut self, template: impl Into<Template>) -> Self {
        self.config.additional_template = template.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn compress_on_exit(mut self, compress: bool) -> Self {
        self.config.compress_on_exit = compress;
        self
    }

    /// Send console lines to `writer` instead of stdout
    #[must_use = "builder methods return a new value"]
    pub fn console_writer(mut self, writer: impl Write + Send + 'static) -> Self {
        self.console = Some(Box::new(writer));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Register an additional stream up front
    #[must_use = "builder methods return a new value"]
    pub fn stream(mut self, writer: impl Write + Send + 'static) -> Self {
        self.streams.push(Box::new(writer));
        self
    }

    /// Build the Logger
    pub fn build(self) -> Result<Logger> {
        self.config.validate()?;

        let console = match self.console {
            Some(writer) => ConsoleAppender::with_writer(writer),
            None => ConsoleAppender::new(),
        }
        .with_colors(self.use_colors);

        let logger = Logger::from_parts(self.config, console);
        for stream in self.streams {
            logger.register_boxed_stream(stream);
        }
        Ok(logger)
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appenders::SharedBuffer;
    use std::io;
    use tempfile::TempDir;

    struct Fixture {
        _temp_dir: TempDir,
        log_dir: PathBuf,
        console: SharedBuffer,
    }

    impl Fixture {
        fn new() -> Self {
            let temp_dir = TempDir::new().expect("Failed to create temp dir");
            let log_dir = temp_dir.path().join("logs");
            Self {
                _temp_dir: temp_dir,
                log_dir,
                console: SharedBuffer::new(),
            }
        }

        fn builder(&self) -> LoggerBuilder {
            Logger::builder()
                .log_dir(&self.log_dir)
                .console_writer(self.console.clone())
                .colors(false)
        }

        fn file_lines(&self) -> Vec<String> {
            let mut entries: Vec<_> = fs::read_dir(&self.log_dir)
                .expect("log dir exists")
                .map(|e| e.unwrap().path())
                .collect();
            assert_eq!(entries.len(), 1, "expected one session file");
            let content = fs::read_to_string(entries.remove(0)).unwrap();
            content.lines().map(str::to_owned).collect()
        }
    }

    struct BrokenStream;

    impl Write for BrokenStream {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct PanickingStream;

    impl Write for PanickingStream {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            panic!("stream exploded");
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_init_creates_directory_and_file() {
        let fx = Fixture::new();
        let logger = fx.builder().build().unwrap();

        logger.init().unwrap();
        assert!(logger.is_initialized());
        let path = logger.current_log_path().unwrap();
        assert!(path.starts_with(&fx.log_dir));
        let file_name = path.file_name().unwrap().to_str().unwrap().to_string();
        assert!(file_name.starts_with("project_log_") && file_name.ends_with(".log"));

        logger.exit().unwrap();
        assert!(!logger.is_initialized());

        let lines = fx.file_lines();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with("-INFO]\t[test_init_creates_directory_and_file]\tLog start "));
        assert!(lines[1].contains("-WARNING]\t") && lines[1].ends_with("\tLog directory created "));
        assert!(lines[2].starts_with("[2-") && lines[2].ends_with("\tEnd log "));

        // The directory warning is the only session event shown on the console
        assert_eq!(
            fx.console.lines(),
            vec!["[test_init_creates_directory_and_file]\tLog directory created "]
        );
    }

    #[test]
    fn test_double_init_is_rejected() {
        let fx = Fixture::new();
        fs::create_dir_all(&fx.log_dir).unwrap();
        let logger = fx.builder().build().unwrap();

        logger.init().unwrap();
        let path = logger.current_log_path();
        assert!(matches!(logger.init(), Err(LoggerError::AlreadyInitialized)));
        assert_eq!(logger.current_log_path(), path);
        logger.exit().unwrap();

        let lines = fx.file_lines();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("-WARNING]") && lines[1].ends_with("Log already init "));

        let warnings: Vec<_> = fx
            .console
            .lines()
            .into_iter()
            .filter(|l| l.ends_with("Log already init "))
            .collect();
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_exit_without_init_is_rejected() {
        let fx = Fixture::new();
        let logger = fx.builder().build().unwrap();

        assert!(matches!(logger.exit(), Err(LoggerError::NotInitialized)));
        assert!(!logger.is_initialized());
        assert!(!fx.log_dir.exists());
        assert_eq!(fx.console.lines().len(), 1);
        assert!(fx.console.contents().ends_with("Please init before exit \n"));
    }

    #[test]
    fn test_write_before_init_is_dropped() {
        let fx = Fixture::new();
        let logger = fx.builder().capture_trace(false).build().unwrap();

        logger.info("too early");

        assert_eq!(
            fx.console.lines(),
            vec!["[]\ttoo early ", "[]\tPlease init logger "]
        );
        assert_eq!(logger.metrics().dropped_writes(), 1);
        assert_eq!(logger.metrics().file_writes(), 0);
        // The event and its diagnostic both consumed a number
        assert_eq!(logger.next_sequence(), 2);
    }

    #[test]
    fn test_sequence_restarts_on_each_session() {
        let fx = Fixture::new();
        fs::create_dir_all(&fx.log_dir).unwrap();
        let logger = fx.builder().verbosity(Directive::ConsoleOnly).build().unwrap();

        logger.init().unwrap();
        logger.info("a");
        logger.info("b");
        assert_eq!(logger.next_sequence(), 3);
        logger.exit().unwrap();

        logger.init().unwrap();
        assert_eq!(logger.next_sequence(), 1);
        logger.exit().unwrap();
    }

    #[test]
    fn test_console_filter_does_not_apply_to_file() {
        let fx = Fixture::new();
        fs::create_dir_all(&fx.log_dir).unwrap();
        let logger = fx.builder().build().unwrap();

        logger
            .init_with(Directive::FileAndConsole, false, [LogLevel::Error].into_iter().collect())
            .unwrap();
        logger.debug("hidden on console");
        logger.error("shown everywhere");
        logger.exit().unwrap();

        assert_eq!(fx.console.lines(), vec!["[]\tshown everywhere "]);

        let lines = fx.file_lines();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].ends_with("-DEBUG]\t[]\thidden on console "));
        assert!(lines[2].ends_with("-ERROR]\t[]\tshown everywhere "));
    }

    #[test]
    fn test_per_call_directive_narrows_routing() {
        let fx = Fixture::new();
        fs::create_dir_all(&fx.log_dir).unwrap();
        let stream = SharedBuffer::new();
        let logger = fx.builder().stream(stream.clone()).build().unwrap();

        logger.init().unwrap();
        logger.info_with("console only", Directive::ConsoleOnly);
        logger.warning_with("file only", Directive::FileOnly);
        logger.success("everywhere");
        logger.exit().unwrap();

        let console = fx.console.contents();
        assert!(console.contains("console only "));
        assert!(!console.contains("file only "));
        assert!(console.contains("everywhere "));

        let file = fx.file_lines().join("\n");
        assert!(!file.contains("console only "));
        assert!(file.contains("file only "));
        assert!(file.contains("everywhere "));

        let stream_lines = stream.lines();
        assert_eq!(stream_lines.len(), 1);
        assert!(stream_lines[0].ends_with("-SUCCESS]\t[test_per_call_directive_narrows_routing]\teverywhere "));
    }

    #[test]
    fn test_failing_stream_is_reported_on_console() {
        let fx = Fixture::new();
        fs::create_dir_all(&fx.log_dir).unwrap();
        let healthy = SharedBuffer::new();
        let logger = fx.builder().capture_trace(false).build().unwrap();
        logger.register_stream(BrokenStream);
        logger.register_stream(healthy.clone());

        logger.init().unwrap();
        logger.info("payload");
        logger.exit().unwrap();

        assert_eq!(healthy.lines().len(), 1);
        assert!(fx
            .console
            .contents()
            .contains("Write to stream#0 failed:"));
        assert_eq!(logger.metrics().stream_writes(), 1);
        assert_eq!(logger.metrics().dropped_writes(), 1);

        // The diagnostic never reaches the file
        assert!(!fx.file_lines().join("\n").contains("stream#0"));
    }

    #[test]
    fn test_panicking_stream_is_isolated() {
        let fx = Fixture::new();
        let healthy = SharedBuffer::new();
        let logger = fx
            .builder()
            .verbosity(Directive::FileAndConsole)
            .stream(PanickingStream)
            .stream(healthy.clone())
            .build()
            .unwrap();

        logger.init().unwrap();
        logger.debug("still delivered");
        logger.exit().unwrap();

        assert!(healthy.contents().contains("still delivered "));
        assert!(fx.console.contents().contains("appender panicked: stream exploded"));
    }

    #[test]
    fn test_macros_capture_enclosing_function() {
        let fx = Fixture::new();
        let logger = fx.builder().verbosity(Directive::ConsoleOnly).build().unwrap();

        fn run(logger: &Logger) {
            crate::info!(logger, "value", 42);
        }
        run(&logger);

        assert_eq!(fx.console.lines(), vec!["[run]\tvalue 42 "]);
    }

    #[test]
    fn test_builder_rejects_invalid_config() {
        let result = Logger::builder().project_name("").build();
        assert!(matches!(result, Err(LoggerError::InvalidConfiguration { .. })));
    }

    #[test]
    fn test_init_fails_when_log_dir_is_a_file() {
        let fx = Fixture::new();
        fs::write(&fx.log_dir, "not a directory").unwrap();
        let logger = fx.builder().build().unwrap();

        assert!(logger.init().is_err());
        assert!(!logger.is_initialized());
        assert!(fx.console.contents().contains("Log error: "));
    }
}
