//! Logger metrics for observability
//!
//! Counters describing what the sink router actually did, useful to check
//! routing decisions and to spot writes lost before `init` or to broken streams.

use std::sync::atomic::{AtomicU64, Ordering};

/// # Example
///
/// ```
/// use rust_fanout_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
/// metrics.record_dispatched();
/// metrics.record_file_write();
///
/// assert_eq!(metrics.events_dispatched(), 1);
/// assert_eq!(metrics.file_writes(), 1);
/// assert_eq!(metrics.dropped_writes(), 0);
/// ```
#[derive(Debug, Default)]
pub struct LoggerMetrics {
    /// Dispatch calls, including those that reached no sink
    events_dispatched: AtomicU64,

    console_writes: AtomicU64,

    file_writes: AtomicU64,

    /// Individual additional stream writes (one per stream per event)
    stream_writes: AtomicU64,

    /// File writes without an open session and failed writes on any sink
    dropped_writes: AtomicU64,
}

impl LoggerMetrics {
    pub const fn new() -> Self {
        Self {
            events_dispatched: AtomicU64::new(0),
            console_writes: AtomicU64::new(0),
            file_writes: AtomicU64::new(0),
            stream_writes: AtomicU64::new(0),
            dropped_writes: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn events_dispatched(&self) -> u64 {
        self.events_dispatched.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn console_writes(&self) -> u64 {
        self.console_writes.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn file_writes(&self) -> u64 {
        self.file_writes.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn stream_writes(&self) -> u64 {
        self.stream_writes.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn dropped_writes(&self) -> u64 {
        self.dropped_writes.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_dispatched(&self) -> u64 {
        self.events_dispatched.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_console_write(&self) -> u64 {
        self.console_writes.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_file_write(&self) -> u64 {
        self.file_writes.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_stream_write(&self) -> u64 {
        self.stream_writes.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_dropped(&self) -> u64 {
        self.dropped_writes.fetch_add(1, Ordering::Relaxed)
    }

    /// Share of attempted writes that were dropped, as a percentage
    pub fn drop_rate(&self) -> f64 {
        let written = self.console_writes() + self.file_writes() + self.stream_writes();
        let dropped = self.dropped_writes();
        let total = written + dropped;

        if total == 0 {
            return 0.0;
        }
        (dropped as f64 / total as f64) * 100.0
    }

    pub fn reset(&self) {
        self.events_dispatched.store(0, Ordering::Relaxed);
        self.console_writes.store(0, Ordering::Relaxed);
        self.file_writes.store(0, Ordering::Relaxed);
        self.stream_writes.store(0, Ordering::Relaxed);
        self.dropped_writes.store(0, Ordering::Relaxed);
    }
}
