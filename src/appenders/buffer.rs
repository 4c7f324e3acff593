//! Cloneable in-memory stream
//!
//! Handy as a console target or an additional stream when the output has to
//! be inspected afterwards:
//!
//! ```
//! use rust_fanout_logger::prelude::*;
//!
//! let capture = SharedBuffer::new();
//! let logger = Logger::builder().stream(capture.clone()).build().unwrap();
//! assert_eq!(logger.stream_count(), 1);
//! assert!(capture.contents().is_empty());
//! ```

use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    bytes: Mutex<Vec<u8>>,
    flushes: AtomicUsize,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded as UTF-8
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.inner.bytes.lock()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_owned).collect()
    }

    /// Number of `flush` calls received
    pub fn flush_count(&self) -> usize {
        self.inner.flushes.load(Ordering::SeqCst)
    }

    pub fn clear(&self) {
        self.inner.bytes.lock().clear();
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.bytes.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flushes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
