//! Event sequencing

use std::sync::atomic::{AtomicU64, Ordering};

/// Hands out strictly increasing event numbers shared by all threads.
///
/// `next` is a single atomic read-modify-write, so concurrent callers never
/// observe the same value.
#[derive(Debug, Default)]
pub struct Sequencer {
    next: AtomicU64,
}

impl Sequencer {
    pub const fn new() -> Self {
        Self {
            next: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn next(&self) -> u64 {
        self.next.fetch_add(1, Ordering::SeqCst)
    }

    /// Value the next call to [`Sequencer::next`] will return
    #[inline]
    pub fn peek(&self) -> u64 {
        self.next.load(Ordering::SeqCst)
    }

    /// Restart numbering at 0 for a new session
    pub fn reset(&self) {
        self.next.store(0, Ordering::SeqCst);
    }
}
