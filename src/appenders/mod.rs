//! Appender implementations

pub mod buffer;
pub mod console;
pub mod file;
pub mod stream;

pub use buffer::SharedBuffer;
pub use console::ConsoleAppender;
pub use file::{compress_file, FileAppender};
pub use stream::StreamAppender;

// Re-export trait for convenience
pub use crate::core::Appender;
