//! Additional stream example
//!
//! Demonstrates fanning events out to extra writers next to the console and
//! the session file, with several threads logging at once.
//!
//! Run with: cargo run --example stream_fanout

use rust_fanout_logger::prelude::*;
use std::io;
use std::sync::Arc;
use std::thread;

fn worker(logger: &Logger, id: usize) {
    for step in 0..3 {
        logger.info(Message::from("worker").part(id).part("step").part(step));
    }
}

fn main() -> Result<()> {
    println!("=== Rust Fanout Logger - Stream Fanout Example ===\n");

    let capture = SharedBuffer::new();
    let logger = Arc::new(
        Logger::builder()
            .project_name("stream_fanout")
            .stream(capture.clone())
            .build()?,
    );
    // stderr as a second stream, registered after construction
    logger.register_stream(io::stderr());
    logger.init()?;

    println!("1. Logging from 4 threads:");
    let handles: Vec<_> = (0..4)
        .map(|id| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || worker(&logger, id))
        })
        .collect();
    for handle in handles {
        handle.join().expect("worker thread panicked");
    }

    println!("\n2. Directives keep events off the streams:");
    logger.warning_with("Console only", Directive::ConsoleOnly);
    logger.warning_with("File only", Directive::FileOnly);

    logger.exit()?;

    println!("\n3. Captured by the in-memory stream:");
    for line in capture.lines() {
        println!("   {}", line);
    }

    let metrics = logger.metrics();
    println!(
        "\nDispatched {} events: {} console, {} file, {} stream writes",
        metrics.events_dispatched(),
        metrics.console_writes(),
        metrics.file_writes(),
        metrics.stream_writes()
    );

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
