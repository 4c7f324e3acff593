//! Basic logger usage example
//!
//! Demonstrates a session with every level, per-call directives and the
//! console level filter.
//!
//! Run with: cargo run --example basic_usage

use rust_fanout_logger::prelude::*;
use rust_fanout_logger::{info, warning};

fn load_settings(logger: &Logger) {
    info!(logger, "loading settings from", "config.json");
    warning!(logger, "option", "retries", "missing, using", 3);
}

fn main() -> Result<()> {
    println!("=== Rust Fanout Logger - Basic Usage Example ===\n");

    let logger = Logger::builder().project_name("basic_usage").build()?;
    logger.init()?;

    println!("1. Logging at every level:");
    logger.info("This is an info message");
    logger.success("This is a success message");
    logger.error("This is an error message");
    logger.warning("This is a warning message");
    logger.debug("This is a debug message");

    println!("\n2. Messages made of several parts:");
    logger.info(Message::from("processed").part(128).part("records in").part(0.42).part("s"));

    println!("\n3. Macros record the enclosing function:");
    load_settings(&logger);

    println!("\n4. Per-call directives:");
    logger.info_with("Console only, never written to the file", Directive::ConsoleOnly);
    logger.info_with("File only, not shown here", Directive::FileOnly);

    println!("\n5. Restarting with a console filter (ERROR and WARNING only):");
    logger.exit()?;
    logger.init_with(
        Directive::FileAndConsole,
        true,
        [LogLevel::Error, LogLevel::Warning].into_iter().collect(),
    )?;
    logger.debug("Debug message (file only)");
    logger.error("Error message (visible)");

    let path = logger.current_log_path();
    logger.exit()?;

    if let Some(path) = path {
        println!("\nSession written to {}", path.display());
    }
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
