//! File logging example
//!
//! Demonstrates loading the configuration from JSON, file-only sessions and
//! compression of the session file on exit.
//!
//! Run with: cargo run --example file_logging

use rust_fanout_logger::prelude::*;
use std::fs;

fn main() -> Result<()> {
    println!("=== Rust Fanout Logger - File Logging Example ===\n");

    let config = LoggerConfig::from_json_str(
        r#"{
            "log_dir": "./demo-logs",
            "project_name": "file_logging",
            "verbosity": "FILE_ONLY",
            "compress_on_exit": false
        }"#,
    )?;
    println!("1. Configuration:\n{}\n", config.to_json_string()?);

    let logger = Logger::new(config.clone())?;
    logger.init()?;

    println!("2. Logging to the file only:");
    logger.info("Application started");
    logger.debug("Loading configuration...");
    logger.success("Configuration loaded successfully");
    logger.warning("Using default settings for some options");
    logger.error("Failed to load optional plugin");

    // Directives only narrow the destinations
    logger.info_with("This line goes nowhere", Directive::ConsoleOnly);

    let path = logger.current_log_path();
    logger.exit()?;

    if let Some(path) = path {
        println!("   Contents of {}:", path.display());
        for line in fs::read_to_string(&path)?.lines() {
            println!("   {}", line);
        }
    }

    println!("\n3. Compressing the session file on exit:");
    let logger = Logger::builder()
        .config(LoggerConfig {
            project_name: "file_logging_gz".to_string(),
            compress_on_exit: true,
            ..config
        })
        .build()?;
    logger.init()?;
    logger.info("This session ends up gzipped");
    let path = logger.current_log_path();
    logger.exit()?;

    if let Some(path) = path {
        println!("   Written {}", path.with_extension("log.gz").display());
    }

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
