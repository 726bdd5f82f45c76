//! File logging example
//!
//! Demonstrates sending lines to a file appender.
//!
//! Run with: cargo run --example file_logging

use funclog::prelude::*;

fn main() -> Result<()> {
    println!("=== funclog - File Logging Example ===\n");

    let appender = FileAppender::new("application.log")?.with_auto_flush(true);
    let logger = Logger::builder()
        .name("app")
        .log_timestamp(true)
        .appender(appender)
        .build();

    println!("1. Logging to application.log:");
    logger.info("Application started", &[]);
    logger.info("Configuration loaded", &kv!["path", "/etc/app.toml", "entries", 12]);
    logger
        .with_name("db")
        .info("Database connection established", &kv!["pool_size", 8]);
    logger.error(None, "Failed to load optional plugin", &kv!["plugin", "metrics"]);

    drop(logger);

    println!("\n2. File contents:");
    let content = std::fs::read_to_string("application.log")?;
    for line in content.lines() {
        println!("   {}", line);
    }

    std::fs::remove_file("application.log")?;

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
