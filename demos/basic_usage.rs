//! Basic logger usage example
//!
//! Demonstrates key-value logging to the console, names, saved values,
//! verbosity levels and caller attribution.
//!
//! Run with: cargo run --example basic_usage

use funclog::prelude::*;
use funclog::{error, info};
use serde::Serialize;

#[derive(Serialize)]
struct Config {
    listen: String,
    workers: usize,
    #[serde(skip_serializing_if = "funclog::is_zero")]
    tls_cert: String,
}

#[inline(never)]
fn log_startup(logger: &Logger, config: &Config) {
    // Attribute the line to whoever called this helper
    logger.with_call_depth(1).info("configuration loaded", &kv!["config", config]);
}

fn main() {
    println!("=== funclog - Basic Usage Example ===\n");

    let logger = Logger::builder()
        .log_caller(MessageClass::All)
        .verbosity(1)
        .build()
        .with_name("demo");

    println!("1. Messages with key-value pairs:");
    logger.info("server starting", &kv!["port", 8080, "debug", false]);
    info!(logger, "the same, through the macro", "port", 8080);

    println!("\n2. Structured values and helpers:");
    let config = Config {
        listen: "0.0.0.0:8080".to_string(),
        workers: 4,
        tls_cert: String::new(),
    };
    log_startup(&logger, &config);

    println!("\n3. Derived loggers:");
    let requests = logger.with_name("http").with_values(&kv!["request_id", "abc-123"]);
    requests.info("request received", &kv!["path", "/users"]);

    println!("\n4. Verbosity (threshold 1):");
    logger.v(1).info("visible at level 1", &[]);
    logger.v(2).info("hidden at level 2", &[]);

    println!("\n5. Errors are never filtered:");
    let err = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
    error!(logger.v(5), Some(&err), "upstream unavailable", "upstream", "db:5432");

    println!("\n=== Example completed successfully! ===");
}
