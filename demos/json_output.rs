//! JSON output example
//!
//! Demonstrates JSON lines, timestamps, custom log representations and a
//! plain callback sink.
//!
//! Run with: cargo run --example json_output

use funclog::prelude::*;
use serde::Serialize;

#[derive(Serialize)]
struct ApiKey {
    owner: String,
    key: String,
}

impl Loggable for ApiKey {
    fn marshal_log(&self) -> Option<Value> {
        Some(Value::Object(vec![
            ("owner".to_string(), Value::String(self.owner.clone())),
            ("key".to_string(), Value::String("****".to_string())),
        ]))
    }
}

fn main() {
    println!("=== funclog - JSON Output Example ===\n");

    println!("1. JSON lines with timestamps:");
    let logger = Logger::builder()
        .output_format(OutputFormat::Json)
        .log_timestamp(true)
        .timestamp_format(TimestampFormat::Rfc3339)
        .build()
        .with_name("billing");
    logger.info("invoice created", &kv!["invoice", 1042, "amount", 99.5, "currency", "EUR"]);

    println!("\n2. Custom log representation:");
    let key = ApiKey {
        owner: "ann".to_string(),
        key: "sk_live_123".to_string(),
    };
    logger.info("key rotated", &kv!["key", key, "history", vec![Hooked(&key)]]);

    println!("\n3. A bare callback sink:");
    let sink = FuncSink::json(|obj| println!("callback got: {}", obj), Options::default());
    let plain = Logger::new(sink);
    plain.error(None, "no error value", &kv!["attempt", 3]);

    println!("\n4. Options from JSON:");
    match Options::from_json(r#"{"log_caller":"all","verbosity":2}"#) {
        Ok(options) => {
            let configured = Logger::builder()
                .output_format(OutputFormat::Json)
                .options(options)
                .build();
            configured.v(2).info("configured from JSON", &[]);
        }
        Err(e) => eprintln!("invalid options: {}", e),
    }

    println!("\n=== Example completed successfully! ===");
}
