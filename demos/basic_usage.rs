//! Basic logger usage example
//!
//! Demonstrates the standard topology, variadic arguments and tables.
//!
//! Run with: cargo run --example basic_usage

use multisink_logger::prelude::*;
use multisink_logger::{debug, error, info, silly, warn};
use serde_json::json;

fn main() -> Result<()> {
    println!("=== Multisink Logger - Basic Usage Example ===\n");

    // Files go to ./logs, the console threshold comes from LOG_LEVEL
    let logger = Logger::new(true, "en-GB")?;

    println!("1. Logging at different levels:");
    silly!(logger, "This is a silly message");
    debug!(logger, "This is a debug message");
    info!(logger, "This is an info message");
    warn!(logger, "This is a warning message");
    error!(logger, "This is an error message");

    println!("\n2. Mixing arguments:");
    info!(logger, "user", 42, "signed in", json!({"plan": "pro", "seats": 5}), "welcome mail queued");

    println!("\n3. Tables (console only):");
    logger.table(
        &json!([
            {"route": "/health", "hits": 120},
            {"route": "/login", "hits": 7, "errors": 1}
        ]),
        None,
    );

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
