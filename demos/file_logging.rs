//! File logging example
//!
//! Appends to an existing set of log files and shows which file each level
//! lands in.
//!
//! Run with: cargo run --example file_logging

use multisink_logger::prelude::*;
use multisink_logger::{debug, info, warn};

fn main() -> Result<()> {
    println!("=== Multisink Logger - File Logging Example ===\n");

    let logger = Logger::builder()
        .wipe(false)
        .locale("en-US")
        .log_dir("demo-logs")
        .console_level(LogLevel::Info)
        .build()?;

    info!(logger, "Application started");
    debug!(logger, "Loading configuration...");
    warn!(logger, "Using default settings for some options");

    for i in 1..=5 {
        info!(logger, "Processing item", i, "of", 5);
        if i == 3 {
            warn!(logger, "Item", i, "took longer than expected");
        }
    }

    logger.flush()?;

    println!("\n=== Example completed successfully! ===");
    for name in logger.sink_names() {
        println!("  sink: {}", name);
    }

    Ok(())
}
