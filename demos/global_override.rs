//! Global override example
//!
//! Installs the logger behind the `log` facade so plain `log::info!` calls
//! (including those made by dependencies) go to the files and the console.
//!
//! Run with: cargo run --example global_override

use multisink_logger::{global, install_global_override, Result};

fn main() -> Result<()> {
    install_global_override(true, "en-GB")?;

    log::info!("routed through the installed logger");
    log::warn!("disk usage at {}%", 91);
    log::trace!("trace calls land at silly level");

    if let Some(logger) = global() {
        logger.table(&serde_json::json!({"written": logger.metrics().total_written()}), None);
    }

    Ok(())
}
