//! Process-wide installation through the `log` facade
//!
//! Installing routes every `log::error!` .. `log::trace!` call in the process
//! (including those from dependencies) through a [`Logger`]. Installation is
//! an explicit, one-shot step: it lasts for the rest of the process and is
//! never rolled back. Building a `Logger` never installs it.
//!
//! `log::Level::Trace` maps to [`LogLevel::Silly`].

use super::{
    args::LogArg,
    error::{LoggerError, Result},
    log_level::LogLevel,
    logger::{Logger, LoggerBuilder},
};
use once_cell::sync::OnceCell;
use parking_lot::{const_mutex, Mutex};

static GLOBAL: OnceCell<&'static Logger> = OnceCell::new();

/// Held across the whole install so the already-installed check and the
/// build that opens the log files cannot interleave.
static INSTALL_LOCK: Mutex<()> = const_mutex(());

/// Build the standard logger and install it as the process-wide backend.
///
/// Fails with [`LoggerError::AlreadyInstalled`] if a global logger (ours or
/// any other `log` implementation) is already in place.
///
/// ```no_run
/// multisink_logger::install_global_override(true, "en-GB")?;
/// log::info!("routed to logs/info.log and the console");
/// # Ok::<(), multisink_logger::LoggerError>(())
/// ```
pub fn install_global_override(wipe: bool, locale: &str) -> Result<()> {
    Logger::builder().wipe(wipe).locale(locale).install_global()?;
    Ok(())
}

/// The installed logger, if [`install_global_override`] has run.
pub fn global() -> Option<&'static Logger> {
    GLOBAL.get().copied()
}

fn install(builder: LoggerBuilder) -> Result<&'static Logger> {
    let _guard = INSTALL_LOCK.lock();

    // Checked before building: building reopens and may truncate the files.
    if GLOBAL.get().is_some() {
        return Err(LoggerError::AlreadyInstalled);
    }

    let logger: &'static Logger = Box::leak(Box::new(builder.build()?));

    // The facade is the real gate: another backend may hold it.
    if log::set_logger(logger).is_err() {
        if let Err(e) = logger.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush rejected logger: {}", e);
        }
        return Err(LoggerError::AlreadyInstalled);
    }
    log::set_max_level(
        logger
            .max_level()
            .map_or(log::LevelFilter::Off, log::LevelFilter::from),
    );

    GLOBAL
        .set(logger)
        .map_err(|_| LoggerError::AlreadyInstalled)?;
    Ok(logger)
}

impl LoggerBuilder {
    /// Build and install as the process-wide `log` backend.
    ///
    /// Nothing is built, and no file is touched, when a logger from this
    /// crate is already installed.
    pub fn install_global(self) -> Result<&'static Logger> {
        install(self)
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        Logger::enabled(self, LogLevel::from(metadata.level()))
    }

    fn log(&self, record: &log::Record<'_>) {
        let level = LogLevel::from(record.level());
        if !Logger::enabled(self, level) {
            return;
        }
        self.log_at(level, [LogArg::Text(record.args().to_string())]);
    }

    fn flush(&self) {
        if let Err(e) = Logger::flush(self) {
            eprintln!("[LOGGER ERROR] Failed to flush: {}", e);
        }
    }
}
