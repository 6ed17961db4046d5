//! Another `log` backend owns the facade before ours is installed.
//! Runs in its own process because the facade can only be set once.

use multisink_logger::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;

struct CountingBackend {
    seen: AtomicUsize,
}

impl log::Log for CountingBackend {
    fn enabled(&self, _metadata: &log::Metadata<'_>) -> bool {
        true
    }

    fn log(&self, _record: &log::Record<'_>) {
        self.seen.fetch_add(1, Ordering::SeqCst);
    }

    fn flush(&self) {}
}

static FOREIGN: CountingBackend = CountingBackend {
    seen: AtomicUsize::new(0),
};

#[test]
fn test_install_fails_cleanly_when_facade_is_taken() {
    log::set_logger(&FOREIGN).expect("foreign backend installs first");
    log::set_max_level(log::LevelFilter::Trace);

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let result = Logger::builder()
        .log_dir(temp_dir.path())
        .console_level(LogLevel::Error)
        .console_writer(Box::new(std::io::sink()))
        .install_global();

    assert!(matches!(result, Err(LoggerError::AlreadyInstalled)));
    assert!(global().is_none(), "rejected logger must not be reachable");

    log::info!("still goes to the foreign backend");
    assert_eq!(FOREIGN.seen.load(Ordering::SeqCst), 1);

    // Nothing was installed, so a later attempt fails the same way.
    let retry = Logger::builder()
        .log_dir(temp_dir.path())
        .console_level(LogLevel::Error)
        .console_writer(Box::new(std::io::sink()))
        .install_global();
    assert!(matches!(retry, Err(LoggerError::AlreadyInstalled)));
    assert!(global().is_none());
}
