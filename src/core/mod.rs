//! Core logger types and traits

pub mod appender;
pub mod args;
pub mod config;
pub mod error;
pub mod global;
pub mod log_level;
pub mod log_record;
pub mod logger;
pub mod metrics;
pub mod table;
pub mod timestamp;

pub use appender::Appender;
pub use args::{format_args, Emission, LogArg};
pub use config::{ConfigWarning, ConsoleConfig};
pub use error::{LoggerError, Result};
pub use global::{global, install_global_override};
pub use log_level::LogLevel;
pub use log_record::LogRecord;
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use timestamp::LocaleFormat;
