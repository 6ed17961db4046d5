//! Console threshold resolution from the environment
//!
//! The console sink's minimum level comes from `LOG_LEVEL`, looked up first in
//! the process environment and then in an optional `.env` file. Nothing here
//! is fatal: problems are collected as [`ConfigWarning`]s and the default
//! level is used.

use super::log_level::LogLevel;
use parking_lot::{const_mutex, Mutex};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Environment variable holding the console threshold
pub const LOG_LEVEL_VAR: &str = "LOG_LEVEL";

/// Conventional location of the environment file
pub const DEFAULT_ENV_FILE: &str = "service/.env";

/// Console threshold used when nothing is configured
pub const DEFAULT_CONSOLE_LEVEL: LogLevel = LogLevel::Debug;

/// Non-fatal problem found while configuring a logger
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// The environment file does not exist or cannot be read
    MissingEnvFile { path: PathBuf, reason: String },
    /// The environment file has a line that cannot be parsed
    MalformedEnvFile { path: PathBuf, reason: String },
    /// Neither the process environment nor the file define `LOG_LEVEL`
    LevelNotDefined,
    /// `LOG_LEVEL` is set to something that is not a level name
    InvalidLevel { value: String },
    /// The locale tag is not in the supported table
    UnknownLocale { tag: String },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigWarning::MissingEnvFile { path, reason } => write!(
                f,
                "Cannot find .env file at '{}' ({}); using defaults",
                path.display(),
                reason
            ),
            ConfigWarning::MalformedEnvFile { path, reason } => write!(
                f,
                "Cannot parse .env file at '{}' ({}); using defaults",
                path.display(),
                reason
            ),
            ConfigWarning::LevelNotDefined => write!(
                f,
                "No {} defined in environment variables; console defaults to '{}'",
                LOG_LEVEL_VAR,
                DEFAULT_CONSOLE_LEVEL.as_lowercase()
            ),
            ConfigWarning::InvalidLevel { value } => write!(
                f,
                "{}='{}' is not one of error, warn, info, debug, silly; console defaults to '{}'",
                LOG_LEVEL_VAR,
                value,
                DEFAULT_CONSOLE_LEVEL.as_lowercase()
            ),
            ConfigWarning::UnknownLocale { tag } => {
                write!(f, "Unknown locale '{}'; timestamps use ISO 8601 layout", tag)
            }
        }
    }
}

/// Key/value pairs read from an environment file
pub type EnvFileResult = std::result::Result<HashMap<String, String>, ConfigWarning>;

/// Read an environment file without touching the process environment.
pub fn read_env_file(path: &Path) -> EnvFileResult {
    let iter = dotenvy::from_path_iter(path).map_err(|e| ConfigWarning::MissingEnvFile {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut vars = HashMap::new();
    for item in iter {
        let (key, value) = item.map_err(|e| ConfigWarning::MalformedEnvFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        vars.insert(key, value);
    }
    Ok(vars)
}

/// Resolved console threshold plus anything worth warning about
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    pub level: LogLevel,
    pub warnings: Vec<ConfigWarning>,
}

impl ConsoleConfig {
    /// Resolve from the real process environment and `env_file`.
    pub fn load(env_file: &Path) -> Self {
        Self::resolve(std::env::var(LOG_LEVEL_VAR).ok(), read_env_file(env_file))
    }

    /// Resolve from already-gathered inputs.
    ///
    /// The process value wins over the file value; empty values count as
    /// undefined.
    pub fn resolve(process_value: Option<String>, env_file: EnvFileResult) -> Self {
        let mut warnings = Vec::new();

        let (file_vars, file_ok) = match env_file {
            Ok(vars) => (vars, true),
            Err(warning) => {
                warnings.push(warning);
                (HashMap::new(), false)
            }
        };

        let raw = process_value
            .filter(|v| !v.trim().is_empty())
            .or_else(|| file_vars.get(LOG_LEVEL_VAR).cloned())
            .filter(|v| !v.trim().is_empty());

        let level = match raw {
            None => {
                // An unreadable file already explains the missing level.
                if file_ok {
                    warnings.push(ConfigWarning::LevelNotDefined);
                }
                DEFAULT_CONSOLE_LEVEL
            }
            Some(value) => match value.parse::<LogLevel>() {
                Ok(level) => level,
                Err(_) => {
                    warnings.push(ConfigWarning::InvalidLevel { value });
                    DEFAULT_CONSOLE_LEVEL
                }
            },
        };

        Self { level, warnings }
    }
}

/// Warnings already printed by this process
static REPORTED: Mutex<Vec<ConfigWarning>> = const_mutex(Vec::new());

/// Print bootstrap warnings straight to stderr, each distinct one once.
///
/// Runs before any logger exists, so it cannot go through one.
pub(crate) fn report_warnings(warnings: &[ConfigWarning]) {
    for warning in unreported(warnings) {
        eprintln!("[LOGGER WARNING] {}", warning);
    }
}

fn unreported(warnings: &[ConfigWarning]) -> Vec<ConfigWarning> {
    let mut reported = REPORTED.lock();
    let mut fresh = Vec::new();
    for warning in warnings {
        if !reported.contains(warning) {
            reported.push(warning.clone());
            fresh.push(warning.clone());
        }
    }
    fresh
}
