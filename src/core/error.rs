//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Unrecognised severity name
    #[error("Invalid log level: '{0}'")]
    InvalidLevel(String),

    /// File appender error with path
    #[error("File appender error for '{path}': {message}")]
    FileAppenderError { path: String, message: String },

    /// A global logger is already in place for this process
    #[error("A global logger has already been installed")]
    AlreadyInstalled,
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a file appender error
    pub fn file_appender(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FileAppenderError {
            path: path.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::file_appender("logs/info.log", "Permission denied");
        assert!(matches!(err, LoggerError::FileAppenderError { .. }));

        let err = LoggerError::InvalidLevel("verbose".to_string());
        assert!(matches!(err, LoggerError::InvalidLevel(_)));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::file_appender("logs/debug.log", "Read-only file system");
        assert_eq!(
            err.to_string(),
            "File appender error for 'logs/debug.log': Read-only file system"
        );

        let err = LoggerError::InvalidLevel("loud".to_string());
        assert_eq!(err.to_string(), "Invalid log level: 'loud'");

        assert_eq!(
            LoggerError::AlreadyInstalled.to_string(),
            "A global logger has already been installed"
        );
    }

    #[test]
    fn test_io_operation_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = LoggerError::io_operation("creating log directory", "cannot create logs", io_err);

        assert!(matches!(err, LoggerError::IoOperation { .. }));
        assert!(err.to_string().contains("creating log directory"));
        assert!(err.to_string().contains("cannot create logs"));
    }
}
