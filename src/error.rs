//! Error types for the circulation engine

use std::path::PathBuf;

use thiserror::Error;

/// Numeric error codes, used as the process exit status by the binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    BadValue = 2,
    BadConfiguration = 3,
    NotBorrowable = 4,
    IoFailure = 5,
    BadData = 6,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    #[error("I/O error on {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl AppError {
    /// Wrap an I/O failure with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation(_) => ErrorCode::BadValue,
            AppError::Configuration(_) => ErrorCode::BadConfiguration,
            AppError::BusinessRule(_) => ErrorCode::NotBorrowable,
            AppError::Io { .. } => ErrorCode::IoFailure,
            AppError::Serialization(_) | AppError::Csv(_) => ErrorCode::BadData,
        }
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_mentions_path() {
        let err = AppError::io(
            "reports/fines_2024-01-01.csv",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let message = err.to_string();
        assert!(message.contains("reports/fines_2024-01-01.csv"));
        assert!(message.contains("denied"));
        assert_eq!(err.code(), ErrorCode::IoFailure);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::Validation("x".into()).code() as i32, 2);
        assert_eq!(AppError::Configuration("x".into()).code() as i32, 3);
        assert_eq!(AppError::BusinessRule("x".into()).code() as i32, 4);
    }
}
