//! Error handling and custom error types
//!
//! Provides unified error handling across the application using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Shown when the form is missing a topic or has no documents attached.
pub const VALIDATION_MESSAGE: &str = "Vui lòng nhập chủ đề và tải lên ít nhất một tài liệu.";

/// Shown for every failure after validation passed.
pub const GENERIC_FAILURE_MESSAGE: &str =
    "Đã xảy ra lỗi khi tạo kế hoạch bài giảng. Vui lòng thử lại.";

#[derive(Error, Debug)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Completion service error: {0}")]
    Service(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invariant violation: {0}")]
    Invariant(String),
}

impl Error {
    /// The message a teacher sees for this failure.
    ///
    /// Validation problems get their own fixed message; everything else
    /// collapses to one retry-suggesting message without naming the file or
    /// the upstream cause.
    pub fn user_message(&self) -> &'static str {
        match self {
            Error::Validation(_) => VALIDATION_MESSAGE,
            _ => GENERIC_FAILURE_MESSAGE,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_has_dedicated_message() {
        let err = Error::Validation("topic is empty".to_string());
        assert_eq!(err.user_message(), VALIDATION_MESSAGE);
    }

    #[test]
    fn test_read_and_service_share_generic_message() {
        let read = Error::Read {
            path: PathBuf::from("missing.pdf"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        let service = Error::Service("quota exceeded".to_string());

        assert_eq!(read.user_message(), GENERIC_FAILURE_MESSAGE);
        assert_eq!(service.user_message(), GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn test_read_error_names_path() {
        let err = Error::Read {
            path: PathBuf::from("docs/bai-1.pdf"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert!(err.to_string().contains("docs/bai-1.pdf"));
    }
}
