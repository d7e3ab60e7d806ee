//! Page and session errors.

use thiserror::Error;

/// Failure of a page primitive (transport or protocol level).
///
/// Absence of an element is never a `PageError`.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("Browser transport error: {0}")]
    Transport(String),

    #[error("Script evaluation failed: {0}")]
    Script(String),

    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("Screenshot failed: {0}")]
    Screenshot(String),

    #[error("Page closed")]
    Closed,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure to acquire or release a browser session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Browser not found: {0}")]
    BrowserNotFound(String),

    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    #[error("Failed to connect to browser: {0}")]
    ConnectionFailed(String),

    #[error("Failed to release session: {0}")]
    ReleaseFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_error_display() {
        let err = PageError::Script("ReferenceError".to_string());
        assert_eq!(err.to_string(), "Script evaluation failed: ReferenceError");
        assert_eq!(PageError::Closed.to_string(), "Page closed");
    }

    #[test]
    fn test_page_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: PageError = io_err.into();
        assert!(err.to_string().contains("read-only"));
    }

    #[test]
    fn test_session_error_display() {
        let err = SessionError::LaunchFailed("exit code 1".to_string());
        assert_eq!(err.to_string(), "Failed to launch browser: exit code 1");
    }
}
