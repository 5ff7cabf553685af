//! Result and error types for Vigia.

use thiserror::Error;

/// Result type for Vigia operations
pub type VigiaResult<T> = Result<T, VigiaError>;

/// Errors that can occur in Vigia
#[derive(Debug, Error)]
pub enum VigiaError {
    /// Element never met the wait condition
    #[error("Wait timed out after {ms}ms")]
    Timeout {
        /// Wait budget in milliseconds
        ms: u64,
    },

    /// Element absent when the action ran
    #[error("Element not found: {locator}")]
    NotFound {
        /// Locator that failed to resolve
        locator: String,
    },

    /// Requested INI section/key absent
    #[error("Missing config entry: [{section}] {key}")]
    MissingConfig {
        /// INI section
        section: String,
        /// Key within the section
        key: String,
    },

    /// Browser launch error
    #[error("Failed to launch browser: {message}")]
    BrowserLaunch {
        /// Error message
        message: String,
    },

    /// Navigation error
    #[error("Navigation to {url} failed: {message}")]
    Navigation {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// Driver-level error outside the wait/act taxonomy
    #[error("Session error: {message}")]
    Session {
        /// Error message
        message: String,
    },

    /// Screenshot error
    #[error("Screenshot failed: {message}")]
    Screenshot {
        /// Error message
        message: String,
    },

    /// Assertion failed
    #[error("Assertion failed: {message}")]
    AssertionFailed {
        /// Error message
        message: String,
    },

    /// Fixture error (setup/teardown failed)
    #[error("Fixture error: {message}")]
    Fixture {
        /// Error message
        message: String,
    },

    /// Data table lacks the requested column
    #[error("Data table has no column named {column:?}")]
    MissingColumn {
        /// Column name looked up
        column: String,
    },

    /// Data table lacks the requested row key
    #[error("Data table has no row keyed {key:?}")]
    MissingRow {
        /// Row key looked up
        key: String,
    },

    /// Configuration file error
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),

    /// Data table file error
    #[error("Data table error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl VigiaError {
    /// True for the two wait/act failure classes
    #[must_use]
    pub const fn is_wait_failure(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::NotFound { .. })
    }

    /// Create an assertion failure
    #[must_use]
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::AssertionFailed {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod display_tests {
        use super::*;

        #[test]
        fn test_timeout_message() {
            let err = VigiaError::Timeout { ms: 10_000 };
            assert_eq!(err.to_string(), "Wait timed out after 10000ms");
        }

        #[test]
        fn test_not_found_message() {
            let err = VigiaError::NotFound {
                locator: "name=user_name".to_string(),
            };
            assert!(err.to_string().contains("name=user_name"));
        }

        #[test]
        fn test_missing_config_message() {
            let err = VigiaError::MissingConfig {
                section: "AppData".to_string(),
                key: "url".to_string(),
            };
            assert_eq!(err.to_string(), "Missing config entry: [AppData] url");
        }

        #[test]
        fn test_missing_row_message() {
            let err = VigiaError::MissingRow {
                key: "test_create_lead_TC05".to_string(),
            };
            assert!(err.to_string().contains("test_create_lead_TC05"));
        }

        #[test]
        fn test_navigation_message() {
            let err = VigiaError::Navigation {
                url: "http://localhost:100".to_string(),
                message: "connection refused".to_string(),
            };
            assert!(err.to_string().contains("http://localhost:100"));
            assert!(err.to_string().contains("connection refused"));
        }
    }

    mod classification_tests {
        use super::*;

        #[test]
        fn test_wait_failures() {
            assert!(VigiaError::Timeout { ms: 1 }.is_wait_failure());
            assert!(VigiaError::NotFound {
                locator: "x".to_string()
            }
            .is_wait_failure());
            assert!(!VigiaError::assertion("nope").is_wait_failure());
        }

        #[test]
        fn test_io_error_from() {
            let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
            let err: VigiaError = io_err.into();
            assert!(err.to_string().contains("I/O"));
        }
    }
}
