//! Error types for the Bookfinder plugin.
//!
//! This module defines the centralized error type [`BookfinderError`] and a type alias
//! [`Result`] used throughout the crate. Fetch-path errors (`Network`, `Parse`) are
//! converted to a single user-visible message at the response boundary; persistence
//! errors (`Storage`, `Io`) are logged and swallowed by the favorites store.

use thiserror::Error;

/// The main error type for Bookfinder operations.
///
/// # Examples
///
/// ```
/// use bookfinder::BookfinderError;
///
/// let err = BookfinderError::Network { status: 503 };
/// assert_eq!(err.to_string(), "HTTP 503");
/// ```
#[derive(Debug, Error)]
pub enum BookfinderError {
    /// The search endpoint answered with a non-success HTTP status.
    ///
    /// The display form (`HTTP 503`) is what the error banner shows.
    #[error("HTTP {status}")]
    Network {
        /// Status code returned by the endpoint.
        status: u16,
    },

    /// The response body could not be decoded as a search result document.
    #[error("Malformed response: {0}")]
    Parse(String),

    /// Reading or writing the favorites slot failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Automatically converts from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or application failed.
    #[error("Theme error: {0}")]
    Theme(String),
}

/// A specialized `Result` type for Bookfinder operations.
pub type Result<T> = std::result::Result<T, BookfinderError>;

#[cfg(test)]
mod tests {
    use super::BookfinderError;

    #[test]
    fn network_error_reads_like_a_status_line() {
        let err = BookfinderError::Network { status: 404 };
        assert_eq!(err.to_string(), "HTTP 404");
    }

    #[test]
    fn io_errors_convert_with_question_mark() {
        fn read_missing() -> super::Result<String> {
            Ok(std::fs::read_to_string("/definitely/not/here/bookfinder")?)
        }

        let err = read_missing().unwrap_err();
        assert!(matches!(err, BookfinderError::Io(_)));
        assert!(err.to_string().starts_with("IO error:"));
    }
}
