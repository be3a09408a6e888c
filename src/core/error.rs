//! HotelQL Error Module
//!
//! This module defines the error types for the hotelql console.
//! Input validation failures are handled locally by the prompt loop and never
//! show up here; everything in `HotelError` either abandons a single workflow
//! (statement failures) or ends the session (startup and input failures).
use thiserror::Error;

/// Error type shared by the whole application.
///
/// The variants fall into three groups:
/// - statement execution (`Database`, `Query`, `MissingReference`), which abandon one workflow
/// - startup (`Config`, `Target`), which are fatal before the menu is shown
/// - session plumbing (`Io`, `InputClosed`), which end the menu loop
#[derive(Error, Debug)]
pub enum HotelError {
    /// Errors reported by the SQLite engine
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A statement was submitted through the wrong gateway verb or returned an unexpected shape
    #[error("Query error: {0}")]
    Query(String),

    /// A row referenced by the new record does not exist
    #[error("No {relation} with {key} exists")]
    MissingReference { relation: &'static str, key: String },

    /// Configuration loading and validation errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The connection locator or command-line arguments could not be turned into a target
    #[error("Connection target error: {0}")]
    Target(String),

    /// Terminal I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The input stream reached end of file while a value was being prompted for
    #[error("Input stream closed")]
    InputClosed,
}

impl HotelError {
    /// Whether the error only abandons the current workflow, leaving the menu running.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            HotelError::Database(_) | HotelError::Query(_) | HotelError::MissingReference { .. }
        )
    }
}

/// Type alias for Result to use HotelError as the error type.
pub type Result<T> = std::result::Result<T, HotelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let db_err = HotelError::Database(rusqlite::Error::ExecuteReturnedResults);
        assert!(db_err.to_string().contains("Database error"));

        let query_err = HotelError::Query("wrong verb".to_string());
        assert!(query_err.to_string().contains("Query error"));

        let missing = HotelError::MissingReference {
            relation: "Room",
            key: "hotelID 1, roomNo 101".to_string(),
        };
        assert_eq!(missing.to_string(), "No Room with hotelID 1, roomNo 101 exists");
    }

    #[test]
    fn test_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let hotel_err: HotelError = io_err.into();
        match hotel_err {
            HotelError::Io(_) => {}
            _ => panic!("Expected IO error"),
        }
    }

    #[test]
    fn test_recoverable_classification() {
        assert!(HotelError::Query("x".into()).is_recoverable());
        assert!(HotelError::Database(rusqlite::Error::InvalidQuery).is_recoverable());
        assert!(!HotelError::InputClosed.is_recoverable());
        assert!(!HotelError::Config("bad".into()).is_recoverable());
    }
}
