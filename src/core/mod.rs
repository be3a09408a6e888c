//! Core Module for hotelql
//!
//! Shared infrastructure: the error type and the database layer that every
//! workflow goes through.

pub mod db;
pub mod error;

// Re-export commonly used types for convenience
pub use error::{HotelError, Result};
