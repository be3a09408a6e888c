//! Database Module
//!
//! The database layer is split into two concerns:
//! - **Connection Management** (`connection.rs`): turns command-line arguments
//!   and configuration into a connection target, opens and closes it
//! - **Query Execution** (`query.rs`): the execution gateway that submits
//!   statements and streams result rows
//!
//! All operations use `HotelError` for error propagation.

pub mod connection;
pub mod query;

pub use connection::*;
pub use query::*;
