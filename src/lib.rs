// Core infrastructure modules
pub mod config;
pub mod core;

// Console modules
pub mod menu;
pub mod prompt;
pub mod results_grid;
pub mod session;
pub mod statements;
pub mod workflows;

#[doc(hidden)]
pub mod test_utils;
