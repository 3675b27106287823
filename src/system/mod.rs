//! System-level modules
//!
//! Logging setup and other process-wide concerns.

pub mod logging;

pub use logging::init_logging;
