//! CLI command implementations

mod account;
mod config_gen;

pub use account::*;
pub use config_gen::*;
