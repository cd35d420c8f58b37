//! CLI module
//!
//! Command-line interface for the source.
//!
//! # Commands
//!
//! - `spec` - Show the configuration schema
//! - `check` - Test connection to the API
//! - `discover` - List available streams
//! - `read` - Extract records from streams

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
