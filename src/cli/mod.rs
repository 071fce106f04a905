//! CLI module for otpdesk
//!
//! Provides command-line interface for:
//! - serve: Start the HTTP service
//! - init: Create the data directory and empty collections
//! - dump: Print a collection to stdout

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{dump, init, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::write_json;
