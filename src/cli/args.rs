//! CLI argument definitions using clap
//!
//! Commands:
//! - otpdesk serve [--config <path>] [--port <port>]
//! - otpdesk init [--config <path>]
//! - otpdesk dump --collection <login-attempts|users> [--config <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::store::Collection;

/// otpdesk - login, OTP verification and user records over JSON files
#[derive(Parser, Debug)]
#[command(name = "otpdesk")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP service
    Serve {
        /// Path to a JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Port to bind, overrides the config file and PORT
        #[arg(long)]
        port: Option<u16>,
    },

    /// Create the data directory and both collection files
    Init {
        /// Path to a JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print a collection as JSON
    Dump {
        /// Collection to print: login-attempts or users
        #[arg(long)]
        collection: Collection,

        /// Path to a JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
