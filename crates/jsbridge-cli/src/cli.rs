//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command-line arguments for the jsbridge CLI
#[derive(Debug, Parser)]
#[command(name = "jsbridge")]
#[command(about = "Evaluate scripts against configured read-only globals and proxies", long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// TOML configuration file
    #[arg(short, long, global = true, help = "Path to a TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Timeout override in milliseconds
    #[arg(long, global = true, help = "Execution timeout in milliseconds (overrides config)")]
    pub timeout_ms: Option<u64>,
}

/// Available subcommands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Execute a script file
    #[command(about = "Execute a script file and print its result as JSON")]
    Run {
        /// Script to execute
        #[arg(help = "Path to the script")]
        file: PathBuf,
    },

    /// Execute inline code
    #[command(about = "Execute inline code and print its result as JSON")]
    Eval {
        /// Code to execute
        #[arg(help = "JavaScript source")]
        code: String,
    },

    /// Describe a value
    #[command(about = "Report whether a value is callable, its type and its JSON form")]
    Inspect {
        /// Code producing the value
        #[arg(help = "JavaScript expression")]
        code: String,
    },

    /// Print the effective configuration
    #[command(about = "Print the effective configuration as TOML")]
    Config,
}
