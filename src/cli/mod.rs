//! CLI module for reactorwatch
//!
//! Provides command-line interface for:
//! - analyze: One-shot analysis of a reactor dataset
//! - serve: HTTP upload/analysis server
//! - init: Write a default configuration file

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{analyze, init, load_config, run, run_analysis, run_command, serve, AnalyzeOptions};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_response, write_response_to};
