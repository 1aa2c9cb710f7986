//! CLI module for curvegrid
//!
//! Provides command-line interface for:
//! - store / store-literal / store-literal-file / note: replace grid content
//! - retrieve: print or export the stored content
//! - verify: retrieve against an expected digest
//! - inspect: per-chunk placement report

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{inspect, note, retrieve, run, run_command, store, store_literal, verify};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{export_content, write_content, write_response};
