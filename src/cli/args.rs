//! CLI argument definitions using clap
//!
//! Commands:
//! - curvegrid store <file>
//! - curvegrid store-literal <text> [--type T]
//! - curvegrid store-literal-file <path> [--type T]
//! - curvegrid note
//! - curvegrid retrieve [--quiet] [--export <path>]
//! - curvegrid verify <digest>
//! - curvegrid inspect

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// curvegrid - content-addressed chunk store on a fixed 4096-slot grid
#[derive(Parser, Debug)]
#[command(name = "curvegrid")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, global = true, default_value = "./curvegrid.json")]
    pub config: PathBuf,

    /// Log every chunk placement
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Store a file, replacing the grid content
    Store {
        /// File to store
        file: PathBuf,
    },

    /// Store a text literal under a type tag
    StoreLiteral {
        /// Text to store
        text: String,

        /// Type tag mixed into the digest
        #[arg(long = "type")]
        type_tag: Option<String>,
    },

    /// Store a file's bytes verbatim under a type tag
    StoreLiteralFile {
        /// File whose bytes are stored
        path: PathBuf,

        /// Type tag mixed into the digest
        #[arg(long = "type")]
        type_tag: Option<String>,
    },

    /// Store the built-in note
    Note,

    /// Print the stored content
    Retrieve {
        /// Print a JSON summary instead of the content
        #[arg(long)]
        quiet: bool,

        /// Write the content to a file instead of stdout
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// Retrieve only if the stored digest matches
    Verify {
        /// Expected digest, 64 hex characters
        digest: String,
    },

    /// Show per-chunk placement of the stored content
    Inspect,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
