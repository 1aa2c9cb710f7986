//! Output handling for CLI
//!
//! - Command results: one JSON object per line on stdout
//! - Retrieved content: raw bytes on stdout
//! - Logs never go to stdout

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde_json::Value;

use super::errors::CliResult;

/// Write a success response to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "ok",
        "data": data
    });

    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, &response)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}

/// Write raw content to stdout
pub fn write_content(content: &[u8]) -> CliResult<()> {
    let mut stdout = io::stdout();
    stdout.write_all(content)?;
    stdout.flush()?;

    Ok(())
}

/// Write content to a file, creating parent directories
pub fn export_content(path: &Path, content: &[u8]) -> CliResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, content)?;

    Ok(())
}
