//! CLI command implementations
//!
//! Each command runs against one `Store` bound to the configured grid file
//! and returns the `data` part of its JSON response. `retrieve` without
//! `--quiet` or `--export` writes the content itself and returns nothing.

use std::fs;
use std::path::Path;

use serde_json::{json, Value};

use crate::config::StoreConfig;
use crate::digest::MasterDigest;
use crate::observability::{Logger, Severity};
use crate::persistence::LoadOutcome;
use crate::retrieval::Retrieval;
use crate::store::{Phase, Store, StoreError, StoreOutcome};

use super::args::{Cli, Command};
use super::errors::CliResult;
use super::io::{export_content, write_content, write_response};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    if cli.verbose {
        Logger::set_min_severity(Severity::Trace);
    }
    run_command(&cli.config, cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(config_path: &Path, cmd: Command) -> CliResult<()> {
    let config = StoreConfig::load_or_default(config_path)?;
    let default_tag = config.default_type_tag.clone();
    let mut store = Store::new(config);

    let response = match cmd {
        Command::Store { file } => Some(self::store(&mut store, &file)?),
        Command::StoreLiteral { text, type_tag } => {
            let tag = type_tag.unwrap_or(default_tag);
            Some(store_literal(&mut store, text.as_bytes(), &tag)?)
        }
        Command::StoreLiteralFile { path, type_tag } => {
            let tag = type_tag.unwrap_or(default_tag);
            let bytes = fs::read(&path).map_err(|e| StoreError::read_failed(&path, e))?;
            Some(store_literal(&mut store, &bytes, &tag)?)
        }
        Command::Note => Some(note(&mut store)?),
        Command::Retrieve { quiet, export } => retrieve(&mut store, quiet, export.as_deref())?,
        Command::Verify { digest } => Some(verify(&mut store, &digest)?),
        Command::Inspect => Some(inspect(&mut store)?),
    };

    if let Some(data) = response {
        write_response(data)?;
    }
    Ok(())
}

/// Store a file, replacing the grid content
pub fn store(store: &mut Store, file: &Path) -> CliResult<Value> {
    let outcome = store.store_file(file)?;
    Ok(outcome_json(store, &outcome))
}

/// Store bytes verbatim under a type tag
pub fn store_literal(store: &mut Store, text: &[u8], type_tag: &str) -> CliResult<Value> {
    let outcome = store.store_literal(text, type_tag)?;
    let mut data = outcome_json(store, &outcome);
    data["type"] = json!(type_tag);
    Ok(data)
}

/// Store the built-in note
pub fn note(store: &mut Store) -> CliResult<Value> {
    let outcome = store.store_note()?;
    Ok(outcome_json(store, &outcome))
}

/// Retrieve the stored content.
///
/// Returns a summary when `quiet` or `export` is set; otherwise the content
/// is written to stdout and nothing is returned.
pub fn retrieve(store: &mut Store, quiet: bool, export: Option<&Path>) -> CliResult<Option<Value>> {
    let retrieval = store.retrieve()?;
    let content = retrieval.content();

    if let Some(path) = export {
        export_content(path, &content)?;
        let mut data = retrieval_json(&retrieval, content.len());
        data["export"] = json!(path.display().to_string());
        return Ok(Some(data));
    }

    if quiet {
        return Ok(Some(retrieval_json(&retrieval, content.len())));
    }

    write_content(&content)?;
    Ok(None)
}

/// Retrieve only if the stored digest equals `expected_hex`
pub fn verify(store: &mut Store, expected_hex: &str) -> CliResult<Value> {
    let expected: MasterDigest = expected_hex.parse()?;
    let retrieval = store.retrieve_verified(&expected)?;
    let mut data = retrieval_json(&retrieval, retrieval.content().len());
    data["verified"] = json!(true);
    Ok(data)
}

/// Per-chunk placement report of the stored content
pub fn inspect(store: &mut Store) -> CliResult<Value> {
    let placements = store.placements()?;
    let state = store.state();

    Ok(json!({
        "grid_path": store.config().grid_path.display().to_string(),
        "digest": state.digest().to_hex(),
        "chunk_count": state.chunk_count(),
        "occupied_slots": state.grid().occupied_count(),
        "load": load_json(store.phase()),
        "helix_rounds": store.placement().rounds(),
        "placements": serde_json::to_value(&placements)?,
    }))
}

fn outcome_json(store: &Store, outcome: &StoreOutcome) -> Value {
    json!({
        "digest": outcome.digest.to_hex(),
        "chunks_stored": outcome.chunks_stored,
        "chunks_dropped": outcome.chunks_dropped,
        "chunk_count": store.chunk_count(),
        "grid_path": store.config().grid_path.display().to_string(),
    })
}

fn retrieval_json(retrieval: &Retrieval, bytes: usize) -> Value {
    json!({
        "digest": retrieval.digest().to_hex(),
        "chunk_count": retrieval.chunks().len(),
        "recovered": retrieval.recovered_count(),
        "missing": retrieval.missing(),
        "bytes": bytes,
    })
}

fn load_json(phase: Phase) -> Value {
    match phase {
        Phase::Loaded(LoadOutcome::Loaded { chunk_count }) => {
            json!({ "outcome": "loaded", "chunk_count": chunk_count })
        }
        Phase::Loaded(LoadOutcome::Missing) => json!({ "outcome": "missing" }),
        Phase::Loaded(LoadOutcome::ResetCorruptCount { found }) => {
            json!({ "outcome": "reset_corrupt_count", "found": found })
        }
        Phase::Loaded(LoadOutcome::ResetTruncated { length }) => {
            json!({ "outcome": "reset_truncated", "length": length })
        }
        Phase::Unloaded | Phase::Populated | Phase::Persisted => json!({ "outcome": "resident" }),
    }
}
