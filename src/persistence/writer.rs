//! Grid file writer
//!
//! The whole state is rewritten on every save: digest, count, grid, probe
//! table, in that order. The write is flushed and fsynced before the file
//! is closed. A crash mid-write can leave a short file; the reader treats
//! that as corruption and starts empty.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::layout::FILE_SIZE;
use crate::observability::{log_event_with_fields, Event};
use crate::store::{StoreError, StoreResult, StoreState};

/// Serializes `state` into the fixed layout
pub fn encode(state: &StoreState) -> Vec<u8> {
    let mut buf = Vec::with_capacity(FILE_SIZE as usize);
    buf.extend_from_slice(state.digest().as_bytes());
    buf.extend_from_slice(&state.chunk_count().to_le_bytes());
    buf.extend_from_slice(state.grid().as_bytes());
    buf.extend_from_slice(&state.probes().to_le_bytes());
    buf
}

/// Writes `state` to `path`, replacing any existing file.
///
/// Creates the parent directory if missing. With `sync` set, the file is
/// fsynced before returning.
///
/// # Errors
///
/// Returns `CURVE_STORE_WRITE_FAILED` if the file cannot be created,
/// written, flushed or synced. The in-memory state is untouched either way.
pub fn save(path: &Path, state: &StoreState, sync: bool) -> StoreResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| StoreError::write_failed(parent, e))?;
        }
    }

    let mut file = File::create(path).map_err(|e| StoreError::write_failed(path, e))?;
    file.write_all(&encode(state))
        .and_then(|_| file.flush())
        .map_err(|e| StoreError::write_failed(path, e))?;

    if sync {
        file.sync_all().map_err(|e| StoreError::write_failed(path, e))?;
    }

    let count = state.chunk_count().to_string();
    let path_str = path.display().to_string();
    log_event_with_fields(
        Event::GridSaved,
        &[("chunk_count", &count), ("path", &path_str)],
    );

    Ok(())
}
