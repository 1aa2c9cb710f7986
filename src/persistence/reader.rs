//! Grid file reader
//!
//! Loading never fails on bad content, only on I/O errors:
//!
//! - No file: fresh empty state
//! - chunk_count above `CAPACITY`: state discarded, grid and probe sections
//!   are not read
//! - File shorter than the fixed layout: state discarded

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use crate::digest::{MasterDigest, DIGEST_LEN};
use crate::grid::{Grid, ProbeTable};
use crate::layout::{CAPACITY, FILE_SIZE, GRID_BYTES, GRID_OFFSET, PROBE_BYTES};
use crate::observability::{log_event_with_fields, Event};
use crate::store::{StoreError, StoreResult, StoreState};

/// What `load` found on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A valid grid file was read
    Loaded { chunk_count: u64 },
    /// No grid file exists; state is empty
    Missing,
    /// Persisted chunk_count was implausible; state reset to empty
    ResetCorruptCount { found: u64 },
    /// File shorter than the fixed layout; state reset to empty
    ResetTruncated { length: u64 },
}

impl LoadOutcome {
    /// Whether the persisted content was discarded
    pub fn was_reset(&self) -> bool {
        matches!(
            self,
            LoadOutcome::ResetCorruptCount { .. } | LoadOutcome::ResetTruncated { .. }
        )
    }
}

/// Reads the state stored at `path`.
///
/// # Errors
///
/// Returns `CURVE_STORE_READ_FAILED` if the file exists but cannot be opened
/// or read. Corrupt content is not an error; see `LoadOutcome`.
pub fn load(path: &Path) -> StoreResult<(StoreState, LoadOutcome)> {
    let path_str = path.display().to_string();

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log_event_with_fields(Event::GridLoadEmpty, &[("path", &path_str)]);
            return Ok((StoreState::empty(), LoadOutcome::Missing));
        }
        Err(e) => return Err(StoreError::read_failed(path, e)),
    };

    let length = file
        .metadata()
        .map_err(|e| StoreError::read_failed(path, e))?
        .len();

    if length < GRID_OFFSET {
        return Ok(reset_truncated(&path_str, length));
    }

    let mut reader = BufReader::new(file);

    let mut digest = [0u8; DIGEST_LEN];
    reader
        .read_exact(&mut digest)
        .map_err(|e| StoreError::read_failed(path, e))?;

    let mut count_buf = [0u8; 8];
    reader
        .read_exact(&mut count_buf)
        .map_err(|e| StoreError::read_failed(path, e))?;
    let chunk_count = u64::from_le_bytes(count_buf);

    if chunk_count > CAPACITY as u64 {
        log_event_with_fields(
            Event::GridResetCorruptCount,
            &[
                ("capacity", &CAPACITY.to_string()),
                ("chunk_count", &chunk_count.to_string()),
                ("path", &path_str),
            ],
        );
        return Ok((
            StoreState::empty(),
            LoadOutcome::ResetCorruptCount { found: chunk_count },
        ));
    }

    if length < FILE_SIZE {
        return Ok(reset_truncated(&path_str, length));
    }

    let mut grid_bytes = vec![0u8; GRID_BYTES];
    let mut probe_bytes = vec![0u8; PROBE_BYTES];
    let sections = reader
        .read_exact(&mut grid_bytes)
        .and_then(|_| reader.read_exact(&mut probe_bytes));
    match sections {
        Ok(()) => {}
        // File shrank between the size check and the read
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
            return Ok(reset_truncated(&path_str, length));
        }
        Err(e) => return Err(StoreError::read_failed(path, e)),
    }

    let (grid, probes) = match (
        Grid::from_bytes(grid_bytes),
        ProbeTable::from_le_bytes(&probe_bytes),
    ) {
        (Some(grid), Some(probes)) => (grid, probes),
        _ => return Ok(reset_truncated(&path_str, length)),
    };

    log_event_with_fields(
        Event::GridLoaded,
        &[("chunk_count", &chunk_count.to_string()), ("path", &path_str)],
    );

    let state = StoreState::from_parts(MasterDigest::from_bytes(digest), chunk_count, grid, probes);
    Ok((state, LoadOutcome::Loaded { chunk_count }))
}

fn reset_truncated(path_str: &str, length: u64) -> (StoreState, LoadOutcome) {
    log_event_with_fields(
        Event::GridResetTruncated,
        &[
            ("expected_bytes", &FILE_SIZE.to_string()),
            ("length", &length.to_string()),
            ("path", path_str),
        ],
    );
    (StoreState::empty(), LoadOutcome::ResetTruncated { length })
}
