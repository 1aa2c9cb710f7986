//! Store error types
//!
//! Error codes:
//! - CURVE_STORE_WRITE_FAILED
//! - CURVE_STORE_READ_FAILED
//! - CURVE_DIGEST_MISMATCH
//!
//! None of these is fatal to the process. Grid-full, corrupt counts and
//! missing chunks are recovered locally and never surface here.

use std::fmt;
use std::io;
use std::path::Path;

use crate::digest::MasterDigest;
use crate::observability::Severity;

/// Store error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorCode {
    /// Writing or syncing the grid file failed
    CurveStoreWriteFailed,
    /// Reading the grid file or an input file failed
    CurveStoreReadFailed,
    /// Persisted digest differs from the one requested
    CurveDigestMismatch,
}

impl StoreErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            StoreErrorCode::CurveStoreWriteFailed => "CURVE_STORE_WRITE_FAILED",
            StoreErrorCode::CurveStoreReadFailed => "CURVE_STORE_READ_FAILED",
            StoreErrorCode::CurveDigestMismatch => "CURVE_DIGEST_MISMATCH",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        Severity::Error
    }
}

impl fmt::Display for StoreErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Store error with context
#[derive(Debug)]
pub struct StoreError {
    code: StoreErrorCode,
    message: String,
    details: Option<String>,
    source: Option<io::Error>,
}

impl StoreError {
    /// Write or fsync failure on the grid file
    pub fn write_failed(path: &Path, source: io::Error) -> Self {
        Self {
            code: StoreErrorCode::CurveStoreWriteFailed,
            message: "Failed to write grid file".to_string(),
            details: Some(format!("path: {}", path.display())),
            source: Some(source),
        }
    }

    /// Read failure on the grid file or an input file
    pub fn read_failed(path: &Path, source: io::Error) -> Self {
        Self {
            code: StoreErrorCode::CurveStoreReadFailed,
            message: "Failed to read file".to_string(),
            details: Some(format!("path: {}", path.display())),
            source: Some(source),
        }
    }

    /// Persisted digest differs from the expected one
    pub fn digest_mismatch(expected: &MasterDigest, actual: &MasterDigest) -> Self {
        Self {
            code: StoreErrorCode::CurveDigestMismatch,
            message: format!("Stored content does not match digest {}", expected),
            details: Some(format!("stored_digest: {}", actual)),
            source: None,
        }
    }

    /// Returns the error code
    pub fn code(&self) -> StoreErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns additional error details
    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.code.severity(),
            self.code.code(),
            self.message
        )?;
        if let Some(ref details) = self.details {
            write!(f, " ({})", details)?;
        }
        if let Some(ref source) = self.source {
            write!(f, ": {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
