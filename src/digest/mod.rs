//! Content digest for curvegrid
//!
//! The master digest is a SHA-256 fingerprint of the stored input. It is the
//! identity returned to the caller and is never consulted by placement or
//! retrieval.

use std::fmt;
use std::str::FromStr;

use sha2::{Digest, Sha256};
use thiserror::Error;

/// Size of a master digest in bytes
pub const DIGEST_LEN: usize = 32;

/// Whole-input fingerprint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MasterDigest([u8; DIGEST_LEN]);

impl MasterDigest {
    /// The all-zero digest of an empty store
    pub const ZERO: MasterDigest = MasterDigest([0u8; DIGEST_LEN]);

    /// Wraps raw digest bytes
    pub fn from_bytes(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    /// Returns the raw digest bytes
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Returns whether this is the all-zero digest
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; DIGEST_LEN]
    }

    /// Lowercase hex rendering (64 characters)
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for MasterDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Failure to parse a hex digest
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DigestParseError {
    #[error("Digest must be {expected} hex characters, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Invalid hex character at position {0}")]
    InvalidHex(usize),
}

impl FromStr for MasterDigest {
    type Err = DigestParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.len() != DIGEST_LEN * 2 {
            return Err(DigestParseError::InvalidLength {
                expected: DIGEST_LEN * 2,
                actual: s.len(),
            });
        }

        let mut bytes = [0u8; DIGEST_LEN];
        hex::decode_to_slice(s, &mut bytes).map_err(|e| match e {
            hex::FromHexError::InvalidHexCharacter { index, .. } => {
                DigestParseError::InvalidHex(index)
            }
            _ => DigestParseError::InvalidLength {
                expected: DIGEST_LEN * 2,
                actual: s.len(),
            },
        })?;
        Ok(Self(bytes))
    }
}

/// Computes the digest of `data`.
///
/// Deterministic: the same input always produces the same output.
pub fn digest(data: &[u8]) -> MasterDigest {
    let mut hasher = Sha256::new();
    hasher.update(data);
    MasterDigest(hasher.finalize().into())
}

/// Computes the digest of a type tag followed by content.
///
/// Equivalent to `digest(tag || content)`.
pub fn digest_tagged(tag: &str, content: &[u8]) -> MasterDigest {
    let mut hasher = Sha256::new();
    hasher.update(tag.as_bytes());
    hasher.update(content);
    MasterDigest(hasher.finalize().into())
}
