//! Fixed-size chunking of store input
//!
//! Input is cut into windows of `MAX_PAYLOAD` bytes. Each window becomes one
//! chunk with the next sequence index. Two sources are supported:
//!
//! - `ChunkSource::File`: carriage returns are stripped from every window
//!   after it is cut, so a chunk may be shorter than its window. A window
//!   made only of `\r` bytes yields no chunk and consumes no index.
//! - `ChunkSource::Literal`: bytes are taken as-is.
//!
//! Empty input yields no chunks.

use crate::layout::MAX_PAYLOAD;

/// How input bytes are normalized before chunking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkSource {
    /// File contents; `\r` bytes are dropped
    File,
    /// In-memory literal; bytes are kept verbatim
    Literal,
}

/// A bounded slice of input with its sequence index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// 0-based, contiguous sequence index
    pub index: u64,
    /// Payload bytes, at most `MAX_PAYLOAD` long, never empty
    pub payload: Vec<u8>,
}

impl Chunk {
    /// Creates a chunk. Callers are responsible for the length bound.
    pub fn new(index: u64, payload: Vec<u8>) -> Self {
        debug_assert!(payload.len() <= MAX_PAYLOAD);
        Self { index, payload }
    }

    /// Payload length in bytes
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    /// Whether the payload is empty
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}

/// Ordered, restartable iterator of chunks over a byte source
#[derive(Debug, Clone)]
pub struct Chunker<'a> {
    data: &'a [u8],
    source: ChunkSource,
    position: usize,
    next_index: u64,
}

impl<'a> Chunker<'a> {
    /// Creates a chunker over `data`
    pub fn new(data: &'a [u8], source: ChunkSource) -> Self {
        Self {
            data,
            source,
            position: 0,
            next_index: 0,
        }
    }

    /// Chunker for file contents
    pub fn file(data: &'a [u8]) -> Self {
        Self::new(data, ChunkSource::File)
    }

    /// Chunker for an in-memory literal
    pub fn literal(data: &'a [u8]) -> Self {
        Self::new(data, ChunkSource::Literal)
    }

    /// Rewinds to the first chunk. The same sequence is produced again.
    pub fn restart(&mut self) {
        self.position = 0;
        self.next_index = 0;
    }

    /// The source mode of this chunker
    pub fn source(&self) -> ChunkSource {
        self.source
    }

    fn next_window(&mut self) -> Option<&'a [u8]> {
        if self.position >= self.data.len() {
            return None;
        }
        let end = (self.position + MAX_PAYLOAD).min(self.data.len());
        let window = &self.data[self.position..end];
        self.position = end;
        Some(window)
    }
}

impl Iterator for Chunker<'_> {
    type Item = Chunk;

    fn next(&mut self) -> Option<Chunk> {
        loop {
            let window = self.next_window()?;
            let payload: Vec<u8> = match self.source {
                ChunkSource::Literal => window.to_vec(),
                ChunkSource::File => window.iter().copied().filter(|&b| b != b'\r').collect(),
            };
            if payload.is_empty() {
                continue;
            }

            let chunk = Chunk::new(self.next_index, payload);
            self.next_index += 1;
            return Some(chunk);
        }
    }
}

/// Number of chunks a literal of `len` bytes produces
pub fn literal_chunk_count(len: usize) -> usize {
    len.div_ceil(MAX_PAYLOAD)
}
