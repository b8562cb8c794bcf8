//! Character-window chunking
//!
//! Chunks are half-open character ranges `[start, end)` into a document's
//! full text. They carry no text of their own; the text is sliced out of the
//! document when it is needed for display.
//!
//! # Implementing a Chunker
//!
//! ```ignore
//! use chunklens_lib::chunk::{Chunk, Chunker};
//!
//! struct MyChunker { /* ... */ }
//!
//! impl Chunker for MyChunker {
//!     fn chunk(&self, total_chars: usize) -> Vec<Chunk> {
//!         // Your chunking logic here
//!         todo!()
//!     }
//!
//!     fn name(&self) -> &str {
//!         "mine"
//!     }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::config::ChunkConfig;

/// Display colors assigned to chunks in order, wrapping around.
pub const PALETTE: [&str; 7] = ["blue", "green", "yellow", "purple", "red", "indigo", "pink"];

/// A half-open character range of the full text
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct Chunk {
    /// First character of the chunk
    pub start: usize,
    /// One past the last character of the chunk
    pub end: usize,
    /// Index into [`PALETTE`]
    pub color_index: usize,
}

impl Chunk {
    /// Number of characters covered by this chunk
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if the chunk covers no characters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Palette entry for this chunk
    #[must_use]
    pub fn color(&self) -> &'static str {
        PALETTE[self.color_index % PALETTE.len()]
    }
}

/// Trait for chunking strategies
///
/// A chunker only sees the length of the text, so the output is a pure
/// function of that length and the chunker's own settings.
pub trait Chunker: Send + Sync {
    /// Split `[0, total_chars)` into ordered chunks
    fn chunk(&self, total_chars: usize) -> Vec<Chunk>;

    /// Returns the name of this chunking strategy
    fn name(&self) -> &str;
}

/// Chunk `total_chars` characters with a fixed-size window.
pub fn chunk(total_chars: usize, config: &ChunkConfig) -> Vec<Chunk> {
    FixedSizeChunker::new(*config).chunk(total_chars)
}

mod fixed;

pub use fixed::*;
