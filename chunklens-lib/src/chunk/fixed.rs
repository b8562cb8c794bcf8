use tracing::debug;

use crate::chunk::{Chunk, Chunker, PALETTE};
use crate::config::ChunkConfig;

/// Fixed-size chunker - splits by character count
///
/// Every chunk is `chunk_size` characters long except possibly the last,
/// and consecutive chunks share `overlap` characters.
#[derive(Debug, Clone, Copy)]
pub struct FixedSizeChunker {
    config: ChunkConfig,
}

impl FixedSizeChunker {
    #[must_use]
    pub fn new(config: ChunkConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &ChunkConfig {
        &self.config
    }

    /// Number of chunks produced for `total_chars` characters.
    #[must_use]
    pub fn count(&self, total_chars: usize) -> usize {
        let overlap = self.config.overlap();
        match total_chars {
            0 => 0,
            n if n > overlap => (n - overlap).div_ceil(self.config.stride()),
            _ => 1,
        }
    }
}

impl Chunker for FixedSizeChunker {
    fn name(&self) -> &str {
        "fixed"
    }

    fn chunk(&self, total_chars: usize) -> Vec<Chunk> {
        let mut chunks = Vec::with_capacity(self.count(total_chars));
        if total_chars == 0 {
            return chunks;
        }

        // stride >= 1 is guaranteed by ChunkConfig, so start strictly grows
        let stride = self.config.stride();
        let mut start: usize = 0;
        let mut color_index = 0;
        loop {
            let end = start.saturating_add(self.config.chunk_size()).min(total_chars);
            chunks.push(Chunk {
                start,
                end,
                color_index: color_index % PALETTE.len(),
            });

            if end == total_chars {
                break;
            }

            start += stride;
            color_index += 1;
        }

        debug!(total_chars, chunks = chunks.len(), "chunked text");
        chunks
    }
}
