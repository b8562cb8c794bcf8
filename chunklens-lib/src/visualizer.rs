//! Interactive visualizer state
//!
//! Holds the loaded document and the configuration text, and keeps the
//! chunk list in step with both. Every change recomputes the chunks from
//! scratch and replaces the previous list outright.
//!
//! # Usage
//!
//! ```ignore
//! use chunklens_lib::{document::PlainTextExtractor, visualizer::Visualizer};
//!
//! let mut viz = Visualizer::new();
//! viz.begin_load("notes.txt");
//! viz.load_document(PlainTextExtractor.extract(&bytes));
//! viz.set_config(r#"{"chunkSize": 400, "overlap": 100}"#)?;
//!
//! for view in viz.render(320.0) {
//!     println!("Page {}: {} chunks", view.page.page_number, view.rects.len());
//! }
//! ```

use tracing::{debug, info, warn};

use crate::chunk::{Chunk, Chunker, FixedSizeChunker};
use crate::config::{parse_config, ChunkConfig, DEFAULT_CONFIG};
use crate::document::{ExtractedDocument, Page};
use crate::project::{render, PageView};
use crate::{Error, Result};

/// Document, configuration and derived chunks for one visualizer session.
#[derive(Debug, Clone)]
pub struct Visualizer {
    document: ExtractedDocument,
    config_source: String,
    config: Option<ChunkConfig>,
    chunks: Vec<Chunk>,
    error: Option<Error>,
    source_name: Option<String>,
    loading: bool,
}

impl Visualizer {
    /// Start with the default configuration and no document.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DEFAULT_CONFIG)
    }

    /// Start with the given configuration text and no document.
    ///
    /// An invalid configuration is recorded as the current error.
    #[must_use]
    pub fn with_config(source: impl Into<String>) -> Self {
        let mut viz = Self {
            document: ExtractedDocument::empty(),
            config_source: source.into(),
            config: None,
            chunks: Vec::new(),
            error: None,
            source_name: None,
            loading: false,
        };
        viz.apply_config();
        viz
    }

    /// Replace the configuration text.
    ///
    /// On success the error is cleared and the chunks are recomputed. On
    /// failure the error is recorded and the chunk list is emptied.
    pub fn set_config(&mut self, source: impl Into<String>) -> Result<ChunkConfig> {
        self.config_source = source.into();
        self.apply_config();
        match (self.config, &self.error) {
            (Some(config), _) => Ok(config),
            (None, Some(err)) => Err(err.clone()),
            (None, None) => Err(Error::ConfigParse(self.config_source.clone())),
        }
    }

    fn apply_config(&mut self) {
        match parse_config(&self.config_source) {
            Ok(config) => {
                self.config = Some(config);
                self.error = None;
                self.recompute();
            }
            Err(err) => {
                warn!(error = %err, "rejected chunk config");
                self.config = None;
                self.error = Some(err);
                self.chunks.clear();
            }
        }
    }

    /// Mark a document load as started, dropping the current document.
    ///
    /// A configuration error outlives the load, since the text that caused
    /// it has not changed.
    pub fn begin_load(&mut self, source_name: impl Into<String>) {
        self.loading = true;
        self.source_name = Some(source_name.into());
        if self.config.is_some() {
            self.error = None;
        }
        self.document = ExtractedDocument::empty();
        self.chunks.clear();
    }

    /// Finish a document load with the extractor's result.
    ///
    /// A successful load clears any earlier load error. A failed extraction
    /// leaves the session with no document and the extraction error
    /// recorded.
    pub fn load_document(&mut self, result: Result<ExtractedDocument>) {
        self.loading = false;
        match result {
            Ok(document) => {
                info!(
                    pages = document.pages().len(),
                    chars = document.char_count(),
                    "loaded document"
                );
                self.document = document;
                if self.config.is_some() {
                    self.error = None;
                }
                self.recompute();
            }
            Err(err) => {
                warn!(error = %err, "failed to load document");
                self.document = ExtractedDocument::empty();
                self.chunks.clear();
                self.error = Some(err);
            }
        }
    }

    /// Drop the document and any error, keeping the configuration text.
    pub fn reset(&mut self) {
        self.document = ExtractedDocument::empty();
        self.chunks.clear();
        self.error = None;
        self.source_name = None;
        self.loading = false;
        self.apply_config();
    }

    fn recompute(&mut self) {
        self.chunks = match self.config {
            Some(config) if !self.document.is_empty() => {
                FixedSizeChunker::new(config).chunk(self.document.char_count())
            }
            _ => Vec::new(),
        };
        debug!(chunks = self.chunks.len(), "recomputed chunks");
    }

    /// Per-page draw instructions for the current document and chunks.
    #[must_use]
    pub fn render(&self, page_height: f64) -> Vec<PageView> {
        render(&self.document, &self.chunks, page_height)
    }

    #[must_use]
    pub fn document(&self) -> &ExtractedDocument {
        &self.document
    }

    #[must_use]
    pub fn pages(&self) -> &[Page] {
        self.document.pages()
    }

    #[must_use]
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// The last validated configuration, if the current text is valid
    #[must_use]
    pub fn config(&self) -> Option<&ChunkConfig> {
        self.config.as_ref()
    }

    #[must_use]
    pub fn config_source(&self) -> &str {
        &self.config_source
    }

    /// The message to show the user, if any
    #[must_use]
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// Name of the document passed to the last `begin_load`
    #[must_use]
    pub fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }
}

impl Default for Visualizer {
    fn default() -> Self {
        Self::new()
    }
}
