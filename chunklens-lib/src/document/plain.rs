use tracing::debug;

use crate::document::{ExtractedDocument, TextExtractor};
use crate::{Error, Result};

/// Page break character used by `pdftotext` and friends
pub const FORM_FEED: char = '\x0c';

/// Plain-text extractor - one page per form-feed separated section
///
/// A file without form feeds is a single page. A single trailing form feed
/// ends the last page rather than starting an empty one.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

impl PlainTextExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for PlainTextExtractor {
    fn name(&self) -> &str {
        "plain"
    }

    fn extract(&self, bytes: &[u8]) -> Result<ExtractedDocument> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| Error::Extraction(format!("document is not valid UTF-8: {e}")))?;
        let text = text.strip_suffix(FORM_FEED).unwrap_or(text);

        let document = ExtractedDocument::from_page_texts(text.split(FORM_FEED));
        debug!(pages = document.pages().len(), chars = document.char_count(), "extracted plain text");
        Ok(document)
    }
}
