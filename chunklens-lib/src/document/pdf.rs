use lopdf::Document;
use tracing::{debug, warn};

use crate::document::{ExtractedDocument, TextExtractor};
use crate::{Error, Result};

/// PDF extractor using lopdf.
///
/// Pages are read in page-number order. Each page's text has its whitespace
/// runs collapsed to single spaces, so line breaks inside a page never look
/// like page separators. A page whose content cannot be decoded contributes
/// no text but still occupies its slot.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtractor;

impl PdfExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for PdfExtractor {
    fn name(&self) -> &str {
        "pdf"
    }

    fn extract(&self, bytes: &[u8]) -> Result<ExtractedDocument> {
        let doc = Document::load_mem(bytes).map_err(|e| Error::Extraction(e.to_string()))?;

        // BTreeMap, so keys come out in page order
        let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
        let page_texts = page_numbers.iter().map(|&page_number| {
            match doc.extract_text(&[page_number]) {
                Ok(text) => collapse_whitespace(&text),
                Err(e) => {
                    warn!(page_number, error = %e, "failed to extract page text");
                    String::new()
                }
            }
        });

        let document = ExtractedDocument::from_page_texts(page_texts);
        debug!(pages = document.pages().len(), chars = document.char_count(), "extracted pdf");
        Ok(document)
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
