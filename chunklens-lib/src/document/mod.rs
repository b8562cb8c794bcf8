//! Documents as pages over one concatenated text
//!
//! An extractor turns a source file into an [`ExtractedDocument`]: the full
//! text of every page joined together, plus one [`Page`] per source page
//! recording which character range of that text the page owns.
//!
//! Each page's text is followed by [`PAGE_SEPARATOR`], and the separator is
//! counted as part of that page. The pages therefore tile the full text:
//!
//! ```text
//! page 1: [0, 12)    "first page\n\n"
//! page 2: [12, 25)   "second page\n\n"
//! ```
//!
//! All offsets and lengths count `char`s, not bytes.

use std::iter;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Appended after the text of every page
pub const PAGE_SEPARATOR: &str = "\n\n";

/// One page of the source document
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// 1-based page number
    pub page_number: usize,
    /// Offset of the page's first character in the full text
    pub start_char_index: usize,
    /// Characters owned by this page, separator included
    pub char_count: usize,
}

impl Page {
    /// One past the page's last character
    #[must_use]
    pub fn end_char_index(&self) -> usize {
        self.start_char_index + self.char_count
    }

    /// Whether `[start, end)` shares at least one character with this page.
    ///
    /// Ranges that only touch the page boundary do not overlap it.
    #[must_use]
    pub fn overlaps(&self, start: usize, end: usize) -> bool {
        start < self.end_char_index() && end > self.start_char_index
    }
}

/// Pages plus the concatenated text they index into
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedDocument {
    pages: Vec<Page>,
    text: String,
    // byte offset of every char, plus text.len() at the end
    char_offsets: Vec<usize>,
}

impl ExtractedDocument {
    /// A document with no pages and no text
    #[must_use]
    pub fn empty() -> Self {
        Self {
            pages: Vec::new(),
            text: String::new(),
            char_offsets: vec![0],
        }
    }

    /// Build a document from the text of each page, in page order.
    pub fn from_page_texts<I, S>(page_texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let separator_chars = PAGE_SEPARATOR.chars().count();
        let mut text = String::new();
        let mut pages = Vec::new();
        let mut start_char_index = 0;

        for (i, page_text) in page_texts.into_iter().enumerate() {
            let page_text = page_text.as_ref();
            text.push_str(page_text);
            text.push_str(PAGE_SEPARATOR);

            let char_count = page_text.chars().count() + separator_chars;
            pages.push(Page {
                page_number: i + 1,
                start_char_index,
                char_count,
            });
            start_char_index += char_count;
        }

        Self::from_parts(pages, text)
    }

    /// Build a document from pages produced elsewhere.
    ///
    /// Fails unless the pages are numbered `1..=n`, tile the text without
    /// gaps, and account for every character of it.
    pub fn new(pages: Vec<Page>, text: String) -> Result<Self> {
        let mut expected_start = 0;
        for (i, page) in pages.iter().enumerate() {
            if page.page_number != i + 1 {
                return Err(Error::Extraction(format!(
                    "page {} is out of order (expected page {})",
                    page.page_number,
                    i + 1
                )));
            }
            if page.start_char_index != expected_start {
                return Err(Error::Extraction(format!(
                    "page {} starts at {} but the previous page ends at {}",
                    page.page_number, page.start_char_index, expected_start
                )));
            }
            expected_start = page.end_char_index();
        }

        let total = text.chars().count();
        if expected_start != total {
            return Err(Error::Extraction(format!(
                "pages cover {expected_start} characters but the text has {total}"
            )));
        }

        Ok(Self::from_parts(pages, text))
    }

    fn from_parts(pages: Vec<Page>, text: String) -> Self {
        let char_offsets = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(iter::once(text.len()))
            .collect();
        Self {
            pages,
            text,
            char_offsets,
        }
    }

    #[must_use]
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// The concatenated text of all pages
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length of the full text in characters
    #[must_use]
    pub fn char_count(&self) -> usize {
        self.char_offsets.len() - 1
    }

    /// Returns `true` if the document has no pages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Characters `[start, end)` of the full text, clamped to its length.
    #[must_use]
    pub fn slice(&self, start: usize, end: usize) -> &str {
        let end = end.min(self.char_count());
        let start = start.min(end);
        &self.text[self.char_offsets[start]..self.char_offsets[end]]
    }
}

impl Default for ExtractedDocument {
    fn default() -> Self {
        Self::empty()
    }
}

/// Turns the raw bytes of a source document into pages of text
pub trait TextExtractor: Send + Sync {
    /// Extract every page of the document
    fn extract(&self, bytes: &[u8]) -> Result<ExtractedDocument>;

    /// Returns the name of this extractor
    fn name(&self) -> &str;
}

/// Pick an extractor from the file extension.
pub fn extractor_for_path(path: &Path) -> Result<Box<dyn TextExtractor>> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "pdf" => Ok(Box::new(PdfExtractor::new())),
        "txt" | "text" | "md" => Ok(Box::new(PlainTextExtractor::new())),
        _ => Err(Error::UnsupportedFormat(path.display().to_string())),
    }
}

mod pdf;
mod plain;

pub use pdf::*;
pub use plain::*;
