use serde::Serialize;

use crate::chunk::Chunk;
use crate::document::{ExtractedDocument, Page};
use crate::project::project;

/// One rectangle for the renderer to draw on a page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawRect {
    /// "Chunk N", numbered from 1 over the whole document
    pub label: String,
    pub top_offset: f64,
    pub height_offset: f64,
    /// Palette entry of the chunk
    pub color_class: &'static str,
    /// Full text of the chunk, not clipped to the page
    pub display_text: String,
}

/// Everything drawn on one page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView {
    pub page: Page,
    pub rects: Vec<DrawRect>,
}

/// Turn the document's chunks into per-page draw instructions.
pub fn render(document: &ExtractedDocument, chunks: &[Chunk], page_height: f64) -> Vec<PageView> {
    project(document.pages(), chunks, page_height)
        .into_iter()
        .map(|page_projection| PageView {
            page: page_projection.page,
            rects: page_projection
                .projections
                .iter()
                .map(|p| DrawRect {
                    label: format!("Chunk {}", p.chunk_index + 1),
                    top_offset: p.top,
                    height_offset: p.height,
                    color_class: p.chunk.color(),
                    display_text: document.slice(p.chunk.start, p.chunk.end).to_string(),
                })
                .collect(),
        })
        .collect()
}
