//! Projecting chunks onto pages
//!
//! A chunk's character range is clipped to each page it overlaps, and the
//! clipped slice is expressed as a vertical band of that page: `top` and
//! `height` are fractions of the page's character count scaled by the page
//! height in whatever units the renderer draws in.
//!
//! ```text
//! page [0, 100), height 320
//! chunk [20, 70)  ->  top 64, height 160
//! ```
//!
//! Projections are recomputed from scratch whenever pages or chunks change.

use serde::Serialize;

use crate::chunk::Chunk;
use crate::document::Page;

/// Default page height, in the renderer's units
pub const DEFAULT_PAGE_HEIGHT: f64 = 320.0;

/// The visible slice of one chunk on one page
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    /// Position of the chunk in the master chunk list
    pub chunk_index: usize,
    /// The chunk itself, unclipped
    pub chunk: Chunk,
    /// Offset of the visible slice from the top of the page
    pub top: f64,
    /// Height of the visible slice
    pub height: f64,
}

/// All projections that land on one page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageProjection {
    pub page: Page,
    pub projections: Vec<Projection>,
}

/// Project every chunk onto every page.
///
/// Every page appears in the output, in input order, even when no chunk
/// reaches it.
pub fn project(pages: &[Page], chunks: &[Chunk], page_height: f64) -> Vec<PageProjection> {
    pages
        .iter()
        .map(|page| PageProjection {
            page: *page,
            projections: project_page(page, chunks, page_height),
        })
        .collect()
}

/// Project the chunks that overlap `page`, keeping their master order.
///
/// A page with no characters has nothing to scale against and receives no
/// projections.
pub fn project_page(page: &Page, chunks: &[Chunk], page_height: f64) -> Vec<Projection> {
    if page.char_count == 0 {
        return Vec::new();
    }

    let page_start = page.start_char_index;
    let page_end = page.end_char_index();
    let scale = page_height / page.char_count as f64;

    chunks
        .iter()
        .enumerate()
        .filter(|(_, chunk)| page.overlaps(chunk.start, chunk.end))
        .map(|(chunk_index, chunk)| {
            let visible_start = chunk.start.max(page_start);
            let visible_end = chunk.end.min(page_end);
            Projection {
                chunk_index,
                chunk: *chunk,
                top: (visible_start - page_start) as f64 * scale,
                height: (visible_end - visible_start) as f64 * scale,
            }
        })
        .collect()
}

mod render;

pub use render::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::{Chunker, FixedSizeChunker};
    use crate::config::ChunkConfig;

    fn page(page_number: usize, start_char_index: usize, char_count: usize) -> Page {
        Page {
            page_number,
            start_char_index,
            char_count,
        }
    }

    fn chunk(start: usize, end: usize) -> Chunk {
        Chunk {
            start,
            end,
            color_index: 0,
        }
    }

    #[test]
    fn test_fractions() {
        let projections = project_page(&page(1, 0, 100), &[chunk(20, 70)], 320.0);

        assert_eq!(projections.len(), 1);
        assert!((projections[0].top - 64.0).abs() < 1e-9);
        assert!((projections[0].height - 160.0).abs() < 1e-9);
    }

    #[test]
    fn test_touching_boundary_excluded() {
        let p = page(1, 0, 100);
        assert!(project_page(&p, &[chunk(100, 200)], 320.0).is_empty());

        let p = page(2, 100, 100);
        assert!(project_page(&p, &[chunk(0, 100)], 320.0).is_empty());
    }

    #[test]
    fn test_chunk_clipped_to_page() {
        let p = page(2, 100, 50);
        let projections = project_page(&p, &[chunk(80, 120), chunk(140, 300)], 100.0);

        assert_eq!(projections.len(), 2);
        // [100, 120) of a 50-char page
        assert!((projections[0].top - 0.0).abs() < 1e-9);
        assert!((projections[0].height - 40.0).abs() < 1e-9);
        // [140, 150)
        assert!((projections[1].top - 80.0).abs() < 1e-9);
        assert!((projections[1].height - 20.0).abs() < 1e-9);
        // unclipped chunk is kept for display text
        assert_eq!(projections[1].chunk, chunk(140, 300));
    }

    #[test]
    fn test_empty_page_has_no_projections() {
        let p = page(3, 40, 0);
        assert!(project_page(&p, &[chunk(0, 100)], 320.0).is_empty());
    }

    #[test]
    fn test_every_page_listed_in_order() {
        let pages = [page(1, 0, 10), page(2, 10, 0), page(3, 10, 10)];
        let result = project(&pages, &[chunk(0, 5)], 320.0);

        let numbers: Vec<_> = result.iter().map(|p| p.page.page_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(result[0].projections.len(), 1);
        assert!(result[1].projections.is_empty());
        assert!(result[2].projections.is_empty());
    }

    #[test]
    fn test_master_order_and_indices_preserved() {
        let config = ChunkConfig::new(40, 10).unwrap();
        let chunks = FixedSizeChunker::new(config).chunk(200);
        let pages = [page(1, 0, 100), page(2, 100, 100)];

        let result = project(&pages, &chunks, 320.0);

        // chunks: [0,40) [30,70) [60,100) [90,130) [120,160) [150,190) [180,200)
        let first: Vec<_> = result[0].projections.iter().map(|p| p.chunk_index).collect();
        let second: Vec<_> = result[1].projections.iter().map(|p| p.chunk_index).collect();
        assert_eq!(first, vec![0, 1, 2, 3]);
        assert_eq!(second, vec![3, 4, 5, 6]);
    }

    #[test]
    fn test_slices_fill_the_page_without_overlap() {
        let config = ChunkConfig::new(25, 0).unwrap();
        let chunks = FixedSizeChunker::new(config).chunk(100);
        let result = project_page(&page(1, 0, 100), &chunks, 200.0);

        let total: f64 = result.iter().map(|p| p.height).sum();
        assert!((total - 200.0).abs() < 1e-9);
        for pair in result.windows(2) {
            assert!((pair[0].top + pair[0].height - pair[1].top).abs() < 1e-9);
        }
    }
}
