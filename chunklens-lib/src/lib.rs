//! chunklens - see how a document is split into RAG chunks
//!
//! # Architecture
//!
//! ```text
//! Document -> Extractor -> pages + full text
//!                               |
//! Config ---> Chunker ----> chunks
//!                               |
//!                           Projector -> per-page rectangles
//! ```
//!
//! Chunking and projection are pure functions of their inputs. Everything is
//! counted in characters, so a chunk of size 1000 is 1000 `char`s of the
//! concatenated page text.
//!
//! # Example
//!
//! ```ignore
//! use chunklens_lib::{chunk::chunk, config::parse_config, document::PlainTextExtractor, project::render};
//!
//! let document = PlainTextExtractor.extract(&bytes)?;
//! let config = parse_config(r#"{"chunkSize": 400, "overlap": 100}"#)?;
//!
//! let chunks = chunk(document.char_count(), &config);
//! let pages = render(&document, &chunks, 320.0);
//! ```

pub mod chunk;
pub mod config;
pub mod document;
pub mod error;
pub mod project;
pub mod visualizer;

pub use error::{Error, Result};
