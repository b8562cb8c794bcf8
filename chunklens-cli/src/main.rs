//! chunklens CLI - inspect how a document is chunked
//!
//! # Commands
//!
//! ```bash
//! # List the chunks of a document
//! chunklens chunks --chunk-size 400 --overlap 100 report.pdf
//!
//! # Show which chunks land on which page
//! chunklens visualize --config chunking.json report.pdf
//!
//! # Check a config file
//! chunklens validate --config chunking.json
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use chunklens_lib::{
    config::{ChunkConfig, DEFAULT_CONFIG},
    document::{extractor_for_path, ExtractedDocument},
    project::{PageView, DEFAULT_PAGE_HEIGHT},
    visualizer::Visualizer,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

const PREVIEW_CHARS: usize = 200;

#[derive(Parser)]
#[command(name = "chunklens")]
#[command(about = "Visualize fixed-size RAG chunking over document pages")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every chunk of a document
    Chunks {
        /// Input document (.pdf, .txt, .md)
        input: PathBuf,

        #[command(flatten)]
        config: ConfigArgs,
    },

    /// Show the chunks drawn on each page
    Visualize {
        /// Input document (.pdf, .txt, .md)
        input: PathBuf,

        #[command(flatten)]
        config: ConfigArgs,

        /// Height of a page in output units
        #[arg(long, default_value_t = DEFAULT_PAGE_HEIGHT)]
        page_height: f64,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Validate a chunking config
    Validate {
        #[command(flatten)]
        config: ConfigArgs,
    },
}

#[derive(Args)]
struct ConfigArgs {
    /// JSON config file with "chunkSize" and "overlap"
    #[arg(short, long, conflicts_with_all = ["chunk_size", "overlap"])]
    config: Option<PathBuf>,

    /// Chunk size in characters
    #[arg(long, allow_negative_numbers = true)]
    chunk_size: Option<i64>,

    /// Characters shared by consecutive chunks
    #[arg(long, allow_negative_numbers = true)]
    overlap: Option<i64>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

impl ConfigArgs {
    /// Config text to hand to the visualizer. Flags go through the same
    /// validation as a file.
    async fn source(&self) -> Result<String> {
        if let Some(path) = &self.config {
            return tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("failed to read config '{}'", path.display()));
        }

        match (self.chunk_size, self.overlap) {
            (None, None) => Ok(DEFAULT_CONFIG.to_string()),
            (chunk_size, overlap) => {
                let defaults = ChunkConfig::default();
                let json = serde_json::json!({
                    "chunkSize": chunk_size.unwrap_or(defaults.chunk_size() as i64),
                    "overlap": overlap.unwrap_or(defaults.overlap() as i64),
                });
                Ok(serde_json::to_string_pretty(&json)?)
            }
        }
    }
}

async fn load(path: &Path, viz: &mut Visualizer) -> Result<()> {
    let extractor = match extractor_for_path(path) {
        Ok(extractor) => extractor,
        Err(err) => {
            viz.load_document(Err(err));
            return Ok(());
        }
    };
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read '{}'", path.display()))?;

    viz.begin_load(path.display().to_string());
    debug!(extractor = extractor.name(), bytes = bytes.len(), "extracting");
    let result = tokio::task::spawn_blocking(move || extractor.extract(&bytes))
        .await
        .context("extraction task panicked")?;
    viz.load_document(result);
    Ok(())
}

fn preview(text: &str) -> String {
    let mut preview: String = text.chars().take(PREVIEW_CHARS).collect();
    if text.chars().nth(PREVIEW_CHARS).is_some() {
        preview.push_str("...");
    }
    preview
}

fn print_chunks(input: &Path, viz: &Visualizer) {
    let document: &ExtractedDocument = viz.document();
    println!(
        "Chunked '{}' ({} pages, {} chars) into {} chunks:\n",
        input.display(),
        document.pages().len(),
        document.char_count(),
        viz.chunks().len()
    );
    for (i, chunk) in viz.chunks().iter().enumerate() {
        println!(
            "--- Chunk {} [{}..{}) {} chars, {} ---",
            i + 1,
            chunk.start,
            chunk.end,
            chunk.len(),
            chunk.color()
        );
        println!("{}\n", preview(document.slice(chunk.start, chunk.end)));
    }
}

fn print_views(views: &[PageView]) {
    for view in views {
        let page = view.page;
        println!(
            "Page {} [{}..{})",
            page.page_number,
            page.start_char_index,
            page.end_char_index()
        );
        if view.rects.is_empty() {
            println!("  (no chunks)");
        }
        for rect in &view.rects {
            let snippet: String = rect.display_text.chars().take(40).collect();
            println!(
                "  {:<10} top {:>8.2}  height {:>8.2}  {:<7} {:?}",
                rect.label,
                rect.top_offset,
                rect.height_offset,
                rect.color_class,
                snippet
            );
        }
        println!();
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Logs go to stderr; stdout is for output
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Chunks { input, config } => {
            let mut viz = Visualizer::with_config(config.source().await?);
            load(&input, &mut viz).await?;
            if let Some(err) = viz.error() {
                eprintln!("error: {err}");
                return Ok(ExitCode::FAILURE);
            }
            print_chunks(&input, &viz);
        }

        Commands::Visualize {
            input,
            config,
            page_height,
            format,
        } => {
            let mut viz = Visualizer::with_config(config.source().await?);
            load(&input, &mut viz).await?;
            if let Some(err) = viz.error() {
                eprintln!("error: {err}");
                return Ok(ExitCode::FAILURE);
            }

            let views = viz.render(page_height);
            match format {
                Format::Text => print_views(&views),
                Format::Json => println!("{}", serde_json::to_string_pretty(&views)?),
            }
        }

        Commands::Validate { config } => {
            let viz = Visualizer::with_config(config.source().await?);
            match viz.config() {
                Some(valid) => println!("{}", serde_json::to_string_pretty(valid)?),
                None => {
                    if let Some(err) = viz.error() {
                        eprintln!("error: {err}");
                    }
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chunklens_lib::config::parse_config;

    fn flags(chunk_size: Option<i64>, overlap: Option<i64>) -> ConfigArgs {
        ConfigArgs {
            config: None,
            chunk_size,
            overlap,
        }
    }

    #[tokio::test]
    async fn test_no_flags_uses_default_config() {
        let source = flags(None, None).source().await.unwrap();
        assert_eq!(source, DEFAULT_CONFIG);
    }

    #[tokio::test]
    async fn test_missing_flag_falls_back_to_default() {
        let defaults = ChunkConfig::default();

        let config = parse_config(&flags(Some(300), None).source().await.unwrap()).unwrap();
        assert_eq!(config.chunk_size(), 300);
        assert_eq!(config.overlap(), defaults.overlap());

        let config = parse_config(&flags(None, Some(10)).source().await.unwrap()).unwrap();
        assert_eq!(config.chunk_size(), defaults.chunk_size());
        assert_eq!(config.overlap(), 10);
    }

    #[tokio::test]
    async fn test_negative_flag_reaches_validation() {
        let source = flags(Some(100), Some(-1)).source().await.unwrap();
        let err = parse_config(&source).unwrap_err();
        assert_eq!(err.to_string(), "'overlap' cannot be negative.");
    }
}
