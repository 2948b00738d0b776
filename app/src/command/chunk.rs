//! PDF chunking command: extract and report chunk counts.

use ragbot_rag::chunking::{PartitionStrategy, PdfChunker};
use tracing::info;

use super::load_chunker_config;

/// Input parameters for the Chunk command strategy.
#[derive(Debug, Clone)]
pub struct ChunkInput {
    /// PDF to chunk; when omitted, the first PDF in the data directory is used
    pub file: Option<String>,
    /// Directory override for resolving and searching PDFs
    pub data_dir: Option<String>,
    /// Force the plain per-page extractor
    pub fast: bool,
}

/// Strategy for executing the Chunk command.
///
/// Runs the configured partitioner over one PDF and prints extraction counts
/// by chunk kind.
#[derive(Debug, Clone, Copy)]
pub struct ChunkStrategy;

impl super::CommandStrategy for ChunkStrategy {
    type Input = ChunkInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let mut config = load_chunker_config();
        if let Some(dir) = input.data_dir {
            config.output_path = dir;
        }
        if input.fast {
            config.strategy = PartitionStrategy::Fast;
        }

        let file = match input.file {
            Some(file) => file,
            None => find_first_pdf(&config.output_path).ok_or_else(|| {
                anyhow::anyhow!("No PDF files found in {}", config.output_path)
            })?,
        };

        info!("Using PDF: {file}");

        let mut chunker = PdfChunker::new(config);
        let chunks = chunker.chunk_pdf(&file)?;

        println!("Extracted {} chunks", chunks.len());
        println!("Text chunks: {}", chunker.texts().len());
        println!("Tables: {}", chunker.tables().len());
        println!("Images: {}", chunker.images().len());

        Ok(())
    }
}

fn find_first_pdf(dir: &str) -> Option<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .ok()?
        .flatten()
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name.to_lowercase().ends_with(".pdf"))
        .collect();
    names.sort();
    names.into_iter().next()
}
