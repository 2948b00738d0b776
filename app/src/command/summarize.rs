//! Summarization command: chunk a PDF and batch-summarize its text.

use ragbot_rag::chunking::PdfChunker;
use ragbot_rag::summarize::Summarizer;
use tracing::info;

use super::{load_chunker_config, load_summarizer_config};

/// Input parameters for the Summarize command strategy.
#[derive(Debug, Clone)]
pub struct SummarizeInput {
    /// PDF to summarize
    pub file: String,
    /// Summarize at most this many text chunks
    pub limit: Option<usize>,
}

/// Strategy for executing the Summarize command.
#[derive(Debug, Clone, Copy)]
pub struct SummarizeStrategy;

impl super::CommandStrategy for SummarizeStrategy {
    type Input = SummarizeInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        // Credentials are checked up front; no work happens without them
        let summarizer = Summarizer::new(&load_summarizer_config())?;

        let mut chunker = PdfChunker::new(load_chunker_config());
        chunker.chunk_pdf(&input.file)?;

        let mut texts: Vec<String> = chunker
            .texts()
            .iter()
            .map(|chunk| chunk.text.clone())
            .filter(|text| !text.trim().is_empty())
            .collect();
        if let Some(limit) = input.limit {
            texts.truncate(limit);
        }

        if texts.is_empty() {
            println!("No text chunks to summarize in {}", input.file);
            return Ok(());
        }

        info!("Summarizing {} text chunks from {}", texts.len(), input.file);

        let summaries = summarizer.summarize_texts(&texts).await?;
        for (i, summary) in summaries.iter().enumerate() {
            println!("[{}] {summary}", i + 1);
        }

        Ok(())
    }
}
