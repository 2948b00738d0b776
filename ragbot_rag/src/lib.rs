#![warn(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Document ingestion for retrieval: PDF chunking and summarization.

pub mod chunking;
pub mod summarize;

pub use chunking::{
    Chunk, ChunkError, ChunkKind, ChunkMetadata, ChunkerConfig, ChunkingStrategy,
    PageTextPartitioner, PartitionStrategy, Partitioner, PdfChunker, TitlePartitioner,
};
pub use summarize::{
    ImageChain, PromptTemplate, SummarizeChain, SummarizeError, Summarizer, SummarizerConfig,
};
