//! PDF chunking behind a fixed accessor interface.

mod chunk;
mod partition;

pub use chunk::{Chunk, ChunkKind, ChunkMetadata};
pub use partition::{PageTextPartitioner, Partitioner, TitlePartitioner};

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// Image block types extracted by default. Copied into each config instance.
pub const DEFAULT_IMAGE_BLOCK_TYPES: [&str; 1] = ["Image"];

#[derive(Debug, Error)]
pub enum ChunkError {
    #[error("file name cannot be empty")]
    EmptyFileName,

    #[error("PDF file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("failed to parse PDF: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Which extraction backend to use. Decided once at configuration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartitionStrategy {
    /// Structured extraction: titles, tables, images.
    #[default]
    HiRes,
    /// Plain per-page text extraction.
    Fast,
}

impl PartitionStrategy {
    #[must_use]
    pub fn partitioner(self) -> Box<dyn Partitioner> {
        match self {
            Self::HiRes => Box::new(TitlePartitioner),
            Self::Fast => Box::new(PageTextPartitioner),
        }
    }
}

/// How text elements are grouped into chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkingStrategy {
    #[default]
    ByTitle,
    /// One chunk per page, no grouping.
    Basic,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkerConfig {
    /// Directory that relative file names are resolved against.
    #[serde(default = "ChunkerConfig::default_output_path")]
    pub output_path: String,
    #[serde(default = "ChunkerConfig::default_true")]
    pub infer_table_structure: bool,
    #[serde(default)]
    pub strategy: PartitionStrategy,
    #[serde(default = "ChunkerConfig::default_image_block_types")]
    pub extract_image_block_types: Vec<String>,
    #[serde(default = "ChunkerConfig::default_true")]
    pub extract_image_block_to_payload: bool,
    #[serde(default)]
    pub chunking_strategy: ChunkingStrategy,
    #[serde(default = "ChunkerConfig::default_max_characters")]
    pub max_characters: usize,
    #[serde(default = "ChunkerConfig::default_combine_text_under_n_chars")]
    pub combine_text_under_n_chars: usize,
    #[serde(default = "ChunkerConfig::default_new_after_n_chars")]
    pub new_after_n_chars: usize,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            output_path: Self::default_output_path(),
            infer_table_structure: true,
            strategy: PartitionStrategy::default(),
            extract_image_block_types: Self::default_image_block_types(),
            extract_image_block_to_payload: true,
            chunking_strategy: ChunkingStrategy::default(),
            max_characters: Self::default_max_characters(),
            combine_text_under_n_chars: Self::default_combine_text_under_n_chars(),
            new_after_n_chars: Self::default_new_after_n_chars(),
        }
    }
}

impl ChunkerConfig {
    fn default_output_path() -> String {
        "./content/".to_string()
    }

    fn default_image_block_types() -> Vec<String> {
        DEFAULT_IMAGE_BLOCK_TYPES
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    const fn default_true() -> bool {
        true
    }

    const fn default_max_characters() -> usize {
        10_000
    }

    const fn default_combine_text_under_n_chars() -> usize {
        2_000
    }

    const fn default_new_after_n_chars() -> usize {
        6_000
    }

    #[must_use]
    pub fn wants_images(&self) -> bool {
        self.extract_image_block_types.iter().any(|t| t == "Image")
    }
}

/// PDF chunker: resolves a file, runs the configured partitioner once and
/// exposes the results through kind-filtering accessors.
pub struct PdfChunker {
    config: ChunkerConfig,
    partitioner: Box<dyn Partitioner>,
    chunks: Vec<Chunk>,
}

impl PdfChunker {
    #[must_use]
    pub fn new(config: ChunkerConfig) -> Self {
        let partitioner = config.strategy.partitioner();
        Self {
            config,
            partitioner,
            chunks: Vec::new(),
        }
    }

    /// Swap in a custom extraction backend.
    #[must_use]
    pub fn with_partitioner(config: ChunkerConfig, partitioner: Box<dyn Partitioner>) -> Self {
        Self {
            config,
            partitioner,
            chunks: Vec::new(),
        }
    }

    /// Chunk a PDF given an absolute path or a name relative to the
    /// configured output path.
    ///
    /// Fails on an empty name or a missing file before the partitioner is
    /// ever invoked.
    pub fn chunk_pdf(&mut self, file_name: &str) -> Result<&[Chunk], ChunkError> {
        if file_name.is_empty() {
            return Err(ChunkError::EmptyFileName);
        }

        let candidate = Path::new(file_name);
        let file_path = if candidate.is_absolute() && candidate.is_file() {
            candidate.to_path_buf()
        } else {
            Path::new(&self.config.output_path).join(file_name)
        };

        if !file_path.is_file() {
            return Err(ChunkError::FileNotFound(file_path));
        }

        info!("Chunking PDF: {}", file_path.display());
        self.chunks = self.partitioner.partition(&file_path, &self.config)?;
        info!("Extracted {} chunks", self.chunks.len());

        Ok(&self.chunks)
    }

    #[must_use]
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    #[must_use]
    pub fn texts(&self) -> Vec<&Chunk> {
        self.of_kind(ChunkKind::Text)
    }

    #[must_use]
    pub fn tables(&self) -> Vec<&Chunk> {
        self.of_kind(ChunkKind::Table)
    }

    #[must_use]
    pub fn images(&self) -> Vec<&Chunk> {
        self.of_kind(ChunkKind::Image)
    }

    #[must_use]
    pub fn metadata(&self) -> Vec<&ChunkMetadata> {
        self.chunks.iter().map(|c| &c.metadata).collect()
    }

    #[must_use]
    pub const fn config(&self) -> &ChunkerConfig {
        &self.config
    }

    fn of_kind(&self, kind: ChunkKind) -> Vec<&Chunk> {
        self.chunks.iter().filter(|c| c.is_kind(kind)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_thresholds() {
        let config = ChunkerConfig::default();
        assert_eq!(config.output_path, "./content/");
        assert_eq!(config.max_characters, 10_000);
        assert_eq!(config.combine_text_under_n_chars, 2_000);
        assert_eq!(config.new_after_n_chars, 6_000);
        assert_eq!(config.extract_image_block_types, vec!["Image".to_string()]);
        assert_eq!(config.strategy, PartitionStrategy::HiRes);
        assert_eq!(config.chunking_strategy, ChunkingStrategy::ByTitle);
    }

    #[test]
    fn image_block_types_are_copied_per_instance() {
        let mut first = ChunkerConfig::default();
        first.extract_image_block_types.push("Figure".to_string());
        let second = ChunkerConfig::default();
        assert_eq!(second.extract_image_block_types, vec!["Image".to_string()]);
    }

    #[test]
    fn strategy_names_serialize_like_the_wire_format() {
        let json = serde_json::to_value(PartitionStrategy::HiRes).unwrap();
        assert_eq!(json, "hi_res");
        let json = serde_json::to_value(ChunkingStrategy::ByTitle).unwrap();
        assert_eq!(json, "by_title");
    }
}
