//! Extracted document units.

use serde::{Deserialize, Serialize};

/// What an extracted chunk contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkKind {
    Text,
    Table,
    Image,
}

/// Metadata shared by every chunk shape.
///
/// Both partitioner implementations populate this struct, so callers can use
/// the same accessors regardless of which one produced the chunk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChunkMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,
    /// Naive HTML rendering for table chunks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_as_html: Option<String>,
    /// Base64-encoded payload for image chunks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_base64: Option<String>,
}

/// One extracted unit of a parsed document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    pub kind: ChunkKind,
    pub text: String,
    pub metadata: ChunkMetadata,
}

impl Chunk {
    #[must_use]
    pub fn text(text: impl Into<String>, metadata: ChunkMetadata) -> Self {
        Self {
            kind: ChunkKind::Text,
            text: text.into(),
            metadata,
        }
    }

    #[must_use]
    pub fn table(text: impl Into<String>, html: String, mut metadata: ChunkMetadata) -> Self {
        metadata.text_as_html = Some(html);
        Self {
            kind: ChunkKind::Table,
            text: text.into(),
            metadata,
        }
    }

    #[must_use]
    pub fn image(payload_base64: String, mut metadata: ChunkMetadata) -> Self {
        metadata.image_base64 = Some(payload_base64);
        Self {
            kind: ChunkKind::Image,
            text: String::new(),
            metadata,
        }
    }

    #[must_use]
    pub fn is_kind(&self, kind: ChunkKind) -> bool {
        self.kind == kind
    }
}
