//! Integration tests for the PDF chunker.
//!
//! These tests verify that:
//! - Bad inputs fail before any partitioner work happens
//! - Accessors filter chunk kinds through one shared interface
//! - The configured backend is what actually runs

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use ragbot_rag::chunking::{
    Chunk, ChunkError, ChunkMetadata, ChunkerConfig, Partitioner, PdfChunker,
};

/// Partitioner that counts invocations and returns a canned chunk set.
struct ProbePartitioner {
    calls: Arc<AtomicUsize>,
    chunks: Vec<Chunk>,
}

impl Partitioner for ProbePartitioner {
    fn partition(
        &self,
        _path: &Path,
        _config: &ChunkerConfig,
    ) -> Result<Vec<Chunk>, ChunkError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.chunks.clone())
    }
}

fn mixed_chunks() -> Vec<Chunk> {
    vec![
        Chunk::text("first paragraph", ChunkMetadata::default()),
        Chunk::table(
            "a  b",
            "<table><tr><td>a</td><td>b</td></tr></table>".to_string(),
            ChunkMetadata::default(),
        ),
        Chunk::image("aGVsbG8=".to_string(), ChunkMetadata::default()),
        Chunk::text("second paragraph", ChunkMetadata::default()),
    ]
}

fn temp_pdf(name: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!("ragbot_{}_{}.pdf", name, std::process::id()));
    std::fs::write(&path, b"%PDF-1.4 stub").expect("temp file should be writable");
    path
}

#[test]
fn empty_file_name_fails_before_partitioning() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut chunker = PdfChunker::with_partitioner(
        ChunkerConfig::default(),
        Box::new(ProbePartitioner {
            calls: Arc::clone(&calls),
            chunks: vec![],
        }),
    );

    let result = chunker.chunk_pdf("");

    assert!(matches!(result, Err(ChunkError::EmptyFileName)));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn missing_file_fails_before_partitioning() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut chunker = PdfChunker::with_partitioner(
        ChunkerConfig::default(),
        Box::new(ProbePartitioner {
            calls: Arc::clone(&calls),
            chunks: vec![],
        }),
    );

    let result = chunker.chunk_pdf("definitely_not_here.pdf");

    assert!(matches!(result, Err(ChunkError::FileNotFound(_))));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn accessors_filter_by_kind() {
    let path = temp_pdf("accessors");
    let mut chunker = PdfChunker::with_partitioner(
        ChunkerConfig::default(),
        Box::new(ProbePartitioner {
            calls: Arc::new(AtomicUsize::new(0)),
            chunks: mixed_chunks(),
        }),
    );

    let chunks = chunker
        .chunk_pdf(&path.to_string_lossy())
        .expect("chunking should succeed");
    assert_eq!(chunks.len(), 4);

    assert_eq!(chunker.texts().len(), 2);
    assert_eq!(chunker.tables().len(), 1);
    assert_eq!(chunker.images().len(), 1);
    assert_eq!(chunker.metadata().len(), 4);

    let table = chunker.tables()[0];
    assert!(table.metadata.text_as_html.as_deref().is_some_and(|h| h.starts_with("<table>")));
    let image = chunker.images()[0];
    assert_eq!(image.metadata.image_base64.as_deref(), Some("aGVsbG8="));

    std::fs::remove_file(&path).ok();
}

#[test]
fn accessors_are_empty_before_any_chunking() {
    let chunker = PdfChunker::new(ChunkerConfig::default());

    assert!(chunker.chunks().is_empty());
    assert!(chunker.texts().is_empty());
    assert!(chunker.tables().is_empty());
    assert!(chunker.images().is_empty());
    assert!(chunker.metadata().is_empty());
}

#[test]
fn relative_names_resolve_against_the_output_path() {
    let calls = Arc::new(AtomicUsize::new(0));
    let dir = std::env::temp_dir().join(format!("ragbot_outdir_{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
    std::fs::write(dir.join("doc.pdf"), b"%PDF-1.4 stub").expect("temp file should be writable");

    let config = ChunkerConfig {
        output_path: dir.to_string_lossy().into_owned(),
        ..ChunkerConfig::default()
    };
    let mut chunker = PdfChunker::with_partitioner(
        config,
        Box::new(ProbePartitioner {
            calls: Arc::clone(&calls),
            chunks: vec![Chunk::text("page", ChunkMetadata::default())],
        }),
    );

    let result = chunker.chunk_pdf("doc.pdf");

    assert!(result.is_ok());
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    std::fs::remove_dir_all(&dir).ok();
}
