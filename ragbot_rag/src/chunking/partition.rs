//! Partitioner implementations behind one capability interface.
//!
//! `TitlePartitioner` is the rich path: it splits page text into elements,
//! detects titles and table-like blocks, groups elements into by-title
//! chunks and pulls embedded images out as base64 payloads.
//! `PageTextPartitioner` is the plain fallback: one text chunk per page.
//! Which one runs is decided once, at chunker construction.

use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use lopdf::{Document, Object};
use tracing::debug;

use super::chunk::{Chunk, ChunkMetadata};
use super::{ChunkError, ChunkerConfig, ChunkingStrategy};

/// Capability interface over the two extraction backends.
pub trait Partitioner: Send + Sync {
    fn partition(&self, path: &Path, config: &ChunkerConfig) -> Result<Vec<Chunk>, ChunkError>;
}

/// Block type recognized while scanning page text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Element {
    Title { text: String, page: u32 },
    Narrative { text: String, page: u32 },
    Table { text: String, page: u32 },
}

impl Element {
    const fn page(&self) -> u32 {
        match self {
            Self::Title { page, .. } | Self::Narrative { page, .. } | Self::Table { page, .. } => {
                *page
            }
        }
    }

    fn text(&self) -> &str {
        match self {
            Self::Title { text, .. } | Self::Narrative { text, .. } | Self::Table { text, .. } => {
                text
            }
        }
    }
}

fn load_pages(path: &Path) -> Result<(Document, Vec<(u32, String)>), ChunkError> {
    let doc = Document::load(path)?;
    let mut pages = Vec::new();
    for (page_number, _) in doc.get_pages() {
        // Mirror the fallback extractor's tolerance: unreadable pages become
        // empty text rather than failing the whole document
        let text = doc.extract_text(&[page_number]).unwrap_or_default();
        pages.push((page_number, text));
    }
    Ok((doc, pages))
}

fn file_name_of(path: &Path) -> Option<String> {
    path.file_name().map(|n| n.to_string_lossy().into_owned())
}

// ─── plain per-page fallback ───

/// Plain text extractor: one text chunk per page, no structure inference.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageTextPartitioner;

impl Partitioner for PageTextPartitioner {
    fn partition(&self, path: &Path, _config: &ChunkerConfig) -> Result<Vec<Chunk>, ChunkError> {
        let (_, pages) = load_pages(path)?;
        Ok(page_chunks(&pages, file_name_of(path)))
    }
}

pub(crate) fn page_chunks(pages: &[(u32, String)], filename: Option<String>) -> Vec<Chunk> {
    pages
        .iter()
        .map(|(page_number, text)| {
            Chunk::text(
                text.clone(),
                ChunkMetadata {
                    filename: filename.clone(),
                    page_number: Some(*page_number),
                    ..ChunkMetadata::default()
                },
            )
        })
        .collect()
}

// ─── by-title partitioner ───

/// Structured extractor: element classification, by-title grouping, table and
/// image capture.
#[derive(Debug, Clone, Copy, Default)]
pub struct TitlePartitioner;

impl Partitioner for TitlePartitioner {
    fn partition(&self, path: &Path, config: &ChunkerConfig) -> Result<Vec<Chunk>, ChunkError> {
        let (doc, pages) = load_pages(path)?;
        let filename = file_name_of(path);

        let elements = classify_pages(&pages, config.infer_table_structure);
        debug!("Classified {} elements from {} pages", elements.len(), pages.len());

        let mut chunks = match config.chunking_strategy {
            ChunkingStrategy::ByTitle => chunk_by_title(&elements, config, filename.as_deref()),
            ChunkingStrategy::Basic => page_chunks(&pages, filename.clone()),
        };

        if config.wants_images() {
            chunks.extend(extract_images(&doc, filename.as_deref(), config));
        }

        Ok(chunks)
    }
}

/// Split page text into blank-line-separated blocks and classify each one.
pub(crate) fn classify_pages(pages: &[(u32, String)], infer_tables: bool) -> Vec<Element> {
    let mut elements = Vec::new();
    for (page, text) in pages {
        for block in split_blocks(text) {
            if infer_tables && looks_like_table(&block) {
                elements.push(Element::Table {
                    text: block,
                    page: *page,
                });
            } else if looks_like_title(&block) {
                elements.push(Element::Title {
                    text: block,
                    page: *page,
                });
            } else {
                elements.push(Element::Narrative {
                    text: block,
                    page: *page,
                });
            }
        }
    }
    elements
}

fn split_blocks(text: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current = String::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.trim().is_empty() {
                blocks.push(current.trim_end().to_string());
            }
            current.clear();
        } else {
            if !current.is_empty() {
                current.push('\n');
            }
            current.push_str(line);
        }
    }
    if !current.trim().is_empty() {
        blocks.push(current.trim_end().to_string());
    }
    blocks
}

fn looks_like_title(block: &str) -> bool {
    let line = block.trim();
    if line.is_empty() || line.contains('\n') || line.len() > 80 {
        return false;
    }
    if line.ends_with(['.', '!', '?', ';', ':', ',']) {
        return false;
    }
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.is_empty() || words.len() > 12 {
        return false;
    }
    let leading_caps = words
        .iter()
        .filter(|w| {
            w.chars()
                .next()
                .is_some_and(|c| c.is_uppercase() || c.is_numeric())
        })
        .count();
    leading_caps * 2 >= words.len()
}

fn looks_like_table(block: &str) -> bool {
    let lines: Vec<&str> = block.lines().filter(|l| !l.trim().is_empty()).collect();
    if lines.len() < 2 {
        return false;
    }
    let columnar = lines
        .iter()
        .filter(|l| split_columns(l).len() >= 2)
        .count();
    columnar * 3 >= lines.len() * 2
}

fn split_columns(line: &str) -> Vec<String> {
    line.replace('\t', "  ")
        .split("  ")
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(ToString::to_string)
        .collect()
}

pub(crate) fn table_to_html(block: &str) -> String {
    let mut html = String::from("<table>");
    for line in block.lines().filter(|l| !l.trim().is_empty()) {
        html.push_str("<tr>");
        for cell in split_columns(line) {
            html.push_str("<td>");
            html.push_str(&cell);
            html.push_str("</td>");
        }
        html.push_str("</tr>");
    }
    html.push_str("</table>");
    html
}

/// Group classified elements into chunks, starting a new chunk at each title.
///
/// Three thresholds shape the output: sections smaller than
/// `combine_text_under_n_chars` absorb the next title instead of closing, a
/// soft break happens past `new_after_n_chars`, and no chunk text exceeds
/// `max_characters`.
pub(crate) fn chunk_by_title(
    elements: &[Element],
    config: &ChunkerConfig,
    filename: Option<&str>,
) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut section = String::new();
    let mut section_page: Option<u32> = None;

    let flush = |section: &mut String, section_page: &mut Option<u32>, chunks: &mut Vec<Chunk>| {
        if section.trim().is_empty() {
            section.clear();
            return;
        }
        for part in split_hard(section, config.max_characters) {
            chunks.push(Chunk::text(
                part,
                ChunkMetadata {
                    filename: filename.map(ToString::to_string),
                    page_number: *section_page,
                    ..ChunkMetadata::default()
                },
            ));
        }
        section.clear();
        *section_page = None;
    };

    for element in elements {
        match element {
            Element::Table { text, page } => {
                flush(&mut section, &mut section_page, &mut chunks);
                chunks.push(Chunk::table(
                    text.clone(),
                    table_to_html(text),
                    ChunkMetadata {
                        filename: filename.map(ToString::to_string),
                        page_number: Some(*page),
                        ..ChunkMetadata::default()
                    },
                ));
            }
            Element::Title { .. } => {
                if section.len() >= config.combine_text_under_n_chars {
                    flush(&mut section, &mut section_page, &mut chunks);
                }
                append_part(&mut section, &mut section_page, element);
            }
            Element::Narrative { .. } => {
                if section.len() >= config.new_after_n_chars
                    || section.len() + element.text().len() > config.max_characters
                {
                    flush(&mut section, &mut section_page, &mut chunks);
                }
                append_part(&mut section, &mut section_page, element);
            }
        }
    }
    flush(&mut section, &mut section_page, &mut chunks);

    chunks
}

fn append_part(section: &mut String, section_page: &mut Option<u32>, element: &Element) {
    if section_page.is_none() {
        *section_page = Some(element.page());
    }
    if !section.is_empty() {
        section.push_str("\n\n");
    }
    section.push_str(element.text());
}

/// Split oversized text at `max` characters, respecting char boundaries.
pub(crate) fn split_hard(text: &str, max: usize) -> Vec<String> {
    if max == 0 || text.len() <= max {
        return vec![text.to_string()];
    }
    let mut parts = Vec::new();
    let mut current = String::new();
    for c in text.chars() {
        if current.len() + c.len_utf8() > max {
            parts.push(std::mem::take(&mut current));
        }
        current.push(c);
    }
    if !current.is_empty() {
        parts.push(current);
    }
    parts
}

/// Collect embedded image streams as base64 payload chunks.
fn extract_images(doc: &Document, filename: Option<&str>, config: &ChunkerConfig) -> Vec<Chunk> {
    if !config.extract_image_block_to_payload {
        return Vec::new();
    }
    let mut images = Vec::new();
    for (_, object) in &doc.objects {
        let Object::Stream(stream) = object else {
            continue;
        };
        let is_image = stream
            .dict
            .get(b"Subtype")
            .and_then(Object::as_name)
            .is_ok_and(|name| name == b"Image".as_slice());
        if !is_image {
            continue;
        }
        images.push(Chunk::image(
            BASE64.encode(&stream.content),
            ChunkMetadata {
                filename: filename.map(ToString::to_string),
                ..ChunkMetadata::default()
            },
        ));
    }
    debug!("Extracted {} embedded images", images.len());
    images
}

#[cfg(test)]
mod tests {
    use super::super::chunk::ChunkKind;
    use super::*;

    fn config() -> ChunkerConfig {
        ChunkerConfig::default()
    }

    #[test]
    fn page_chunks_yield_one_chunk_per_page() {
        let pages = vec![
            (1, "first page".to_string()),
            (2, "second page".to_string()),
        ];
        let chunks = page_chunks(&pages, Some("doc.pdf".to_string()));

        assert_eq!(chunks.len(), 2);
        assert!(chunks.iter().all(|c| c.kind == ChunkKind::Text));
        assert_eq!(chunks[0].metadata.page_number, Some(1));
        assert_eq!(chunks[1].text, "second page");
        assert_eq!(chunks[1].metadata.filename.as_deref(), Some("doc.pdf"));
    }

    #[test]
    fn titles_are_detected_and_sentences_are_not() {
        assert!(looks_like_title("Quarterly Results"));
        assert!(looks_like_title("1 Introduction"));
        assert!(!looks_like_title("this is a plain lowercase sentence."));
        assert!(!looks_like_title("Ends with a colon:"));
        assert!(!looks_like_title(""));
    }

    #[test]
    fn columnar_blocks_are_tables() {
        let block = "name    qty    price\nbolts   12     0.40\nnuts    48     0.10";
        assert!(looks_like_table(block));
        assert!(!looks_like_table("just a paragraph of flowing text"));
    }

    #[test]
    fn table_html_renders_rows_and_cells() {
        let html = table_to_html("a  b\nc  d");
        assert_eq!(html, "<table><tr><td>a</td><td>b</td></tr><tr><td>c</td><td>d</td></tr></table>");
    }

    #[test]
    fn titles_start_new_chunks_once_sections_are_large_enough() {
        let mut cfg = config();
        cfg.combine_text_under_n_chars = 10;
        let elements = vec![
            Element::Title {
                text: "Alpha".to_string(),
                page: 1,
            },
            Element::Narrative {
                text: "Body of the first section, long enough.".to_string(),
                page: 1,
            },
            Element::Title {
                text: "Beta".to_string(),
                page: 2,
            },
            Element::Narrative {
                text: "Second body.".to_string(),
                page: 2,
            },
        ];

        let chunks = chunk_by_title(&elements, &cfg, None);

        assert_eq!(chunks.len(), 2);
        assert!(chunks[0].text.starts_with("Alpha"));
        assert!(chunks[1].text.starts_with("Beta"));
        assert_eq!(chunks[1].metadata.page_number, Some(2));
    }

    #[test]
    fn small_sections_absorb_the_next_title() {
        let mut cfg = config();
        cfg.combine_text_under_n_chars = 1000;
        let elements = vec![
            Element::Title {
                text: "Alpha".to_string(),
                page: 1,
            },
            Element::Narrative {
                text: "Tiny.".to_string(),
                page: 1,
            },
            Element::Title {
                text: "Beta".to_string(),
                page: 1,
            },
            Element::Narrative {
                text: "Also tiny.".to_string(),
                page: 1,
            },
        ];

        let chunks = chunk_by_title(&elements, &cfg, None);

        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].text.contains("Alpha"));
        assert!(chunks[0].text.contains("Beta"));
    }

    #[test]
    fn tables_become_standalone_chunks_with_html() {
        let elements = vec![
            Element::Narrative {
                text: "Intro.".to_string(),
                page: 1,
            },
            Element::Table {
                text: "a  b\nc  d".to_string(),
                page: 1,
            },
        ];

        let chunks = chunk_by_title(&elements, &config(), Some("doc.pdf"));

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[1].kind, ChunkKind::Table);
        assert!(chunks[1].metadata.text_as_html.as_deref().is_some_and(|h| h.contains("<td>a</td>")));
    }

    #[test]
    fn oversized_sections_are_hard_split() {
        let mut cfg = config();
        cfg.max_characters = 10;
        cfg.new_after_n_chars = 10;
        cfg.combine_text_under_n_chars = 0;
        let elements = vec![Element::Narrative {
            text: "abcdefghijklmnopqrstuvwxy".to_string(),
            page: 1,
        }];

        let chunks = chunk_by_title(&elements, &cfg, None);

        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| c.text.len() <= 10));
    }

    #[test]
    fn hard_split_respects_char_boundaries() {
        let parts = split_hard("ééééé", 4);
        assert!(parts.iter().all(|p| p.len() <= 4));
        assert_eq!(parts.concat(), "ééééé");
    }

    #[test]
    fn classification_covers_all_block_shapes() {
        let pages = vec![(
            1,
            "Section One\n\nA paragraph of ordinary narrative text follows here.\n\ncol1  col2\nv1    v2"
                .to_string(),
        )];

        let elements = classify_pages(&pages, true);

        assert_eq!(elements.len(), 3);
        assert!(matches!(elements[0], Element::Title { .. }));
        assert!(matches!(elements[1], Element::Narrative { .. }));
        assert!(matches!(elements[2], Element::Table { .. }));
    }

    #[test]
    fn table_inference_can_be_disabled() {
        let pages = vec![(1, "col1  col2\nv1    v2".to_string())];
        let elements = classify_pages(&pages, false);
        assert!(matches!(elements[0], Element::Narrative { .. }));
    }
}
