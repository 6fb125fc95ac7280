// ============================================================
// Layer 4 — Document Loaders
// ============================================================
// Turns one input file into a Document. The extension decides
// which extractor runs:
//
//   .pdf   → lopdf, text extracted page by page
//   .docx  → docx-rs, paragraph text joined with newlines
//   other  → read as UTF-8 text
//
// Every loader runs the extracted text through the
// Preprocessor and refuses to return a blank Document: a file
// with no usable text is an Extraction error, so nothing
// downstream ever runs on empty input.
//
// Reference: lopdf / docx-rs crate documentation
//            Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::data::preprocessor::Preprocessor;
use crate::domain::document::Document;
use crate::domain::error::PipelineError;
use crate::domain::traits::DocumentSource;

/// Pick the loader matching the file extension.
pub fn source_for(path: impl AsRef<Path>) -> Box<dyn DocumentSource> {
    let path = path.as_ref().to_path_buf();
    let ext  = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("pdf")  => Box::new(PdfLoader::new(path)),
        Some("docx") => Box::new(DocxLoader::new(path)),
        _            => Box::new(TextLoader::new(path)),
    }
}

// ─── PDF ──────────────────────────────────────────────────────────────────────
pub struct PdfLoader {
    path: PathBuf,
}

impl PdfLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DocumentSource for PdfLoader {
    fn load(&self) -> Result<Document> {
        let pdf = lopdf::Document::load(&self.path).map_err(|e| {
            PipelineError::Extraction(format!("cannot open '{}': {}", self.path.display(), e))
        })?;

        let pages = pdf.get_pages();
        let mut text = String::new();

        // Pages come back ordered by page number (BTreeMap)
        for page_num in pages.keys() {
            match pdf.extract_text(&[*page_num]) {
                Ok(page_text) => {
                    text.push_str(&page_text);
                    text.push('\n');
                }
                // One bad page should not sink the whole document
                Err(e) => tracing::warn!(
                    "Skipping page {} of '{}': {}",
                    page_num,
                    self.path.display(),
                    e
                ),
            }
        }

        tracing::debug!(
            "Extracted {} chars from {} pages of '{}'",
            text.len(),
            pages.len(),
            self.path.display()
        );

        finish(&self.path, &text)
    }
}

// ─── DOCX ─────────────────────────────────────────────────────────────────────
pub struct DocxLoader {
    path: PathBuf,
}

impl DocxLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DocumentSource for DocxLoader {
    fn load(&self) -> Result<Document> {
        use docx_rs::{DocumentChild, ParagraphChild, RunChild};

        let bytes = fs::read(&self.path)
            .with_context(|| format!("Cannot read '{}'", self.path.display()))?;

        let docx = docx_rs::read_docx(&bytes).map_err(|e| {
            PipelineError::Extraction(format!(
                "docx parse error in '{}': {:?}",
                self.path.display(),
                e
            ))
        })?;

        // Document → Paragraph → Run → Text
        let paragraphs: Vec<String> = docx
            .document
            .children
            .iter()
            .filter_map(|child| match child {
                DocumentChild::Paragraph(para) => Some(para),
                _ => None,
            })
            .map(|para| {
                para.children
                    .iter()
                    .filter_map(|pc| match pc {
                        ParagraphChild::Run(run) => Some(run),
                        _ => None,
                    })
                    .flat_map(|run| run.children.iter())
                    .filter_map(|rc| match rc {
                        RunChild::Text(t) => Some(t.text.as_str()),
                        _ => None,
                    })
                    .collect::<String>()
            })
            .filter(|p| !p.trim().is_empty())
            .collect();

        finish(&self.path, &paragraphs.join("\n\n"))
    }
}

// ─── Plain text ───────────────────────────────────────────────────────────────
pub struct TextLoader {
    path: PathBuf,
}

impl TextLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DocumentSource for TextLoader {
    fn load(&self) -> Result<Document> {
        let bytes = fs::read(&self.path)
            .with_context(|| format!("Cannot read '{}'", self.path.display()))?;

        let text = String::from_utf8(bytes).map_err(|e| {
            PipelineError::Extraction(format!("'{}' is not UTF-8: {}", self.path.display(), e))
        })?;

        finish(&self.path, &text)
    }
}

/// Clean the raw text and wrap it in a Document, rejecting blank output.
fn finish(path: &Path, raw: &str) -> Result<Document> {
    let text = Preprocessor::new().clean(raw);

    if text.is_empty() {
        return Err(PipelineError::Extraction(format!(
            "no usable text in '{}'",
            path.display()
        ))
        .into());
    }

    let source = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown")
        .to_string();

    let doc = Document::new(source, text);
    tracing::info!("Loaded '{}' ({} words)", doc.source, doc.word_count());
    Ok(doc)
}
