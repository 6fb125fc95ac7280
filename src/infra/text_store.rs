// ============================================================
// Layer 6 — Extracted Text Store
// ============================================================
// Optionally writes the extracted document text to a side
// file, so the text the questions were generated from can be
// inspected (or re-run through `segment`) without extracting
// the PDF again.
//
// Parent directories are created on demand and an existing
// file is overwritten.

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};

use crate::domain::document::Document;

pub struct TextStore {
    path: PathBuf,
}

impl TextStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Write the document text to the store's path.
    pub fn save(&self, doc: &Document) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Cannot create '{}'", parent.display()))?;
            }
        }

        fs::write(&self.path, &doc.text)
            .with_context(|| format!("Cannot write '{}'", self.path.display()))?;

        tracing::info!(
            "Saved extracted text of '{}' to '{}'",
            doc.source,
            self.path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir   = tempfile::tempdir().unwrap();
        let path  = dir.path().join("out").join("extracted_text.txt");
        let store = TextStore::new(&path);

        store.save(&Document::new("a.pdf", "Some text.")).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "Some text.");
    }

    #[test]
    fn test_save_overwrites() {
        let dir   = tempfile::tempdir().unwrap();
        let path  = dir.path().join("extracted_text.txt");
        let store = TextStore::new(&path);

        store.save(&Document::new("a.pdf", "old")).unwrap();
        store.save(&Document::new("a.pdf", "new")).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }
}
