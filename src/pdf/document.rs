use anyhow::{Context, Result};
use lopdf::{Document, Object};
use std::io::Write;
use std::path::Path;

use super::outline::extract_bookmarks;
use crate::chapters::Bookmark;
use crate::page_range::PageRange;
use crate::source::DocumentSource;

/// A parsed PDF, loaded once and trimmed per chapter.
pub struct PdfDocument {
    doc: Document,
    path: String,
}

impl PdfDocument {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().display().to_string();
        let doc =
            Document::load(&path).with_context(|| format!("Failed to open PDF: {}", path_str))?;
        Ok(PdfDocument {
            doc,
            path: path_str,
        })
    }

    #[cfg(test)]
    pub fn from_document(doc: Document) -> Self {
        PdfDocument {
            doc,
            path: "<memory>".to_string(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// A copy of the document keeping only `range`.
    pub fn extract_range(&self, range: PageRange) -> Result<Document> {
        let total = self.doc.get_pages().len() as u32;
        range
            .check_within(total)
            .with_context(|| format!("Page range {} is out of range (1-{})", range, total))?;

        let pages_to_delete: Vec<u32> = (1..=total).filter(|p| !range.contains(*p)).collect();

        let mut new_doc = self.doc.clone();
        if !pages_to_delete.is_empty() {
            new_doc.delete_pages(&pages_to_delete);
        }

        // The outline points at pages that may be gone now
        if let Ok(root) = new_doc.trailer.get(b"Root").and_then(Object::as_reference) {
            if let Ok(catalog) = new_doc.get_dictionary_mut(root) {
                catalog.remove(b"Outlines");
            }
        }
        new_doc.prune_objects();

        Ok(new_doc)
    }
}

impl DocumentSource for PdfDocument {
    fn bookmarks(&self) -> Result<Vec<Bookmark>> {
        extract_bookmarks(&self.doc)
            .with_context(|| format!("Failed to read bookmarks of {}", self.path))
    }

    fn page_count(&self) -> Result<u32> {
        Ok(self.doc.get_pages().len() as u32)
    }

    fn export_range(&self, pages: &str, mut out: &mut dyn Write) -> Result<()> {
        let range: PageRange = pages.parse()?;
        let mut new_doc = self.extract_range(range)?;
        new_doc
            .save_to(&mut out)
            .with_context(|| format!("Failed to write pages {} of {}", range, self.path))?;
        Ok(())
    }
}
