use anyhow::Result;
use std::io::Write;

use crate::chapters::Bookmark;

/// The document operations the splitter needs.
///
/// [`crate::pdf::PdfDocument`] is the real implementation; tests substitute
/// synthetic bookmark lists.
pub trait DocumentSource {
    /// Outline entries in document (pre-order) order.
    fn bookmarks(&self) -> Result<Vec<Bookmark>>;

    fn page_count(&self) -> Result<u32>;

    /// Write a new document containing only the pages in `pages`, an
    /// inclusive 1-based expression such as `"3-10"`.
    fn export_range(&self, pages: &str, out: &mut dyn Write) -> Result<()>;
}
