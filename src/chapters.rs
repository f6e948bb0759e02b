//! Turning a flattened outline into an ordered list of chapter page ranges.

use serde::Serialize;
use tracing::debug;

use crate::error::SplitError;
use crate::page_range::PageRange;

/// One outline entry, in document (pre-order) order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bookmark {
    pub title: String,
    /// 1-based page the entry points at
    pub page: u32,
    /// 0 for top-level entries, +1 per level of nesting
    pub level: u32,
}

impl Bookmark {
    pub fn new(title: impl Into<String>, page: u32, level: u32) -> Self {
        Bookmark {
            title: title.into(),
            page,
            level,
        }
    }
}

/// A top-level section of the document.
///
/// `end_page` equals the next chapter's `start_page`, or the total page
/// count for the final chapter. Whether the boundary page is exported with
/// both neighbours is decided by [`Boundary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chapter {
    pub title: String,
    /// 1-based position of the source bookmark among its candidates: the
    /// level-0 entries for [`NestingRule::Outline`], otherwise the full list
    pub order: u32,
    pub start_page: u32,
    pub end_page: u32,
}

impl Chapter {
    /// Inclusive page range to export for this chapter.
    pub fn page_range(&self, boundary: Boundary, is_last: bool) -> PageRange {
        let last = match boundary {
            Boundary::Shared => self.end_page,
            Boundary::Exclusive if is_last => self.end_page,
            Boundary::Exclusive => self.end_page.saturating_sub(1).max(self.start_page),
        };
        PageRange::new(self.start_page, last)
    }
}

/// How nested bookmarks are told apart from top-level chapters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum NestingRule {
    /// Keep level-0 entries whose page does not go backwards
    #[default]
    Outline,
    /// Ignore levels; keep entries whose page does not go backwards
    PageOrder,
    /// Compare against the previous chapter's (still unset) end page
    Legacy,
}

impl NestingRule {
    /// Whether `bookmark` is numbered as a candidate chapter at all.
    fn counts(self, bookmark: &Bookmark) -> bool {
        match self {
            NestingRule::Outline => bookmark.level == 0,
            NestingRule::PageOrder | NestingRule::Legacy => true,
        }
    }

    fn retains(self, bookmark: &Bookmark, previous: Option<&Chapter>) -> bool {
        match self {
            NestingRule::Outline => {
                bookmark.level == 0 && previous.map_or(true, |c| bookmark.page >= c.start_page)
            }
            NestingRule::PageOrder => previous.map_or(true, |c| bookmark.page >= c.start_page),
            // end_page is only filled in after filtering, so this compares against 0
            NestingRule::Legacy => previous.map_or(true, |c| bookmark.page >= c.end_page),
        }
    }
}

/// Which pages a non-final chapter exports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Boundary {
    /// `[start, end]`: the page where the next chapter begins is in both files
    #[default]
    Shared,
    /// `[start, end - 1]`: the boundary page belongs to the next chapter only
    Exclusive,
}

/// Select top-level chapters from `bookmarks` and infer their page ranges.
pub fn extract_chapters(
    bookmarks: &[Bookmark],
    total_pages: u32,
    rule: NestingRule,
) -> Result<Vec<Chapter>, SplitError> {
    let mut chapters: Vec<Chapter> = Vec::new();
    let mut candidates: u32 = 0;

    for bookmark in bookmarks {
        if rule.counts(bookmark) {
            candidates += 1;
        }
        if !rule.retains(bookmark, chapters.last()) {
            debug!(
                title = %bookmark.title,
                page = bookmark.page,
                level = bookmark.level,
                "skipping nested bookmark"
            );
            continue;
        }
        chapters.push(Chapter {
            title: bookmark.title.clone(),
            order: candidates,
            start_page: bookmark.page,
            end_page: 0,
        });
    }

    if chapters.is_empty() {
        return Err(SplitError::NoChapters);
    }

    for i in 0..chapters.len() - 1 {
        chapters[i].end_page = chapters[i + 1].start_page;
    }
    if let Some(last) = chapters.last_mut() {
        last.end_page = total_pages;
        if last.start_page > total_pages {
            return Err(SplitError::ChapterStartsPastEnd {
                title: last.title.clone(),
                page: last.start_page,
                total: total_pages,
            });
        }
    }

    Ok(chapters)
}
