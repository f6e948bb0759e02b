use thiserror::Error;

/// Failures of the chapter extraction step.
///
/// I/O and PDF parsing failures are reported through `anyhow` with context
/// attached at the call site; these are the conditions the extractor itself
/// decides are fatal.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SplitError {
    #[error("no chapters found in input file")]
    NoChapters,

    #[error("chapter '{title}' starts on page {page} but the document has only {total} pages")]
    ChapterStartsPastEnd { title: String, page: u32, total: u32 },
}
