use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::chapters::{Boundary, Chapter};
use crate::sanitize::chapter_file_name;
use crate::source::DocumentSource;

/// Where one chapter goes and which pages it gets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChapterFile {
    pub order: u32,
    pub title: String,
    /// Inclusive page range expression, e.g. "3-10"
    pub pages: String,
    pub path: PathBuf,
}

/// Output file and page range for every chapter, in chapter order.
pub fn plan_files(chapters: &[Chapter], output_dir: &Path, boundary: Boundary) -> Vec<ChapterFile> {
    let last = chapters.len().saturating_sub(1);
    chapters
        .iter()
        .enumerate()
        .map(|(i, chapter)| ChapterFile {
            order: chapter.order,
            title: chapter.title.clone(),
            pages: chapter.page_range(boundary, i == last).to_string(),
            path: output_dir.join(chapter_file_name(chapter.order, &chapter.title)),
        })
        .collect()
}

/// Write one file per chapter into `output_dir`, stopping at the first failure.
///
/// `on_exported` is called after each file is complete.
pub fn export_chapters<S, F>(
    source: &S,
    chapters: &[Chapter],
    output_dir: &Path,
    boundary: Boundary,
    mut on_exported: F,
) -> Result<Vec<ChapterFile>>
where
    S: DocumentSource + ?Sized,
    F: FnMut(&ChapterFile),
{
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory: {}", output_dir.display()))?;

    let files = plan_files(chapters, output_dir, boundary);
    for file in &files {
        let output = File::create(&file.path)
            .with_context(|| format!("Failed to create output file: {}", file.path.display()))?;
        let mut writer = BufWriter::new(output);

        source
            .export_range(&file.pages, &mut writer)
            .and_then(|()| writer.flush().map_err(Into::into))
            .with_context(|| format!("Failed to split chapter '{}'", file.title))?;

        info!(chapter = %file.title, pages = %file.pages, path = %file.path.display(), "exported chapter");
        on_exported(file);
    }

    Ok(files)
}
