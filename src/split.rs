use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use tracing::info;

use crate::chapters::{extract_chapters, Chapter, NestingRule};
use crate::config::SplitConfig;
use crate::export::{export_chapters, plan_files, ChapterFile};
use crate::pdf::PdfDocument;
use crate::source::DocumentSource;

#[derive(Debug, Serialize)]
struct SplitReport<'a> {
    input: &'a Path,
    output_dir: &'a Path,
    dry_run: bool,
    chapters: &'a [ChapterFile],
}

/// Split the configured input PDF into one file per chapter.
pub fn run(config: &SplitConfig) -> Result<()> {
    let doc = PdfDocument::open(&config.input)?;
    info!(input = doc.path(), pages = doc.page_count()?, "opened document");
    let files = run_with_source(config, &doc)?;

    if config.json {
        let report = SplitReport {
            input: &config.input,
            output_dir: &config.output_dir,
            dry_run: config.dry_run,
            chapters: &files,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}

/// Plan and (unless dry-running) export chapters from an already opened source.
pub fn run_with_source<S: DocumentSource + ?Sized>(
    config: &SplitConfig,
    source: &S,
) -> Result<Vec<ChapterFile>> {
    let chapters = read_chapters(source, config.nesting)?;
    info!(
        input = %config.input.display(),
        chapters = chapters.len(),
        "found chapters"
    );

    if config.dry_run {
        let files = plan_files(&chapters, &config.output_dir, config.boundary);
        if !config.json {
            for file in &files {
                println!(
                    "chapter: '{}' (pages: {}) -> {}",
                    file.title,
                    file.pages,
                    file.path.display()
                );
            }
        }
        return Ok(files);
    }

    let files = export_chapters(
        source,
        &chapters,
        &config.output_dir,
        config.boundary,
        |file| {
            if !config.json {
                println!("exported chapter: '{}' (pages: {})", file.title, file.pages);
            }
        },
    )?;

    info!(
        output_dir = %config.output_dir.display(),
        files = files.len(),
        "split complete"
    );
    Ok(files)
}

/// Read the outline and page count and turn them into chapters.
pub fn read_chapters<S: DocumentSource + ?Sized>(
    source: &S,
    nesting: NestingRule,
) -> Result<Vec<Chapter>> {
    let bookmarks = source
        .bookmarks()
        .context("Failed to read PDF bookmarks")?;
    let total_pages = source.page_count().context("Failed to read page count")?;

    Ok(extract_chapters(&bookmarks, total_pages, nesting)?)
}
