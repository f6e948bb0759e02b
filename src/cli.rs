use clap::Parser;
use std::path::PathBuf;

use crate::chapters::{Boundary, NestingRule};
use crate::config::{SplitConfig, DEFAULT_OUTPUT_DIR};

#[derive(Parser, Debug)]
#[command(name = "pdf-split")]
#[command(about = "Split a PDF into one file per chapter using its table of contents")]
#[command(after_help = "Example: pdf-split -i example.pdf -o output_dir")]
#[command(version)]
pub struct Cli {
    /// Input PDF file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output directory (created if missing)
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output: PathBuf,

    /// How nested bookmarks are recognised
    #[arg(long, value_enum, default_value_t = NestingRule::Outline)]
    pub nesting: NestingRule,

    /// Whether the page a chapter ends on is also exported with it
    #[arg(long, value_enum, default_value_t = Boundary::Shared)]
    pub boundary: Boundary,

    /// Print the chapters that would be written without writing them
    #[arg(long)]
    pub dry_run: bool,

    /// Print a JSON report instead of one line per chapter
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl From<Cli> for SplitConfig {
    fn from(cli: Cli) -> Self {
        SplitConfig {
            output_dir: cli.output,
            nesting: cli.nesting,
            boundary: cli.boundary,
            dry_run: cli.dry_run,
            json: cli.json,
            ..SplitConfig::new(cli.input)
        }
    }
}
