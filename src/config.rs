use std::path::PathBuf;

use crate::chapters::{Boundary, NestingRule};

pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Everything one split run needs to know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitConfig {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub nesting: NestingRule,
    pub boundary: Boundary,
    /// Only print the chapter plan
    pub dry_run: bool,
    /// Report as JSON instead of one line per chapter
    pub json: bool,
}

impl SplitConfig {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        SplitConfig {
            input: input.into(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            nesting: NestingRule::default(),
            boundary: Boundary::default(),
            dry_run: false,
            json: false,
        }
    }
}
