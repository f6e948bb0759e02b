use anyhow::{anyhow, Result};
use std::fmt;
use std::str::FromStr;

/// An inclusive, 1-based span of pages, written as `"first-last"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    pub first: u32,
    pub last: u32,
}

impl PageRange {
    pub fn new(first: u32, last: u32) -> Self {
        PageRange { first, last }
    }

    /// Parse a page range expression like "3-10" or "7"
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(anyhow!("Empty page range"));
        }

        let (first, last) = match s.split_once('-') {
            Some((start, end)) => (parse_page(start)?, parse_page(end)?),
            None => {
                let page = parse_page(s)?;
                (page, page)
            }
        };

        if first > last {
            return Err(anyhow!("Invalid page range {}: start is after end", s));
        }

        Ok(PageRange { first, last })
    }

    pub fn contains(&self, page: u32) -> bool {
        (self.first..=self.last).contains(&page)
    }

    /// Fail unless every page of the range exists in a `total_pages` document
    pub fn check_within(&self, total_pages: u32) -> Result<()> {
        if self.last > total_pages {
            return Err(anyhow!(
                "End page {} exceeds total pages {}",
                self.last,
                total_pages
            ));
        }
        Ok(())
    }
}

impl fmt::Display for PageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.first, self.last)
    }
}

impl FromStr for PageRange {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        PageRange::parse(s)
    }
}

fn parse_page(s: &str) -> Result<u32> {
    let s = s.trim();
    match s.parse::<u32>() {
        Ok(0) => Err(anyhow!("Page numbers must be >= 1")),
        Ok(n) => Ok(n),
        Err(_) => Err(anyhow!("Invalid page number: {}", s)),
    }
}
