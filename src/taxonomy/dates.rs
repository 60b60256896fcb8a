use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;

use crate::error::Result;

/// Deadline search order. The first pattern with any hit decides the deadline,
/// so numeric dates outrank written ones, which outrank "by/before/due" phrases.
pub const DEFAULT_DATE_PATTERNS: &[&str] = &[
    // 15/03/2026, 1-4-26
    r"\d{1,2}[/-]\d{1,2}[/-]\d{2,4}",
    // 15 March 2026
    r"\d{1,2}\s+(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)\w*\s+\d{2,4}",
    // March 15, 2026
    r"(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)\w*\s+\d{1,2},?\s+\d{2,4}",
    // Friday, 20 March
    r"(?:monday|tuesday|wednesday|thursday|friday|saturday|sunday),?\s+\d{1,2}\s+\w+",
    r"by\s+\d{1,2}\s+\w+",
    r"before\s+\d{1,2}\s+\w+",
    r"due\s+(?:on|by)?\s*\d{1,2}\s+\w+",
];

static BUILTIN: LazyLock<DatePatterns> = LazyLock::new(|| {
    DatePatterns::new(DEFAULT_DATE_PATTERNS).expect("built-in date patterns compile")
});

#[derive(Debug, Clone)]
pub struct DatePatterns {
    patterns: Vec<Regex>,
}

impl DatePatterns {
    pub fn new<S: AsRef<str>>(sources: &[S]) -> Result<Self> {
        let patterns = sources
            .iter()
            .map(|s| RegexBuilder::new(s.as_ref()).case_insensitive(true).build())
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Regex> {
        self.patterns.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl Default for DatePatterns {
    fn default() -> Self {
        BUILTIN.clone()
    }
}
