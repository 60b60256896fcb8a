use crate::taxonomy::DatePatterns;

pub struct DeadlineExtractor {
    patterns: DatePatterns,
}

impl DeadlineExtractor {
    pub fn new(patterns: DatePatterns) -> Self {
        Self { patterns }
    }

    /// First match of the first pattern that matches at all, or an empty string.
    pub fn extract_deadline(&self, text: &str) -> String {
        self.patterns
            .iter()
            .find_map(|re| re.find(text))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    }
}

impl Default for DeadlineExtractor {
    fn default() -> Self {
        Self::new(DatePatterns::default())
    }
}
