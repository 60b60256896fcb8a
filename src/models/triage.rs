use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::Error;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Academic,
    Event,
    Urgent,
    Administrative,
    #[default]
    General,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Academic,
        Category::Event,
        Category::Urgent,
        Category::Administrative,
        Category::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Academic => "academic",
            Category::Event => "event",
            Category::Urgent => "urgent",
            Category::Administrative => "administrative",
            Category::General => "general",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == lower)
            .ok_or_else(|| Error::UnknownCategory(s.to_string()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TriageResult {
    pub summary: String,
    pub category: Category,
    pub priority_score: f64,
    pub action_items: Vec<String>,
    pub deadline: String,
}

impl TriageResult {
    pub fn has_deadline(&self) -> bool {
        !self.deadline.is_empty()
    }
}
