pub mod actions;
pub mod dates;

use serde::Deserialize;
use std::path::Path;

use crate::error::Result;
use crate::models::Category;

pub use actions::ActionLexicon;
pub use dates::DatePatterns;

#[derive(Debug, Clone, PartialEq)]
pub struct KeywordBank {
    pub category: Category,
    pub weight: u32,
    pub keywords: Vec<String>,
}

/// The four scored banks, always held in declaration order:
/// academic, event, urgent, administrative. Classification ties go to the
/// earlier bank, so the order is not configurable.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordBanks {
    banks: [KeywordBank; 4],
}

impl KeywordBanks {
    pub fn new() -> Self {
        Self {
            banks: [
                Self::init_academic(),
                Self::init_event(),
                Self::init_urgent(),
                Self::init_administrative(),
            ],
        }
    }

    fn init_academic() -> KeywordBank {
        let keywords = [
            "exam", "assignment", "quiz", "grade", "marks", "semester", "course",
            "lecture", "lab", "midterm", "endsem", "syllabus", "attendance",
            "project", "submission", "deadline", "credit", "cgpa", "sgpa",
            "professor", "instructor", "tutorial", "viva", "thesis", "research",
        ];
        Self::bank(Category::Academic, 1, &keywords)
    }

    fn init_event() -> KeywordBank {
        let keywords = [
            "fest", "event", "workshop", "seminar", "hackathon", "competition",
            "cultural", "sports", "club", "registration", "ceremony", "concert",
            "talk", "webinar", "meetup", "celebration", "annual", "inauguration",
        ];
        Self::bank(Category::Event, 1, &keywords)
    }

    fn init_urgent() -> KeywordBank {
        let keywords = [
            "urgent", "immediately", "asap", "emergency", "critical", "important",
            "mandatory", "compulsory", "last date", "final notice", "warning",
            "action required", "respond", "deadline today", "expiring",
        ];
        // urgency words count double
        Self::bank(Category::Urgent, 2, &keywords)
    }

    fn init_administrative() -> KeywordBank {
        let keywords = [
            "fee", "hostel", "mess", "library", "scholarship", "stipend",
            "administration", "registrar", "dean", "warden", "maintenance",
            "id card", "document", "certificate", "noc", "leave",
        ];
        Self::bank(Category::Administrative, 1, &keywords)
    }

    fn bank(category: Category, weight: u32, keywords: &[&str]) -> KeywordBank {
        KeywordBank {
            category,
            weight,
            keywords: normalize_terms(keywords.iter().copied()),
        }
    }

    pub fn banks(&self) -> &[KeywordBank] {
        &self.banks
    }

    pub fn get(&self, category: Category) -> Option<&KeywordBank> {
        self.banks.iter().find(|b| b.category == category)
    }

    fn get_mut(&mut self, category: Category) -> Option<&mut KeywordBank> {
        self.banks.iter_mut().find(|b| b.category == category)
    }

    fn apply(&mut self, overrides: KeywordOverrides) {
        let pairs = [
            (Category::Academic, overrides.academic),
            (Category::Event, overrides.event),
            (Category::Urgent, overrides.urgent),
            (Category::Administrative, overrides.administrative),
        ];

        for (category, over) in pairs {
            let (Some(over), Some(bank)) = (over, self.get_mut(category)) else {
                continue;
            };
            if let Some(keywords) = over.keywords {
                bank.keywords = normalize_terms(keywords.iter().map(String::as_str));
            }
            if let Some(weight) = over.weight {
                bank.weight = weight;
            }
        }
    }
}

impl Default for KeywordBanks {
    fn default() -> Self {
        Self::new()
    }
}

// An empty keyword would match every text.
pub(crate) fn normalize_terms<'a>(terms: impl Iterator<Item = &'a str>) -> Vec<String> {
    terms
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct TriageTaxonomy {
    pub keywords: KeywordBanks,
    pub date_patterns: DatePatterns,
    pub actions: ActionLexicon,
}

impl TriageTaxonomy {
    /// Built-in rules with any sections from `json` layered on top.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: RulesFile = serde_json::from_str(json)?;
        let mut taxonomy = Self::default();

        if let Some(keywords) = file.keywords {
            taxonomy.keywords.apply(keywords);
        }
        if let Some(patterns) = file.date_patterns {
            taxonomy.date_patterns = DatePatterns::new(&patterns)?;
        }
        if let Some(actions) = file.actions {
            taxonomy.actions.apply(actions);
        }

        Ok(taxonomy)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let taxonomy = Self::from_json(&json)?;
        tracing::info!("Loaded triage rules from {}", path.display());
        Ok(taxonomy)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RulesFile {
    keywords: Option<KeywordOverrides>,
    date_patterns: Option<Vec<String>>,
    actions: Option<actions::ActionOverrides>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct KeywordOverrides {
    academic: Option<BankOverride>,
    event: Option<BankOverride>,
    urgent: Option<BankOverride>,
    administrative: Option<BankOverride>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct BankOverride {
    keywords: Option<Vec<String>>,
    weight: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::io::Write;

    #[test]
    fn test_bank_declaration_order() {
        let banks = KeywordBanks::new();
        let order: Vec<_> = banks.banks().iter().map(|b| b.category).collect();
        assert_eq!(
            order,
            vec![
                Category::Academic,
                Category::Event,
                Category::Urgent,
                Category::Administrative
            ]
        );
    }

    #[test]
    fn test_urgent_bank_weighs_double() {
        let banks = KeywordBanks::new();
        assert_eq!(banks.get(Category::Urgent).unwrap().weight, 2);
        assert_eq!(banks.get(Category::Academic).unwrap().weight, 1);
        assert!(banks.get(Category::General).is_none());
    }

    #[test]
    fn test_override_keeps_other_banks() {
        let taxonomy = TriageTaxonomy::from_json(
            r#"{"keywords": {"event": {"keywords": ["  Open Mic ", ""], "weight": 3}}}"#,
        )
        .unwrap();

        let event = taxonomy.keywords.get(Category::Event).unwrap();
        assert_eq!(event.keywords, vec!["open mic".to_string()]);
        assert_eq!(event.weight, 3);
        assert_eq!(
            taxonomy.keywords.get(Category::Academic),
            KeywordBanks::new().get(Category::Academic)
        );
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let err = TriageTaxonomy::from_json(r#"{"date_patterns": ["(unclosed"]}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidPattern(_)));
    }

    #[test]
    fn test_unknown_section_rejected() {
        let err = TriageTaxonomy::from_json(r#"{"general": {}}"#).unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"actions": {{"verbs": ["renew"]}}}}"#).unwrap();

        let taxonomy = TriageTaxonomy::from_json_file(file.path()).unwrap();
        assert_eq!(taxonomy.actions.verbs, vec!["renew".to_string()]);
        assert_eq!(taxonomy.actions.obligations, ActionLexicon::new().obligations);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = TriageTaxonomy::from_json_file("/nonexistent/rules.json").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
