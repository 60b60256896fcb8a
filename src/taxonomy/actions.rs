use serde::Deserialize;

use super::normalize_terms;

const ACTION_VERBS: &[&str] = &[
    "submit", "register", "attend", "complete", "fill", "report",
    "contact", "visit", "bring", "pay", "upload", "download",
    "sign", "apply", "collect", "note", "ensure", "confirm",
    "prepare", "check", "update", "send", "join", "participate",
];

const OBLIGATION_PHRASES: &[&str] = &["must", "should", "required to", "need to", "have to"];

const COURTESY_PREFIXES: &[&str] = &["please", "kindly"];

#[derive(Debug, Clone, PartialEq)]
pub struct ActionLexicon {
    pub verbs: Vec<String>,
    pub obligations: Vec<String>,
    pub courtesy_prefixes: Vec<String>,
}

impl ActionLexicon {
    pub fn new() -> Self {
        Self {
            verbs: normalize_terms(ACTION_VERBS.iter().copied()),
            obligations: normalize_terms(OBLIGATION_PHRASES.iter().copied()),
            courtesy_prefixes: normalize_terms(COURTESY_PREFIXES.iter().copied()),
        }
    }

    pub(crate) fn apply(&mut self, overrides: ActionOverrides) {
        if let Some(verbs) = overrides.verbs {
            self.verbs = normalize_terms(verbs.iter().map(String::as_str));
        }
        if let Some(obligations) = overrides.obligations {
            self.obligations = normalize_terms(obligations.iter().map(String::as_str));
        }
        if let Some(prefixes) = overrides.courtesy_prefixes {
            self.courtesy_prefixes = normalize_terms(prefixes.iter().map(String::as_str));
        }
    }
}

impl Default for ActionLexicon {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ActionOverrides {
    verbs: Option<Vec<String>>,
    obligations: Option<Vec<String>>,
    courtesy_prefixes: Option<Vec<String>>,
}
