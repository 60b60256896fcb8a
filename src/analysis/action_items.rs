use crate::taxonomy::ActionLexicon;

pub const MAX_ACTION_ITEMS: usize = 5;
pub const MAX_ACTION_ITEM_CHARS: usize = 200;
const MIN_SENTENCE_CHARS: usize = 10;

pub struct ActionItemExtractor {
    lexicon: ActionLexicon,
}

impl ActionItemExtractor {
    pub fn new(lexicon: ActionLexicon) -> Self {
        Self { lexicon }
    }

    pub fn extract_action_items(&self, body: &str) -> Vec<String> {
        body.split(|c: char| matches!(c, '.' | '!' | '?' | '\n'))
            .map(str::trim)
            .filter(|s| s.chars().count() >= MIN_SENTENCE_CHARS)
            .filter(|s| self.is_action(s))
            .take(MAX_ACTION_ITEMS)
            .map(|s| s.chars().take(MAX_ACTION_ITEM_CHARS).collect())
            .collect()
    }

    fn is_action(&self, sentence: &str) -> bool {
        let lower = sentence.to_lowercase();
        let imperative = strip_courtesy(&lower, &self.lexicon.courtesy_prefixes);

        self.lexicon.verbs.iter().any(|v| imperative.starts_with(v.as_str()))
            || self.lexicon.obligations.iter().any(|m| lower.contains(m.as_str()))
    }
}

impl Default for ActionItemExtractor {
    fn default() -> Self {
        Self::new(ActionLexicon::default())
    }
}

fn strip_courtesy<'a>(sentence: &'a str, prefixes: &[String]) -> &'a str {
    for prefix in prefixes {
        if let Some(rest) = sentence.strip_prefix(prefix.as_str()) {
            if rest.starts_with(char::is_whitespace) {
                return rest.trim_start();
            }
        }
    }
    sentence
}
