use crate::models::Category;
use crate::taxonomy::KeywordBanks;

const URGENT_WEIGHT: f64 = 0.4;
const DENSITY_WEIGHT: f64 = 0.05;

pub struct Classifier {
    banks: KeywordBanks,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryScores {
    scores: Vec<(Category, u32)>,
}

impl CategoryScores {
    pub fn get(&self, category: Category) -> u32 {
        self.scores
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, s)| *s)
            .unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.scores.iter().map(|(_, s)| s).sum()
    }

    /// Highest score wins; on a tie the earlier bank keeps the lead.
    pub fn best(&self) -> Category {
        let mut best: Option<(Category, u32)> = None;
        for &(category, score) in &self.scores {
            match best {
                Some((_, top)) if score <= top => {}
                _ => best = Some((category, score)),
            }
        }

        match best {
            Some((category, score)) if score > 0 => category,
            _ => Category::General,
        }
    }

    /// Urgent matches count in both terms.
    pub fn priority(&self) -> f64 {
        let urgent = f64::from(self.get(Category::Urgent));
        let total = f64::from(self.total());
        let priority = (urgent * URGENT_WEIGHT + total * DENSITY_WEIGHT).min(1.0);
        round2(priority.max(0.0))
    }
}

impl Classifier {
    pub fn new(banks: KeywordBanks) -> Self {
        Self { banks }
    }

    pub fn classify(&self, subject: &str, body: &str) -> (Category, f64) {
        let scores = self.score(subject, body);
        let category = scores.best();
        let priority = scores.priority();

        tracing::debug!(
            academic = scores.get(Category::Academic),
            event = scores.get(Category::Event),
            urgent = scores.get(Category::Urgent),
            administrative = scores.get(Category::Administrative),
            %category,
            priority,
            "Classified message"
        );

        (category, priority)
    }

    /// Each keyword found anywhere in the text adds its bank's weight once.
    /// Matching is plain substring, so "lab" also fires inside "label".
    pub fn score(&self, subject: &str, body: &str) -> CategoryScores {
        let text = format!("{} {}", subject, body).to_lowercase();

        let scores = self
            .banks
            .banks()
            .iter()
            .map(|bank| {
                let hits = bank
                    .keywords
                    .iter()
                    .filter(|kw| text.contains(kw.as_str()))
                    .count() as u32;
                (bank.category, hits * bank.weight)
            })
            .collect();

        CategoryScores { scores }
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(KeywordBanks::default())
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
