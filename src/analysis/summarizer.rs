use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

use crate::config::DEFAULT_SUMMARY_SENTENCES;

static RE_SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]\s+").expect("sentence boundary regex compiles"));

static RE_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-zA-Z]{3,}").expect("word regex compiles"));

const MIN_SENTENCE_CHARS: usize = 15;

const FIRST_BONUS: f64 = 3.0;
const LAST_BONUS: f64 = 1.5;
const SECOND_BONUS: f64 = 1.2;

pub struct Summarizer {
    max_sentences: usize,
}

#[derive(Debug, Clone)]
struct ScoredSentence<'a> {
    index: usize,
    score: f64,
    text: &'a str,
}

impl Summarizer {
    pub fn new(max_sentences: usize) -> Self {
        Self { max_sentences }
    }

    pub fn max_sentences(&self) -> usize {
        self.max_sentences
    }

    pub fn summarize(&self, text: &str) -> String {
        summarize(text, self.max_sentences)
    }

    /// Every sentence regardless of length, for texts that have no long ones.
    pub fn short_summary(&self, text: &str) -> String {
        split_sentences(text)
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for Summarizer {
    fn default() -> Self {
        Self::new(DEFAULT_SUMMARY_SENTENCES)
    }
}

pub fn summarize(text: &str, max_sentences: usize) -> String {
    let sentences: Vec<&str> = split_sentences(text)
        .into_iter()
        .filter(|s| s.chars().count() > MIN_SENTENCE_CHARS)
        .collect();

    if sentences.len() <= max_sentences {
        return sentences.join(" ");
    }

    let freq = word_frequencies(text);
    let last = sentences.len() - 1;

    // Phase one: score in document order, pick the best by a stable sort.
    let mut scored: Vec<ScoredSentence> = sentences
        .iter()
        .enumerate()
        .map(|(index, &sentence)| ScoredSentence {
            index,
            score: word_score(sentence, &freq) + position_bonus(index, last),
            text: sentence,
        })
        .collect();

    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(max_sentences);

    // Phase two: emit the winners in reading order.
    scored.sort_by_key(|s| s.index);

    scored
        .iter()
        .map(|s| s.text)
        .collect::<Vec<_>>()
        .join(" ")
}

fn split_sentences(text: &str) -> Vec<&str> {
    let text = text.trim();
    let mut sentences = Vec::new();
    let mut start = 0;

    for m in RE_SENTENCE_END.find_iter(text) {
        // the punctuation mark is one ASCII byte
        sentences.push(text[start..m.start() + 1].trim());
        start = m.end();
    }
    if start < text.len() {
        sentences.push(text[start..].trim());
    }

    sentences
}

fn word_frequencies(text: &str) -> HashMap<String, u32> {
    let mut freq = HashMap::new();
    for word in RE_WORD.find_iter(&text.to_lowercase()) {
        *freq.entry(word.as_str().to_string()).or_insert(0) += 1;
    }
    freq
}

fn word_score(sentence: &str, freq: &HashMap<String, u32>) -> f64 {
    let lower = sentence.to_lowercase();
    let counts: Vec<u32> = RE_WORD
        .find_iter(&lower)
        .map(|w| freq.get(w.as_str()).copied().unwrap_or(0))
        .collect();

    if counts.is_empty() {
        return 0.0;
    }

    counts.iter().map(|&c| f64::from(c)).sum::<f64>() / counts.len() as f64
}

fn position_bonus(index: usize, last: usize) -> f64 {
    if index == 0 {
        FIRST_BONUS
    } else if index == last {
        LAST_BONUS
    } else if index == 1 {
        SECOND_BONUS
    } else {
        0.0
    }
}
