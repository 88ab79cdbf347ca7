//! TF-IDF keyword weighting over the aggregated search text

use jieba_rs::{Jieba, KeywordExtract, TfIdf};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Weighted terms extracted from a text; keys are unique, weights non-negative
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrequencyTable {
    weights: HashMap<String, f64>,
}

impl FrequencyTable {
    /// Builds a table, dropping blank terms and clamping weights at zero
    ///
    /// A repeated term keeps its largest weight.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut weights: HashMap<String, f64> = HashMap::new();
        for (term, weight) in pairs {
            let term = term.into();
            if term.trim().is_empty() {
                continue;
            }
            let weight = if weight.is_finite() { weight.max(0.0) } else { 0.0 };
            let entry = weights.entry(term).or_insert(weight);
            *entry = entry.max(weight);
        }
        Self { weights }
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn get(&self, term: &str) -> Option<f64> {
        self.weights.get(term).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Terms by descending weight, ties broken alphabetically
    pub fn sorted(&self) -> Vec<(&str, f64)> {
        let mut entries: Vec<(&str, f64)> = self.iter().collect();
        entries.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }
}

/// Segments text with jieba and ranks terms by TF-IDF
pub struct KeywordExtractor {
    jieba: Jieba,
    tfidf: TfIdf,
}

impl KeywordExtractor {
    /// Loads the bundled dictionary, IDF table and stop words
    pub fn new() -> Self {
        Self {
            jieba: Jieba::new(),
            tfidf: TfIdf::default(),
        }
    }

    /// Extracts at most `top_k` weighted terms from `text`
    pub fn extract(&self, text: &str, top_k: usize) -> FrequencyTable {
        if top_k == 0 || text.trim().is_empty() {
            return FrequencyTable::default();
        }

        let keywords = self
            .tfidf
            .extract_keywords(&self.jieba, text, top_k, Vec::new());
        ::log::debug!("Extracted {} keywords (top_k = {})", keywords.len(), top_k);

        let table = FrequencyTable::from_pairs(
            keywords
                .into_iter()
                .take(top_k)
                .map(|k| (k.keyword, k.weight)),
        );
        if let Some((term, weight)) = table.sorted().first() {
            ::log::debug!("Heaviest keyword: {} ({:.4})", term, weight);
        }
        table
    }
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new()
    }
}
