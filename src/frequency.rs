use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::AnalysisError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    pub word: String,
    pub count: u32,
}

/// Minimum occurrence count, always within `1..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32")]
pub struct Threshold(u32);

impl Threshold {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 100;

    pub fn new(value: u32) -> Result<Self, AnalysisError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Threshold(value))
        } else {
            Err(AnalysisError::InvalidThreshold(value))
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for Threshold {
    type Error = AnalysisError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Threshold::new(value)
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Threshold(Self::MIN)
    }
}

/// Token counts that iterate in order of first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyMap {
    entries: Vec<WordCount>,
    index: HashMap<String, usize>,
}

impl FrequencyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = FrequencyMap::new();
        for token in tokens {
            map.add(token.as_ref());
        }
        map
    }

    pub fn add(&mut self, token: &str) {
        match self.index.get(token) {
            Some(&slot) => self.entries[slot].count += 1,
            None => {
                self.index.insert(token.to_string(), self.entries.len());
                self.entries.push(WordCount {
                    word: token.to_string(),
                    count: 1,
                });
            }
        }
    }

    pub fn get(&self, token: &str) -> Option<u32> {
        self.index.get(token).map(|&slot| self.entries[slot].count)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts, i.e. the number of tokens counted.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.count)).sum()
    }

    pub fn max_count(&self) -> Option<u32> {
        self.entries.iter().map(|e| e.count).max()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WordCount> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[WordCount] {
        &self.entries
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.word.as_str())
    }

    /// Entries with `count >= threshold`, first-seen order kept.
    pub fn filter_min(&self, threshold: Threshold) -> FrequencyMap {
        let mut filtered = FrequencyMap::new();
        for entry in self.entries.iter().filter(|e| e.count >= threshold.get()) {
            filtered
                .index
                .insert(entry.word.clone(), filtered.entries.len());
            filtered.entries.push(entry.clone());
        }
        filtered
    }

    /// The `n` highest counts; equal counts keep first-seen order.
    pub fn most_common(&self, n: usize) -> Vec<WordCount> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked.truncate(n);
        ranked
    }
}

impl<'a> IntoIterator for &'a FrequencyMap {
    type Item = &'a WordCount;
    type IntoIter = std::slice::Iter<'a, WordCount>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
