//! Pre-built topic index over the reference corpus
//!
//! Maps `category.topic` keys to the corpus sources and line ranges where
//! that topic is discussed, plus curated key-passage excerpts. The index is
//! a build-time artifact loaded once per process and never mutated; a load
//! failure is the one configuration-level fatal condition in this core.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::errors::{GuruError, Result};

/// Where one topic appears within one corpus source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicSource {
    /// Corpus source id, resolvable via [`CorpusStore`](super::CorpusStore)
    pub source_id: String,
    /// Human-readable source title for prompt provenance
    pub display_name: String,
    /// 1-based inclusive (start, end) line ranges, in documented order;
    /// retrieval always selects the first range (earliest known occurrence)
    pub ranges: Vec<(usize, usize)>,
}

/// One indexed topic
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicEntry {
    /// Topic key in `category.topic` form
    pub key: String,
    /// Sources mentioning this topic, in documented order
    pub sources: Vec<TopicSource>,
    /// Total occurrences counted at index build time
    pub match_count: usize,
    /// Curated short excerpts chosen when the index was built
    #[serde(default)]
    pub key_passages: Vec<String>,
}

/// Immutable topic index, loaded once at process start
///
/// Entries live in an explicit ordered list; the key map only accelerates
/// lookup and never drives iteration order.
pub struct TopicIndex {
    entries: Vec<TopicEntry>,
    by_key: HashMap<String, usize>,
}

impl TopicIndex {
    /// Build an index from entries (used by tests and embedded artifacts)
    pub fn from_entries(entries: Vec<TopicEntry>) -> Self {
        let by_key = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.key.clone(), i))
            .collect();
        Self { entries, by_key }
    }

    /// Load the index artifact from a JSON file
    ///
    /// Failure here is fatal to the pipeline and should be reported once at
    /// startup, not per request.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| GuruError::IndexUnavailable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let entries: Vec<TopicEntry> =
            serde_json::from_str(&contents).map_err(|e| GuruError::IndexUnavailable {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self::from_entries(entries))
    }

    /// Look up a topic by key
    pub fn get(&self, key: &str) -> Option<&TopicEntry> {
        self.by_key.get(key).map(|&i| &self.entries[i])
    }

    /// All entries in index order
    pub fn entries(&self) -> &[TopicEntry] {
        &self.entries
    }

    /// Number of indexed topics
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no topics
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
