//! Passage retrieval over the indexed corpus
//!
//! Maps a question to candidate topics, then walks the topic index in
//! candidate order extracting one bounded passage per (topic, source) pair
//! until the passage budget is spent.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::config::RetrievalConfig;
use crate::corpus::{CorpusStore, TopicIndex};
use crate::retrieval::rules::identify_topics;

/// One bounded excerpt with provenance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Passage {
    pub source_id: String,
    pub display_name: String,
    /// 1-based inclusive line range within the source
    pub start_line: usize,
    pub end_line: usize,
    /// Whitespace-collapsed content, capped at the configured char count
    pub content: String,
}

/// Result of one retrieval pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeResult {
    pub passages: Vec<Passage>,
    /// Candidate topic keys, in precedence order; never empty
    pub topics: Vec<String>,
    /// Source ids that actually contributed a passage
    pub sources_used: Vec<String>,
}

/// Retrieves reference passages for a free-text question
pub struct KnowledgeRetriever {
    index: Arc<TopicIndex>,
    store: Arc<CorpusStore>,
    config: RetrievalConfig,
}

impl KnowledgeRetriever {
    pub fn new(index: Arc<TopicIndex>, store: Arc<CorpusStore>) -> Self {
        Self::with_config(index, store, RetrievalConfig::default())
    }

    pub fn with_config(
        index: Arc<TopicIndex>,
        store: Arc<CorpusStore>,
        config: RetrievalConfig,
    ) -> Self {
        Self {
            index,
            store,
            config,
        }
    }

    /// Retrieve up to `max_passages` passages relevant to the question
    ///
    /// Topic identification always succeeds (default topics when no rule
    /// matches); unknown topics and unreadable sources are skipped, so the
    /// passage list may be empty while the topic list never is.
    pub async fn retrieve(&self, question: &str, max_passages: usize) -> KnowledgeResult {
        let topics = identify_topics(question);
        debug!(?topics, "identified candidate topics");

        let mut passages: Vec<Passage> = Vec::new();
        let mut sources_used: Vec<String> = Vec::new();

        'topics: for topic in &topics {
            let entry = match self.index.get(topic) {
                Some(entry) => entry,
                None => continue, // topic known to rules but absent from the index
            };

            for source in &entry.sources {
                if passages.len() >= max_passages {
                    break 'topics;
                }

                // First documented range: the earliest known occurrence wins
                let Some(&(start, end)) = source.ranges.first() else {
                    continue;
                };

                let lines = self.store.load(&source.source_id).await;
                if lines.is_empty() {
                    continue; // unreadable source already recorded by the store
                }

                let Some(passage) = self.extract_passage(source, &lines, start, end) else {
                    continue;
                };

                if !sources_used.iter().any(|s| s == &source.source_id) {
                    sources_used.push(source.source_id.clone());
                }
                passages.push(passage);
            }
        }

        KnowledgeResult {
            passages,
            topics,
            sources_used,
        }
    }

    /// Clip, collapse, and cap one indexed range into a passage
    fn extract_passage(
        &self,
        source: &crate::corpus::TopicSource,
        lines: &[String],
        start: usize,
        end: usize,
    ) -> Option<Passage> {
        if start == 0 || start > lines.len() {
            return None;
        }
        let clipped_end = end
            .min(lines.len())
            .min(start.saturating_add(self.config.max_range_lines) - 1);
        if clipped_end < start {
            return None; // malformed range in the index artifact
        }

        let joined = lines[start - 1..clipped_end].join(" ");
        let collapsed: String = joined.split_whitespace().collect::<Vec<_>>().join(" ");

        let content: String = if collapsed.chars().count() > self.config.max_passage_chars {
            collapsed.chars().take(self.config.max_passage_chars).collect()
        } else {
            collapsed
        };

        if content.chars().count() < self.config.min_passage_chars {
            return None; // too short to be a useful reference
        }

        Some(Passage {
            source_id: source.source_id.clone(),
            display_name: source.display_name.clone(),
            start_line: start,
            end_line: clipped_end,
            content,
        })
    }
}
