use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level configuration for the advisory pipeline
///
/// Every field has a documented default; deployments override via a TOML
/// file, tests construct values inline.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GuruConfig {
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    #[serde(default)]
    pub context: ContextConfig,
}

/// Knobs bounding corpus retrieval
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Default passage budget when the caller does not specify one
    pub default_max_passages: usize,
    /// Hard cap on a passage's character count after whitespace collapse
    pub max_passage_chars: usize,
    /// Passages shorter than this are discarded as noise
    pub min_passage_chars: usize,
    /// Maximum lines taken from a single indexed range
    pub max_range_lines: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            default_max_passages: 5,
            max_passage_chars: 1500,
            min_passage_chars: 50,
            max_range_lines: 100,
        }
    }
}

/// Knobs bounding the aggregated child context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextConfig {
    /// Most recent work records kept on the context
    pub max_works: usize,
    /// Observations older than this many days are dropped
    pub observation_window_days: i64,
    /// Most recent observations kept within the window
    pub max_observations: usize,
    /// Prior advisory exchanges kept
    pub max_interactions: usize,
    /// Teacher work-session notes kept (non-empty only)
    pub max_teacher_notes: usize,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            max_works: 30,
            observation_window_days: 30,
            max_observations: 20,
            max_interactions: 5,
            max_teacher_notes: 10,
        }
    }
}

impl GuruConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config: GuruConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        Ok(config)
    }
}
