//! End-to-end advisory pipeline
//!
//! Wires aggregation, retrieval, and prompt assembly into one call, and
//! exposes response parsing for the reply coming back from the model
//! boundary. Prompt construction is atomic: the caller gets either the
//! complete prompt pair or `None` for an unknown child, never a partial
//! prompt.

use std::sync::Arc;
use tracing::debug;

use crate::config::GuruConfig;
use crate::context::{ChildContextAggregator, ChildRecordStore};
use crate::corpus::{CorpusStore, TopicIndex};
use crate::errors::Result;
use crate::parser::{self, ParsedResponse};
use crate::prompt::{assemble, GuruPromptParts};
use crate::retrieval::{KnowledgeResult, KnowledgeRetriever};

/// The advisory core, invoked as a library by the surrounding application
pub struct GuruPipeline {
    aggregator: ChildContextAggregator,
    retriever: KnowledgeRetriever,
    config: GuruConfig,
}

impl GuruPipeline {
    pub fn new(
        records: Arc<dyn ChildRecordStore>,
        index: Arc<TopicIndex>,
        corpus: Arc<CorpusStore>,
    ) -> Self {
        Self::with_config(records, index, corpus, GuruConfig::default())
    }

    pub fn with_config(
        records: Arc<dyn ChildRecordStore>,
        index: Arc<TopicIndex>,
        corpus: Arc<CorpusStore>,
        config: GuruConfig,
    ) -> Self {
        Self {
            aggregator: ChildContextAggregator::with_config(records, config.context.clone()),
            retriever: KnowledgeRetriever::with_config(index, corpus, config.retrieval.clone()),
            config,
        }
    }

    /// Build the `{system, user}` prompt pair for one advisory request
    ///
    /// `Ok(None)` means the child id is unknown; this is the only
    /// user-visible failure. Every other degradation (missing profile,
    /// unreadable corpus source, unmatched question) is absorbed and a
    /// usable prompt is still produced.
    pub async fn build_prompt(
        &self,
        child_id: &str,
        question: &str,
    ) -> Result<Option<GuruPromptParts>> {
        let Some(context) = self.aggregator.build(child_id).await? else {
            debug!(child = child_id, "child record not found, no prompt built");
            return Ok(None);
        };

        let knowledge = self
            .retriever
            .retrieve(question, self.config.retrieval.default_max_passages)
            .await;

        Ok(Some(assemble(question, &context, &knowledge)))
    }

    /// Retrieval only, for callers that want the passages without a prompt
    pub async fn retrieve(&self, question: &str, max_passages: usize) -> KnowledgeResult {
        self.retriever.retrieve(question, max_passages).await
    }

    /// Parse the raw model reply into the structured advisory answer
    ///
    /// Total: always returns a fully-populated result.
    pub fn parse_response(&self, raw_response: &str) -> ParsedResponse {
        parser::parse(raw_response)
    }
}
