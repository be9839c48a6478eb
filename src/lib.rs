//! montessori-guru - context-grounded advisory core
//!
//! Turns a free-text question about one specific child into a structured
//! advisory exchange: aggregate the child's records into a snapshot,
//! retrieve bounded reference passages from a pre-indexed corpus, assemble
//! a deterministic two-part prompt, and parse the model's free-text reply
//! back into fixed fields. The model invocation itself, the UI, and the
//! data store live in the surrounding application.

pub mod errors;
pub mod config;
pub mod corpus;
pub mod retrieval;
pub mod context;
pub mod prompt;
pub mod parser;
pub mod pipeline;

// Re-export commonly used types
pub use config::GuruConfig;
pub use context::{ChildContext, ChildContextAggregator, ChildRecordStore};
pub use corpus::{CorpusStore, TopicIndex};
pub use errors::{GuruError, Result};
pub use parser::{ActionItem, ParsedResponse};
pub use pipeline::GuruPipeline;
pub use prompt::GuruPromptParts;
pub use retrieval::{KnowledgeResult, KnowledgeRetriever, Passage};
