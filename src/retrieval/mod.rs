//! Question-to-passage retrieval

pub mod engine;
pub mod rules;

pub use engine::{KnowledgeResult, KnowledgeRetriever, Passage};
pub use rules::{identify_topics, DEFAULT_TOPICS, KEYWORD_RULES};
