//! Corpus loading and topic indexing

pub mod index;
pub mod store;

pub use index::{TopicEntry, TopicIndex, TopicSource};
pub use store::CorpusStore;
