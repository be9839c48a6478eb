//! Lazily loaded, memoized corpus sources
//!
//! Corpus sources are large static text files; each is read and split into
//! lines at most once per process. Concurrent first requests for the same
//! source share a single load (single-flight). A missing or unreadable
//! source yields an empty line sequence and a recorded failure so that
//! retrieval can continue with whichever sources are available.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::OnceCell;
use tracing::warn;

type LineCell = Arc<OnceCell<Arc<Vec<String>>>>;

/// Process-wide cache of corpus sources, keyed by source id
pub struct CorpusStore {
    /// Directory containing one `<source_id>.txt` file per source
    root: PathBuf,
    /// One cell per source id; the cell enforces single-flight loading
    cells: Mutex<HashMap<String, LineCell>>,
    /// Source ids whose backing file could not be read
    failures: Mutex<Vec<String>>,
    /// Number of underlying read attempts (test observability)
    load_count: AtomicUsize,
}

impl CorpusStore {
    /// Create a store backed by a directory of plain-text sources
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cells: Mutex::new(HashMap::new()),
            failures: Mutex::new(Vec::new()),
            load_count: AtomicUsize::new(0),
        }
    }

    /// Load a source's lines, reading the backing file at most once
    ///
    /// Never errors: an unreadable source caches an empty line sequence and
    /// records the failure, so repeat requests do not retry the read.
    pub async fn load(&self, source_id: &str) -> Arc<Vec<String>> {
        let cell = {
            let mut cells = self.cells.lock().expect("corpus cell map poisoned");
            cells
                .entry(source_id.to_string())
                .or_insert_with(|| Arc::new(OnceCell::new()))
                .clone()
        };

        cell.get_or_init(|| self.read_source(source_id.to_string()))
            .await
            .clone()
    }

    async fn read_source(&self, source_id: String) -> Arc<Vec<String>> {
        self.load_count.fetch_add(1, Ordering::SeqCst);
        let path = self.root.join(format!("{}.txt", source_id));

        match tokio::fs::read_to_string(&path).await {
            Ok(text) => {
                let lines: Vec<String> = text.lines().map(str::to_string).collect();
                Arc::new(lines)
            }
            Err(err) => {
                warn!(source = %source_id, error = %err, "corpus source unreadable, skipping");
                self.failures
                    .lock()
                    .expect("corpus failure list poisoned")
                    .push(source_id);
                Arc::new(Vec::new())
            }
        }
    }

    /// Source ids that failed to load so far
    pub fn failures(&self) -> Vec<String> {
        self.failures
            .lock()
            .expect("corpus failure list poisoned")
            .clone()
    }

    /// Number of underlying read attempts performed
    pub fn load_count(&self) -> usize {
        self.load_count.load(Ordering::SeqCst)
    }

    /// Drop all cached sources and counters
    ///
    /// Test hook: lets each test start from a clean cache instead of
    /// depending on incidental process reuse.
    pub fn reset(&self) {
        self.cells.lock().expect("corpus cell map poisoned").clear();
        self.failures
            .lock()
            .expect("corpus failure list poisoned")
            .clear();
        self.load_count.store(0, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn store_with_source(content: &str) -> (tempfile::TempDir, CorpusStore) {
        let dir = tempfile::tempdir().unwrap();
        let mut f = std::fs::File::create(dir.path().join("absorbent_mind.txt")).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        let store = CorpusStore::new(dir.path());
        (dir, store)
    }

    #[tokio::test]
    async fn test_load_splits_lines() {
        let (_dir, store) = store_with_source("first line\nsecond line\nthird line");
        let lines = store.load("absorbent_mind").await;
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "second line");
    }

    #[tokio::test]
    async fn test_second_load_is_cached() {
        let (_dir, store) = store_with_source("alpha\nbeta");
        let first = store.load("absorbent_mind").await;
        let second = store.load("absorbent_mind").await;
        assert_eq!(store.load_count(), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_missing_source_is_empty_not_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = CorpusStore::new(dir.path());
        let lines = store.load("no_such_source").await;
        assert!(lines.is_empty());
        assert_eq!(store.failures(), vec!["no_such_source".to_string()]);
    }

    #[tokio::test]
    async fn test_missing_source_read_attempted_once() {
        let dir = tempfile::tempdir().unwrap();
        let store = CorpusStore::new(dir.path());
        store.load("no_such_source").await;
        store.load("no_such_source").await;
        assert_eq!(store.load_count(), 1);
        assert_eq!(store.failures().len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_loads_single_flight() {
        let (_dir, store) = store_with_source("one\ntwo\nthree");
        let store = Arc::new(store);

        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = store.clone();
            handles.push(tokio::spawn(
                async move { store.load("absorbent_mind").await },
            ));
        }
        for handle in handles {
            let lines = handle.await.unwrap();
            assert_eq!(lines.len(), 3);
        }
        assert_eq!(store.load_count(), 1);
    }

    #[tokio::test]
    async fn test_reset_clears_cache() {
        let (_dir, store) = store_with_source("one");
        store.load("absorbent_mind").await;
        assert_eq!(store.load_count(), 1);

        store.reset();
        assert_eq!(store.load_count(), 0);
        store.load("absorbent_mind").await;
        assert_eq!(store.load_count(), 1);
    }
}
