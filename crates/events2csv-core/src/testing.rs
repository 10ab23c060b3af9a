//! In-memory object store for tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;

use crate::error::{PipelineError, Result};
use crate::store::{ObjectSink, ObjectSource};
use crate::types::StoredObject;

#[derive(Debug, Clone)]
struct Entry {
    content: Vec<u8>,
    content_type: Option<String>,
    last_modified: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
struct State {
    objects: BTreeMap<String, Entry>,
    failing_writes: HashSet<String>,
    reads: usize,
    writes: usize,
}

/// Object store kept in a `BTreeMap`, listing in path order.
///
/// Modification times are set explicitly so lookback filtering can be tested
/// against a fixed clock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, path: &str, content: impl Into<Vec<u8>>, last_modified: DateTime<Utc>) {
        self.put(path, content.into(), Some(last_modified));
    }

    pub fn insert_without_mtime(&self, path: &str, content: impl Into<Vec<u8>>) {
        self.put(path, content.into(), None);
    }

    /// Make every write to `path` fail.
    pub fn fail_writes_to(&self, path: &str) {
        self.lock().failing_writes.insert(path.to_string());
    }

    pub fn content(&self, path: &str) -> Option<String> {
        self.lock()
            .objects
            .get(path)
            .map(|entry| String::from_utf8_lossy(&entry.content).into_owned())
    }

    pub fn content_type(&self, path: &str) -> Option<String> {
        self.lock()
            .objects
            .get(path)
            .and_then(|entry| entry.content_type.clone())
    }

    pub fn paths_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.lock()
            .objects
            .keys()
            .filter(|path| path.starts_with(prefix))
            .cloned()
            .collect()
    }

    pub fn read_count(&self) -> usize {
        self.lock().reads
    }

    pub fn write_count(&self) -> usize {
        self.lock().writes
    }

    fn put(&self, path: &str, content: Vec<u8>, last_modified: Option<DateTime<Utc>>) {
        self.lock().objects.insert(
            path.to_string(),
            Entry {
                content,
                content_type: None,
                last_modified,
            },
        );
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl ObjectSource for MemoryStore {
    async fn list(&self, prefix: &str) -> Result<Vec<StoredObject>> {
        Ok(self
            .lock()
            .objects
            .iter()
            .filter(|(path, _)| path.starts_with(prefix))
            .map(|(path, entry)| StoredObject {
                path: path.clone(),
                last_modified: entry.last_modified,
            })
            .collect())
    }

    async fn read(&self, object: &StoredObject) -> Result<Vec<u8>> {
        let mut state = self.lock();
        state.reads += 1;
        state
            .objects
            .get(&object.path)
            .map(|entry| entry.content.clone())
            .ok_or_else(|| PipelineError::storage("read", &object.path, "object not found"))
    }
}

#[async_trait]
impl ObjectSink for MemoryStore {
    async fn write(&self, path: &str, content: Vec<u8>, content_type: &str) -> Result<()> {
        let mut state = self.lock();
        if state.failing_writes.contains(path) {
            return Err(PipelineError::storage("write", path, "injected failure"));
        }

        state.writes += 1;
        state.objects.insert(
            path.to_string(),
            Entry {
                content,
                content_type: Some(content_type.to_string()),
                last_modified: None,
            },
        );
        Ok(())
    }
}
