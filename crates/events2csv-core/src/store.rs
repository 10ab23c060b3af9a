//! Object store seams.
//!
//! The pipeline never talks to a storage backend directly. Backends implement
//! these traits (see the `events2csv-storage` crate); tests use
//! [`crate::testing::MemoryStore`].

use async_trait::async_trait;

use crate::error::Result;
use crate::types::StoredObject;

/// Content type attached to every summary document.
pub const CSV_CONTENT_TYPE: &str = "text/csv";

/// Read side of the object store.
#[async_trait]
pub trait ObjectSource: Send + Sync {
    /// List every object under `prefix`.
    async fn list(&self, prefix: &str) -> Result<Vec<StoredObject>>;

    /// Fetch the full content of one object.
    async fn read(&self, object: &StoredObject) -> Result<Vec<u8>>;
}

/// Write side of the object store. Writes create or overwrite.
#[async_trait]
pub trait ObjectSink: Send + Sync {
    async fn write(&self, path: &str, content: Vec<u8>, content_type: &str) -> Result<()>;
}
