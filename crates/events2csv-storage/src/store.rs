// OpenDAL-based object store
//
// Unified storage abstraction across backends:
// - GCS and S3 buckets
// - Filesystem directories (local runs and tests)

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use events2csv_config::StorageConfig;
use events2csv_core::{ObjectSink, ObjectSource, PipelineError, Result, StoredObject};
use opendal::{Metadata, Operator};
use std::time::SystemTime;

use crate::operator::build_operator;

#[derive(Clone)]
pub struct OpendalStore {
    operator: Operator,
}

impl OpendalStore {
    pub fn new(operator: Operator) -> Self {
        Self { operator }
    }

    /// Create a store for one bucket of the configured backend
    pub fn from_config(storage: &StorageConfig, bucket: &str) -> Result<Self> {
        build_operator(storage, bucket).map(Self::new)
    }

    pub fn operator(&self) -> &Operator {
        &self.operator
    }

    async fn modification_time(
        &self,
        path: &str,
        listed: &Metadata,
    ) -> Result<Option<DateTime<Utc>>> {
        if let Some(modified) = to_utc(listed) {
            return Ok(Some(modified));
        }

        // Some listers only report names; ask for the full metadata
        let meta = self
            .operator
            .stat(path)
            .await
            .map_err(|e| PipelineError::storage("stat", path, e))?;
        Ok(to_utc(&meta))
    }
}

#[async_trait]
impl ObjectSource for OpendalStore {
    async fn list(&self, prefix: &str) -> Result<Vec<StoredObject>> {
        let entries = self
            .operator
            .list_with(prefix)
            .recursive(true)
            .await
            .map_err(|e| PipelineError::storage("list", prefix, e))?;

        let mut objects = Vec::with_capacity(entries.len());
        for entry in entries {
            if !entry.metadata().is_file() {
                continue;
            }

            let last_modified = self
                .modification_time(entry.path(), entry.metadata())
                .await?;
            objects.push(StoredObject {
                path: entry.path().to_string(),
                last_modified,
            });
        }

        // Listing order differs between backends
        objects.sort_by(|a, b| a.path.cmp(&b.path));
        tracing::debug!(prefix, count = objects.len(), "Listed objects");
        Ok(objects)
    }

    async fn read(&self, object: &StoredObject) -> Result<Vec<u8>> {
        let data = self
            .operator
            .read(&object.path)
            .await
            .map_err(|e| PipelineError::storage("read", &object.path, e))?;
        Ok(data.to_vec())
    }
}

#[async_trait]
impl ObjectSink for OpendalStore {
    async fn write(&self, path: &str, content: Vec<u8>, content_type: &str) -> Result<()> {
        let supports_content_type = self
            .operator
            .info()
            .full_capability()
            .write_with_content_type;

        let result = if supports_content_type {
            self.operator
                .write_with(path, content)
                .content_type(content_type)
                .await
        } else {
            self.operator.write(path, content).await
        };

        result
            .map(|_| ())
            .map_err(|e| PipelineError::storage("write", path, e))
    }
}

fn to_utc(meta: &Metadata) -> Option<DateTime<Utc>> {
    let modified: SystemTime = meta.last_modified()?.into();
    Some(DateTime::<Utc>::from(modified))
}
