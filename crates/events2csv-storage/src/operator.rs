//! Storage operator construction from configuration.

use events2csv_config::{StorageBackend, StorageConfig};
use events2csv_core::{PipelineError, Result};
use opendal::Operator;
use std::path::Path;

/// Build an operator rooted at `bucket` for the configured backend.
///
/// For the filesystem backend the bucket is a directory under `storage.fs.path`.
pub fn build_operator(storage: &StorageConfig, bucket: &str) -> Result<Operator> {
    if bucket.is_empty() {
        return Err(PipelineError::configuration("bucket name must not be empty"));
    }

    let operator = match storage.backend {
        StorageBackend::Fs => {
            let base = storage
                .fs
                .as_ref()
                .map(|fs| fs.path.as_str())
                .unwrap_or("./data");
            let root = Path::new(base).join(bucket);

            let fs_builder = opendal::services::Fs::default().root(&root.to_string_lossy());
            Operator::new(fs_builder)
                .map_err(|e| {
                    PipelineError::configuration(format!(
                        "Failed to create filesystem operator: {}",
                        e
                    ))
                })?
                .finish()
        }
        StorageBackend::S3 => {
            let s3 = storage.s3.clone().unwrap_or_default();

            let mut s3_builder = opendal::services::S3::default()
                .bucket(bucket)
                .region(&s3.region);

            if let Some(endpoint) = &s3.endpoint {
                s3_builder = s3_builder.endpoint(endpoint);
            }

            Operator::new(s3_builder)
                .map_err(|e| {
                    PipelineError::configuration(format!("Failed to create S3 operator: {}", e))
                })?
                .finish()
        }
        StorageBackend::Gcs => {
            let gcs = storage.gcs.clone().unwrap_or_default();

            let mut gcs_builder = opendal::services::Gcs::default().bucket(bucket);

            if let Some(path) = &gcs.credential_path {
                gcs_builder = gcs_builder.credential_path(path);
            }
            if let Some(endpoint) = &gcs.endpoint {
                gcs_builder = gcs_builder.endpoint(endpoint);
            }

            Operator::new(gcs_builder)
                .map_err(|e| {
                    PipelineError::configuration(format!("Failed to create GCS operator: {}", e))
                })?
                .finish()
        }
    };

    tracing::debug!(backend = %storage.backend, bucket, "Storage operator initialized");
    Ok(operator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use events2csv_config::FsConfig;

    #[test]
    fn empty_bucket_is_rejected() {
        let err = build_operator(&StorageConfig::default(), "").unwrap_err();
        assert_eq!(err.code().as_str(), "E005");
    }

    #[test]
    fn fs_operator_is_rooted_at_bucket() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageConfig {
            fs: Some(FsConfig {
                path: dir.path().to_string_lossy().into_owned(),
            }),
            ..StorageConfig::default()
        };

        let op = build_operator(&storage, "raw-events").unwrap();
        assert!(op.info().root().contains("raw-events"));
    }
}
