// Configuration validation
//
// Validates that required fields are present and values are sensible

use super::*;
use tracing::warn;

pub fn validate_config(config: &RuntimeConfig) -> Result<()> {
    if config.input.bucket.trim().is_empty() {
        return Err(missing("input", "bucket", "INPUT_BUCKET"));
    }

    if config.output.bucket.trim().is_empty() {
        return Err(missing("output", "bucket", "OUTPUT_BUCKET"));
    }

    // A year of lookback almost certainly means a typo in hours
    if config.job.lookback_hours > 24 * 365 {
        warn!(
            lookback_hours = config.job.lookback_hours,
            "job.lookback_hours is very large; most files will wait a long time before processing"
        );
    }

    validate_storage_config(&config.storage)
}

fn validate_storage_config(config: &StorageConfig) -> Result<()> {
    match config.backend {
        StorageBackend::Fs => {
            if let Some(fs) = &config.fs {
                if fs.path.is_empty() {
                    return Err(missing("storage.fs", "path", "EVENTS2CSV_STORAGE_PATH"));
                }
            }
        }
        StorageBackend::S3 => {
            if let Some(s3) = &config.s3 {
                if s3.region.is_empty() {
                    return Err(missing("storage.s3", "region", "EVENTS2CSV_S3_REGION"));
                }
            }
        }
        StorageBackend::Gcs => {}
    }

    Ok(())
}

fn missing(section: &'static str, key: &'static str, env_var: &str) -> ConfigError {
    ConfigError::MissingField {
        section,
        key,
        env_var: env_var.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> RuntimeConfig {
        let mut config = RuntimeConfig::default();
        config.input.bucket = "raw".to_string();
        config.output.bucket = "summaries".to_string();
        config
    }

    #[test]
    fn test_validate_required_buckets() {
        assert!(validate_config(&valid()).is_ok());

        let mut no_input = valid();
        no_input.input.bucket.clear();
        let err = validate_config(&no_input).unwrap_err();
        assert!(err.to_string().starts_with("input.bucket is required"));
        assert!(err.to_string().contains("INPUT_BUCKET"));

        let mut no_output = valid();
        no_output.output.bucket = "  ".to_string();
        assert!(matches!(
            validate_config(&no_output),
            Err(ConfigError::MissingField { section: "output", .. })
        ));
    }

    #[test]
    fn test_validate_storage_config() {
        let mut config = valid();
        config.storage.backend = StorageBackend::S3;
        config.storage.s3 = Some(S3Config {
            region: String::new(),
            endpoint: None,
        });
        assert!(validate_config(&config).is_err());

        config.storage.s3 = Some(S3Config::default());
        assert!(validate_config(&config).is_ok());

        config.storage.backend = StorageBackend::Fs;
        config.storage.fs = Some(FsConfig {
            path: String::new(),
        });
        assert!(validate_config(&config).is_err());
    }
}
