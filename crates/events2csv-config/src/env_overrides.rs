use super::{FsConfig, GcsConfig, LogFormat, RuntimeConfig, S3Config, StorageBackend};
use crate::error::{ConfigError, Result};

pub const ENV_PREFIX: &str = "EVENTS2CSV_";

/// Abstraction over environment-variable lookups so tests can supply their
/// own source of overrides.
pub trait EnvSource {
    fn get(&self, key: &str) -> Option<String>;

    /// Get an environment variable WITHOUT the EVENTS2CSV_ prefix.
    /// Used for the unprefixed variable names (INPUT_BUCKET, ...).
    fn get_raw(&self, key: &str) -> Option<String>;
}

/// Apply environment-variable overrides (highest priority) to the runtime config.
pub fn apply_env_overrides<E: EnvSource>(config: &mut RuntimeConfig, env: &E) -> Result<()> {
    // Job inputs accept both EVENTS2CSV_<KEY> and the bare <KEY>
    if let Some(bucket) = get_job_string(env, "INPUT_BUCKET") {
        config.input.bucket = bucket;
    }
    if let Some(prefix) = get_job_string(env, "INPUT_PREFIX") {
        config.input.prefix = prefix;
    }
    if let Some(bucket) = get_job_string(env, "OUTPUT_BUCKET") {
        config.output.bucket = bucket;
    }
    if let Some(val) = get_job_u64(env, "LOOKBACK_HOURS")? {
        config.job.lookback_hours = val;
    }

    // Storage backend
    if let Some(backend) = env.get("STORAGE_BACKEND") {
        config.storage.backend = backend.parse::<StorageBackend>()?;
    }
    if let Some(path) = env.get("STORAGE_PATH") {
        config.storage.fs.get_or_insert_with(FsConfig::default).path = path;
    }
    if let Some(region) = env.get("S3_REGION") {
        ensure_s3(config).region = region;
    }
    if let Some(endpoint) = env.get("S3_ENDPOINT") {
        ensure_s3(config).endpoint = Some(endpoint);
    }
    if let Some(path) = env.get("GCS_CREDENTIAL_PATH") {
        ensure_gcs(config).credential_path = Some(path);
    }
    if let Some(endpoint) = env.get("GCS_ENDPOINT") {
        ensure_gcs(config).endpoint = Some(endpoint);
    }

    // Logging
    if let Some(level) = env.get("LOG_LEVEL") {
        config.log.level = level;
    }
    if let Some(format) = env.get("LOG_FORMAT") {
        config.log.format = format.parse::<LogFormat>()?;
    }

    Ok(())
}

fn ensure_s3(config: &mut RuntimeConfig) -> &mut S3Config {
    config.storage.s3.get_or_insert_with(S3Config::default)
}

fn ensure_gcs(config: &mut RuntimeConfig) -> &mut GcsConfig {
    config.storage.gcs.get_or_insert_with(GcsConfig::default)
}

/// Prefixed name wins over the bare one.
fn get_job_string<E: EnvSource>(env: &E, key: &str) -> Option<String> {
    env.get(key).or_else(|| env.get_raw(key))
}

fn get_job_u64<E: EnvSource>(env: &E, key: &str) -> Result<Option<u64>> {
    match get_job_string(env, key) {
        Some(val) => {
            let parsed = val.trim().parse::<u64>().map_err(|e| {
                ConfigError::invalid_value(
                    key,
                    val.as_str(),
                    format!("expected a non-negative integer ({})", e),
                )
            })?;
            Ok(Some(parsed))
        }
        None => Ok(None),
    }
}
