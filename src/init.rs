// Initialization utilities
//
// Storage backend and logging/tracing setup

use events2csv_config::{LogFormat, LogConfig, RuntimeConfig, StorageBackend};
use events2csv_core::Result;
use events2csv_storage::OpendalStore;
use tracing::info;

/// Input and output stores of one run
pub struct Stores {
    pub input: OpendalStore,
    pub output: OpendalStore,
}

/// Initialize input and output storage from RuntimeConfig
pub fn init_stores(config: &RuntimeConfig) -> Result<Stores> {
    info!(
        "Initializing storage with backend: {}",
        config.storage.backend
    );

    match config.storage.backend {
        StorageBackend::Fs => {
            if let Some(fs) = config.storage.fs.as_ref() {
                info!("Using filesystem storage at: {}", fs.path);
            } else {
                info!("Using filesystem storage");
            }
        }
        StorageBackend::S3 => {
            if let Some(s3) = config.storage.s3.as_ref() {
                info!("Using S3 storage: region={}", s3.region);
            } else {
                info!("Using S3 storage");
            }
        }
        StorageBackend::Gcs => info!("Using GCS storage"),
    }

    Ok(Stores {
        input: OpendalStore::from_config(&config.storage, &config.input.bucket)?,
        output: OpendalStore::from_config(&config.storage, &config.output.bucket)?,
    })
}

/// Initialize tracing/logging from the `[log]` section
pub fn init_tracing(log: &LogConfig) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let env_filter = EnvFilter::try_new(&log.level).unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    // Try to set the global subscriber; ignore error if already set (idempotent)
    let _ = match log.format {
        LogFormat::Json => {
            tracing::subscriber::set_global_default(registry.with(fmt::layer().json()))
        }
        LogFormat::Text => tracing::subscriber::set_global_default(registry.with(fmt::layer())),
    };
}
