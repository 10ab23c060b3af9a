// Configuration source loading.
//
// Priority order:
// 1. Environment variables (EVENTS2CSV_* prefix, then bare job names)
// 2. Config file path from EVENTS2CSV_CONFIG
// 3. Inline config content from EVENTS2CSV_CONFIG_CONTENT
// 4. Default config files (./config.toml, ./.events2csv.toml)
// 5. Built-in defaults

use crate::env_overrides::{self, EnvSource, ENV_PREFIX};
use crate::error::{ConfigError, Result};
use crate::RuntimeConfig;
use std::env;
use std::path::Path;

const DEFAULT_CONFIG_PATHS: [&str; 2] = ["./config.toml", "./.events2csv.toml"];

/// Load configuration using native environment/file access.
pub fn load_config() -> Result<RuntimeConfig> {
    let mut config = RuntimeConfig::default();

    if let Some(file_config) = load_from_file()? {
        config.merge(file_config);
    }

    env_overrides::apply_env_overrides(&mut config, &StdEnvSource)?;
    config.validate()?;
    Ok(config)
}

fn load_from_file() -> Result<Option<RuntimeConfig>> {
    if let Ok(path) = env::var(format!("{}CONFIG", ENV_PREFIX)) {
        return read_toml_file(Path::new(&path)).map(Some);
    }

    if let Ok(content) = env::var(format!("{}CONFIG_CONTENT", ENV_PREFIX)) {
        return parse_toml(&content, "EVENTS2CSV_CONFIG_CONTENT").map(Some);
    }

    for path in DEFAULT_CONFIG_PATHS {
        let path = Path::new(path);
        if path.exists() {
            tracing::debug!("Using config file {}", path.display());
            return read_toml_file(path).map(Some);
        }
    }

    Ok(None)
}

/// Load configuration from a specific file path (for CLI --config flag).
/// Returns error if file doesn't exist or can't be parsed.
pub fn load_from_file_path(path: impl AsRef<Path>) -> Result<RuntimeConfig> {
    let mut config = RuntimeConfig::default();
    config.merge(read_toml_file(path.as_ref())?);

    env_overrides::apply_env_overrides(&mut config, &StdEnvSource)?;
    config.validate()?;
    Ok(config)
}

pub(crate) fn parse_toml(content: &str, origin: &str) -> Result<RuntimeConfig> {
    toml::from_str(content).map_err(|source| ConfigError::Parse {
        origin: origin.to_string(),
        source,
    })
}

fn read_toml_file(path: &Path) -> Result<RuntimeConfig> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    parse_toml(&content, &path.display().to_string())
}

struct StdEnvSource;

impl EnvSource for StdEnvSource {
    fn get(&self, key: &str) -> Option<String> {
        env::var(format!("{}{}", ENV_PREFIX, key)).ok()
    }

    fn get_raw(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[job]\nlookback_hours = 3\n\n[input]\nbucket = \"in\"\nprefix = \"raw/\"\n\n[output]\nbucket = \"out\""
        )
        .unwrap();

        let config = read_toml_file(file.path()).unwrap();
        assert_eq!(config.job.lookback_hours, 3);
        assert_eq!(config.input.bucket, "in");
        assert_eq!(config.input.prefix, "raw/");
        assert_eq!(config.output.bucket, "out");
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = read_toml_file(Path::new("/nonexistent/events2csv.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn negative_lookback_in_toml_is_a_parse_error() {
        let err = parse_toml("[job]\nlookback_hours = -5", "test").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
