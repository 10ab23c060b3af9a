use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{section}.{key} is required\n\nHow to fix:\n  • Environment: export {env_var}=<value>\n  • TOML: [{section}]\n          {key} = \"<value>\"")]
    MissingField {
        section: &'static str,
        key: &'static str,
        env_var: String,
    },

    #[error("{key} has invalid value '{value}': {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config from {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    pub fn invalid_value(
        key: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            key: key.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
