use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Override string does not look like `path.to.key=value`.
    #[error("invalid override `{0}`")]
    InvalidOverride(String),

    /// Override path runs through something that is not a table.
    #[error("cannot traverse non-table at `{0}`")]
    TraverseNonTableAt(String),

    /// Override path names a key the config does not have.
    #[error("missing key `{0}`")]
    MissingKey(String),
}

#[derive(Debug, Error)]
pub enum InitError {
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed config: {0}")]
    MalformedConfig(#[from] toml::de::Error),

    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for InitError {
    fn from(value: anyhow::Error) -> Self {
        Self::Other(value.to_string())
    }
}
