use thiserror::Error;

/// The main error type for Marx operations
#[derive(Debug, Error)]
pub enum MarxError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Workspace error: {0}")]
    Workspace(String),

    #[error("Facet error: {0}")]
    Facet(String),

    #[error("Module error: {0}")]
    Module(String),

    #[error("Detection error: {0}")]
    Detection(String),

    #[error("Path error: {0}")]
    Path(String),
}

/// Result type alias for Marx operations
pub type MarxResult<T> = Result<T, MarxError>;
