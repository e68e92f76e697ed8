use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutlineError {
    #[error("config not found: {0}")]
    ConfigNotFound(String),

    #[error("invalid level policy '{0}': expected 'clamp' or 'preserve'")]
    InvalidPolicy(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, OutlineError>;
