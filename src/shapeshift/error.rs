use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShapeshiftError {
    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] confique::Error),
}

pub type Result<T> = std::result::Result<T, ShapeshiftError>;
