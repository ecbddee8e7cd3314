use thiserror::Error;

/// Errors raised while reading page content
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Invalid content: {0}")]
    InvalidContent(#[from] serde_json::Error),

    #[error("Block is missing its type tag")]
    MissingType,
}
