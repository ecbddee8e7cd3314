use crate::error::ModelError;

/// Result type alias for content model operations
pub type ModelResult<T> = Result<T, ModelError>;
