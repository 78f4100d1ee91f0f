use crate::errors::OpsboardError;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to write state file ({path}): {message}")]
    WriteFailed { path: String, message: String },

    #[error("Failed to serialize state: {message}")]
    SerializeFailed { message: String },
}

impl OpsboardError for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            StorageError::WriteFailed { .. } => "STATE_WRITE_FAILED",
            StorageError::SerializeFailed { .. } => "STATE_SERIALIZE_FAILED",
        }
    }
}
