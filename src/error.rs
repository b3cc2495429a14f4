use std::path::PathBuf;
use thiserror::Error;

/// The main error type for annocat operations.
///
/// Every variant is recoverable: a failed load or query leaves the catalog
/// and the statistics as they were.
#[derive(Debug, Error)]
pub enum AnnocatError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse VOC XML from {path}: {message}")]
    VocXmlParse { path: PathBuf, message: String },

    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("Record not found: {key}")]
    RecordNotFound { key: String },

    #[error("Invalid {field}: {message}")]
    InvalidInput { field: String, message: String },

    #[error("Failed to serialize JSON output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported value: {0}")]
    Unsupported(String),
}

impl AnnocatError {
    /// Builds a validation failure for a caller-supplied query parameter.
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// True for failures caused by malformed or incomplete input documents.
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, Self::VocXmlParse { .. })
    }

    /// True for failures caused by a missing path or key.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::NotADirectory { .. } | Self::RecordNotFound { .. }
        )
    }

    /// True for caller-supplied values outside the expected domain.
    pub fn is_validation_failure(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }
}
