use thiserror::Error;

/// Whole-document failures. Per-field anomalies never surface here; they are
/// recovered in place by the normalizers.
#[derive(Debug, Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("entity not found: {id}")]
    NotFound { id: String },

    #[error("invalid document: {0}")]
    InvalidDocument(String),

    #[error("invalid entity id: {0:?}")]
    InvalidEntityId(String),
}

impl Error {
    /// Returns `true` when the requested entity is absent from the document.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
