use thiserror::Error;

/// Unified result type for the trellis crate.
pub type Result<T> = std::result::Result<T, TrellisError>;

/// Errors surfaced by containers, layouts and their configuration surface.
#[derive(Debug, Error)]
pub enum TrellisError {
    #[error("unknown attribute `{0}`")]
    UnknownAttribute(String),
    #[error("invalid value `{value}` for attribute `{name}`")]
    InvalidAttribute { name: String, value: String },
    #[error("bitmap `{0}` could not be loaded")]
    BitmapLoad(String),
    #[error("host refused to create a scrollbar")]
    ScrollbarUnavailable,
    #[error("unknown node kind `{0}`")]
    UnknownKind(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl TrellisError {
    pub(crate) fn invalid(name: &str, value: &str) -> Self {
        Self::InvalidAttribute {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}
