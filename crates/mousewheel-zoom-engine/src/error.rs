use crate::io::IoError;

/// Reasons a zoom cycle is aborted. Every variant leaves the document untouched.
#[derive(Debug, thiserror::Error)]
pub enum ZoomError {
    #[error("No document pane contains the image")]
    PaneNotFound,
    #[error("Cannot isolate an image name from URI: {0}")]
    MalformedUri(String),
    #[error("Image reference not found in document: {0}")]
    NotFound(String),
    #[error("Image is not zoomable: {0}")]
    Unsupported(String),
    #[error(transparent)]
    Io(#[from] IoError),
}
