use relative_path::{RelativePath, RelativePathBuf};
use std::fs;
use std::path::{Path, PathBuf};

use crate::element::ImageElement;

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid notes directory: {0}")]
    InvalidNotesDir(String),
}

/// Host side of a zoom cycle: finds, reads and persists the document
/// showing an image.
pub trait DocumentHost {
    /// The document whose pane contains `element`, if any.
    fn document_for(&self, element: &ImageElement) -> Option<RelativePathBuf>;

    fn read(&self, document: &RelativePath) -> Result<String, IoError>;

    fn write(&mut self, document: &RelativePath, text: &str) -> Result<(), IoError>;
}

/// Read a markdown file and return its content
pub fn read_file(relative_path: &RelativePath, notes_root: &Path) -> Result<String, IoError> {
    let absolute_path = relative_path.to_path(notes_root);
    if !absolute_path.exists() {
        return Err(IoError::NotFound(absolute_path));
    }
    fs::read_to_string(&absolute_path).map_err(IoError::Io)
}

/// Write content to a markdown file
pub fn write_file(
    relative_path: &RelativePath,
    notes_root: &Path,
    content: &str,
) -> Result<(), IoError> {
    let absolute_path = relative_path.to_path(notes_root);

    if let Some(parent) = absolute_path.parent() {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }

    fs::write(&absolute_path, content).map_err(IoError::Io)
}

pub fn validate_notes_dir(path: &Path) -> Result<(), IoError> {
    if !path.exists() || !path.is_dir() {
        return Err(IoError::InvalidNotesDir(
            "Directory does not exist".to_string(),
        ));
    }

    Ok(())
}

/// Notes directory with a single active document, as seen from one pane.
#[derive(Debug, Clone)]
pub struct Vault {
    notes_root: PathBuf,
    active: Option<RelativePathBuf>,
}

impl Vault {
    pub fn new(notes_root: impl Into<PathBuf>) -> Self {
        Self {
            notes_root: notes_root.into(),
            active: None,
        }
    }

    pub fn with_active_document(mut self, document: impl Into<RelativePathBuf>) -> Self {
        self.active = Some(document.into());
        self
    }
}

impl DocumentHost for Vault {
    fn document_for(&self, _element: &ImageElement) -> Option<RelativePathBuf> {
        self.active.clone()
    }

    fn read(&self, document: &RelativePath) -> Result<String, IoError> {
        read_file(document, &self.notes_root)
    }

    fn write(&mut self, document: &RelativePath, text: &str) -> Result<(), IoError> {
        write_file(document, &self.notes_root, text)
    }
}
