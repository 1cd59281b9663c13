use std::path::{Path, PathBuf};

use crate::error::ReferenceError;

/// The SOP text every question and assistant answer must be grounded in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceDocument {
    path: PathBuf,
    text: String,
}

impl ReferenceDocument {
    /// Read the document from disk.
    ///
    /// A missing or blank file is an error: ungrounded questions are worse than none.
    ///
    /// # Errors
    ///
    /// Returns `ReferenceError::Io` if the file cannot be read and
    /// `ReferenceError::Empty` if it contains only whitespace.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ReferenceError> {
        let path = path.as_ref().to_path_buf();
        let text = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| ReferenceError::Io {
                path: path.clone(),
                source,
            })?;
        Self::from_text(path, text)
    }

    /// Wrap already-loaded text.
    ///
    /// # Errors
    ///
    /// Returns `ReferenceError::Empty` if `text` is blank.
    pub fn from_text(path: impl Into<PathBuf>, text: impl Into<String>) -> Result<Self, ReferenceError> {
        let path = path.into();
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ReferenceError::Empty { path });
        }
        Ok(Self { path, text })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}
