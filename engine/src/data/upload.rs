// Request-boundary checks applied before any bytes reach the loader.
use std::path::Path;

use crate::config::EngineSettings;
use crate::error::EngineError;

#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub filename: String,
    pub content: Vec<u8>,
}

impl UploadedFile {
    pub fn new(filename: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
        }
    }

    /// Reads a file from disk, keeping only its file name as the upload name.
    pub fn from_path(path: &Path) -> Result<Self, EngineError> {
        let content = std::fs::read(path)?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self { filename, content })
    }
}

pub fn validate_upload<'a>(
    file: Option<&'a UploadedFile>,
    settings: &EngineSettings,
) -> Result<&'a UploadedFile, EngineError> {
    let file = file.ok_or_else(|| EngineError::MissingInput("No file provided".to_string()))?;

    if file.filename.is_empty() {
        return Err(EngineError::MissingInput("No file selected".to_string()));
    }

    let extension = settings.accepted_extension.to_lowercase();
    if !file.filename.to_lowercase().ends_with(&extension) {
        return Err(EngineError::UnsupportedFormat(format!(
            "File must be a {}",
            extension.trim_start_matches('.').to_uppercase()
        )));
    }

    Ok(file)
}
