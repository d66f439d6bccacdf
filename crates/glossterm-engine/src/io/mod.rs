use crate::models::{GlossaryTerm, TermCatalog, TermError, TermOption, TermSourceError};
use relative_path::RelativePath;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid content directory: {0}")]
    InvalidContentDir(String),
    #[error("Invalid glossary file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid glossary term: {0}")]
    Term(#[from] TermError),
}

/// Read a stored content file and return its text
pub fn read_file(relative_path: &RelativePath, content_root: &Path) -> Result<String, IoError> {
    let absolute_path = relative_path.to_path(content_root);
    if !absolute_path.exists() {
        return Err(IoError::NotFound(absolute_path));
    }
    fs::read_to_string(&absolute_path).map_err(IoError::Io)
}

/// Write stored content to a file
pub fn write_file(
    relative_path: &RelativePath,
    content_root: &Path,
    content: &str,
) -> Result<(), IoError> {
    let absolute_path = relative_path.to_path(content_root);

    // Create parent directories if they don't exist
    if let Some(parent) = absolute_path.parent() {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }

    fs::write(&absolute_path, content).map_err(IoError::Io)
}

pub fn validate_content_dir(path: &Path) -> Result<(), IoError> {
    if !path.exists() || !path.is_dir() {
        return Err(IoError::InvalidContentDir(
            "Directory does not exist".to_string(),
        ));
    }

    Ok(())
}

/// Load a glossary from a JSON array of `{id, title, definition}` records
pub fn load_catalog(path: &Path) -> Result<TermCatalog, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    let json = fs::read_to_string(path)?;
    let terms: Vec<GlossaryTerm> = serde_json::from_str(&json)?;
    Ok(TermCatalog::from_terms(terms)?)
}

/// Write a glossary as a pretty-printed JSON array, sorted by title
pub fn save_catalog(catalog: &TermCatalog, path: &Path) -> Result<(), IoError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(&catalog.terms())?;
    fs::write(path, json)?;
    Ok(())
}

/// Decode a response from the term listing endpoint.
///
/// Anything but a 200 is a failure, whatever the body says.
pub fn parse_term_listing(status: u16, body: &str) -> Result<Vec<TermOption>, TermSourceError> {
    if status != 200 {
        return Err(TermSourceError::Status(status));
    }
    Ok(serde_json::from_str(body)?)
}
