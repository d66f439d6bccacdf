use crate::models::{GlossaryTerm, TermCatalog};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary content directory
pub fn create_test_content_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Create a test file with content
pub fn create_test_file(content_dir: &TempDir, filename: &str, content: &str) -> PathBuf {
    let file_path = content_dir.path().join(filename);
    fs::write(&file_path, content).unwrap();
    file_path
}

/// A small glossary used across tests
pub fn sample_catalog() -> TermCatalog {
    TermCatalog::from_terms([
        GlossaryTerm::new(1, "Public cloud", "<p>Computing services offered over the internet</p>"),
        GlossaryTerm::new(2, "Availability zone", "<p>An isolated location within a region</p>"),
        GlossaryTerm::new(3, "Latency", "<p>Time taken for data to travel</p>"),
    ])
    .unwrap()
}
