//! Text extraction from PDF documents

use crate::error::{Result, SkillGapError};
use async_trait::async_trait;
use log::info;
use std::path::Path;
use tokio::fs;

/// Turns a document on disk into plain text.
#[async_trait]
pub trait DocumentReader: Send + Sync {
    async fn extract(&self, path: &Path) -> Result<String>;
}

/// Text-only PDF extraction (no OCR). Pages are separated by newlines.
pub struct PdfExtractor;

#[async_trait]
impl DocumentReader for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        if !path.exists() {
            return Err(SkillGapError::FileNotFound(path.to_path_buf()));
        }

        info!("Extracting text from PDF: {}", path.display());
        let bytes = fs::read(path).await?;

        let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
            SkillGapError::PdfExtraction(format!(
                "Failed to read '{}', ensure it is a valid PDF: {}",
                path.display(),
                e
            ))
        })?;

        Ok(normalize_page_breaks(&text))
    }
}

/// Form feeds mark page boundaries in extracted text; the pipelines expect newlines.
fn normalize_page_breaks(text: &str) -> String {
    text.replace('\u{c}', "\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_is_reported_as_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.pdf");

        let result = PdfExtractor.extract(&path).await;
        assert!(matches!(result, Err(SkillGapError::FileNotFound(p)) if p == path));
    }

    #[tokio::test]
    async fn test_garbage_file_is_unreadable() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.pdf");
        std::fs::write(&path, b"definitely not a pdf").unwrap();

        let result = PdfExtractor.extract(&path).await;
        assert!(matches!(result, Err(SkillGapError::PdfExtraction(_))));
    }

    #[test]
    fn test_page_breaks_become_newlines() {
        assert_eq!(normalize_page_breaks("page one\u{c}page two"), "page one\npage two");
    }
}
