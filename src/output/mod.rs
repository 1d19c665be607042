//! Output module: gap report PDF, final CV, roadmap artifacts and console text

use crate::error::{Result, SkillGapError};
use std::path::Path;

pub mod cv_renderer;
pub mod formatter;
pub mod gap_report;
pub mod roadmap;

pub use cv_renderer::CvTemplates;
pub use formatter::ConsoleFormatter;
pub use gap_report::{GapReport, PdfAuthor, PrintPdfAuthor};
pub use roadmap::{save_roadmap, RoadmapArtifacts};

/// Replaces path separators and other characters that are not allowed in a file
/// name, so free text always maps to a single file in the target directory.
pub fn file_name_safe(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            c if c.is_control() => '-',
            c => c,
        })
        .collect()
}

/// Writes `contents` to `path`, carrying the path in the error.
pub(crate) fn write_file(path: &Path, contents: impl AsRef<[u8]>) -> Result<()> {
    std::fs::write(path, contents).map_err(|source| SkillGapError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_safe_replaces_separators() {
        assert_eq!(file_name_safe("AI/ML Engineer"), "AI-ML Engineer");
        assert_eq!(file_name_safe(r"CI\CD: Lead?"), "CI-CD- Lead-");
        assert_eq!(file_name_safe("Data Scientist"), "Data Scientist");
    }
}
