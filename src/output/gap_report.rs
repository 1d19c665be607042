//! Skill-gap report as a simple PDF

use crate::error::{Result, SkillGapError};
use crate::output::file_name_safe;
use printpdf::{BuiltinFont, Mm, PdfDocument};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;
const LINE_HEIGHT_MM: f32 = 10.0;
const TITLE_SIZE: f32 = 16.0;
const BODY_SIZE: f32 = 12.0;

/// Layout of the report: a title line and one body line per entry.
#[derive(Debug, Clone, PartialEq)]
pub struct GapReport {
    pub title: String,
    pub lines: Vec<String>,
}

impl GapReport {
    pub fn new(job_title: &str, missing_skills: &[String]) -> Self {
        let lines = if missing_skills.is_empty() {
            vec!["No significant skill gaps found!".to_string()]
        } else {
            std::iter::once("Missing Skills:".to_string())
                .chain(missing_skills.iter().map(|skill| format!("- {}", skill)))
                .collect()
        };

        Self {
            title: format!("Skill Gap Report: {}", job_title),
            lines,
        }
    }

    pub fn file_name(job_title: &str) -> String {
        format!("Skill_Report_{}.pdf", file_name_safe(&job_title.replace(' ', "")))
    }

    pub fn to_text(&self) -> String {
        let mut text = self.title.clone();
        text.push_str("\n\n");
        text.push_str(&self.lines.join("\n"));
        text
    }
}

/// Turns a report layout into PDF bytes.
pub trait PdfAuthor: Send + Sync {
    fn author(&self, report: &GapReport) -> Result<Vec<u8>>;
}

/// A4 pages, built-in Helvetica.
pub struct PrintPdfAuthor;

impl PdfAuthor for PrintPdfAuthor {
    fn author(&self, report: &GapReport) -> Result<Vec<u8>> {
        let (doc, page, layer) = PdfDocument::new(
            report.title.as_str(),
            Mm(PAGE_WIDTH_MM),
            Mm(PAGE_HEIGHT_MM),
            "Layer 1",
        );

        let title_font = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| SkillGapError::PdfAuthoring(e.to_string()))?;
        let body_font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| SkillGapError::PdfAuthoring(e.to_string()))?;

        let mut current = doc.get_page(page).get_layer(layer);
        let mut y = PAGE_HEIGHT_MM - MARGIN_MM;

        current.use_text(report.title.as_str(), TITLE_SIZE, Mm(MARGIN_MM), Mm(y), &title_font);
        y -= LINE_HEIGHT_MM * 2.0;

        for (index, line) in report.lines.iter().enumerate() {
            if y < MARGIN_MM {
                let (next_page, next_layer) = doc.add_page(
                    Mm(PAGE_WIDTH_MM),
                    Mm(PAGE_HEIGHT_MM),
                    format!("Layer {}", index + 2),
                );
                current = doc.get_page(next_page).get_layer(next_layer);
                y = PAGE_HEIGHT_MM - MARGIN_MM;
            }

            current.use_text(line.as_str(), BODY_SIZE, Mm(MARGIN_MM), Mm(y), &body_font);
            y -= LINE_HEIGHT_MM;
        }

        doc.save_to_bytes()
            .map_err(|e| SkillGapError::PdfAuthoring(e.to_string()))
    }
}
