//! Final CV rendering from LaTeX templates
//!
//! Templates use LaTeX-safe delimiters so that TeX braces and `%` comments never
//! collide with template syntax:
//!
//! | construct   | delimiter         |
//! |-------------|-------------------|
//! | statement   | `\BLOCK{ ... }`   |
//! | expression  | `\VAR{ ... }`     |
//! | comment     | `\#{ ... }`       |
//! | line stmt   | `%% for x in xs`  |
//!
//! Block tags trim the following newline and leading whitespace. The `latex`
//! filter escapes TeX special characters in user-supplied text.

use crate::error::{Result, SkillGapError};
use crate::output::file_name_safe;
use crate::processing::CvData;
use log::debug;
use minijinja::syntax::SyntaxConfig;
use minijinja::Environment;
use std::path::{Path, PathBuf};

pub const TEMPLATE_EXTENSION: &str = ".tex";

/// Maps a user selection to a template file name.
///
/// `"2"` → `template_2.tex`, `"custom"` → `custom.tex`, `"custom.tex"` unchanged.
pub fn resolve_template_name(selection: &str) -> String {
    let selection = selection.trim();
    if !selection.is_empty() && selection.chars().all(|c| c.is_ascii_digit()) {
        format!("template_{}{}", selection, TEMPLATE_EXTENSION)
    } else if selection.ends_with(TEMPLATE_EXTENSION) {
        selection.to_string()
    } else {
        format!("{}{}", selection, TEMPLATE_EXTENSION)
    }
}

/// Spaces become underscores, dots are dropped and path separators replaced.
pub fn sanitize_name(name: &str) -> String {
    file_name_safe(&name.replace(' ', "_").replace('.', ""))
}

pub fn output_file_name(user_name: &str, template_file: &str) -> String {
    format!("{}_Optimized_{}", sanitize_name(user_name), template_file)
}

pub fn latex_escape(value: String) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str(r"\textbackslash{}"),
            '~' => escaped.push_str(r"\textasciitilde{}"),
            '^' => escaped.push_str(r"\textasciicircum{}"),
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                escaped.push('\\');
                escaped.push(c);
            }
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Directory of `.tex` templates.
#[derive(Debug, Clone)]
pub struct CvTemplates {
    templates_dir: PathBuf,
}

impl CvTemplates {
    pub fn new(templates_dir: impl Into<PathBuf>) -> Self {
        Self {
            templates_dir: templates_dir.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.templates_dir
    }

    pub fn exists(&self, template_file: &str) -> bool {
        self.templates_dir.join(template_file).is_file()
    }

    /// Template file names, sorted. An empty or missing directory is an error.
    pub fn available(&self) -> Result<Vec<String>> {
        let mut templates = Vec::new();

        if self.templates_dir.is_dir() {
            for entry in std::fs::read_dir(&self.templates_dir)? {
                let entry = entry?;
                let name = entry.file_name().to_string_lossy().to_string();
                if name.ends_with(TEMPLATE_EXTENSION) && entry.path().is_file() {
                    templates.push(name);
                }
            }
        }

        if templates.is_empty() {
            return Err(SkillGapError::MissingPrecondition(format!(
                "No {} templates found in {}",
                TEMPLATE_EXTENSION,
                self.templates_dir.display()
            )));
        }

        templates.sort();
        Ok(templates)
    }

    pub fn render(&self, template_file: &str, data: &CvData) -> Result<String> {
        self.try_render(template_file, data)
            .map_err(|e| SkillGapError::Render(format!("Failed to render '{}': {}", template_file, e)))
    }

    fn try_render(&self, template_file: &str, data: &CvData) -> std::result::Result<String, Box<dyn std::error::Error>> {
        let path = self.templates_dir.join(template_file);
        debug!("Rendering template {}", path.display());

        let source = std::fs::read_to_string(&path)?;
        let context = data.template_context()?;

        let mut env = Environment::new();
        env.set_syntax(
            SyntaxConfig::builder()
                .block_delimiters("\\BLOCK{", "}")
                .variable_delimiters("\\VAR{", "}")
                .comment_delimiters("\\#{", "}")
                .line_statement_prefix("%%")
                .build()?,
        );
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.add_filter("latex", latex_escape);
        env.add_template(template_file, &source)?;

        let rendered = env.get_template(template_file)?.render(&context)?;
        Ok(rendered)
    }

    /// Writes the rendered document; any failure is reported as a render error.
    pub fn write(&self, output_dir: &Path, file_name: &str, content: &str) -> Result<PathBuf> {
        let path = output_dir.join(file_name);
        std::fs::create_dir_all(output_dir)
            .and_then(|_| std::fs::write(&path, content))
            .map_err(|e| SkillGapError::Render(format!("Failed to write {}: {}", path.display(), e)))?;
        Ok(path)
    }
}
