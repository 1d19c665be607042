//! Console formatting for pipeline results

use crate::error::{Result, SkillGapError};
use crate::processing::{JobListing, Roadmap};
use crate::workflows::CvState;
use colored::{Color, Colorize};

/// Coloured console output; plain text when colours are off.
pub struct ConsoleFormatter {
    use_colors: bool,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_skill_list(&self, skills: &[String], color: Color) -> String {
        if skills.is_empty() {
            return self.colorize("none", Color::BrightBlack);
        }
        skills
            .iter()
            .map(|s| self.colorize(s, color))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn format_job_listings(&self, role: &str, jobs: &[JobListing]) -> String {
        let mut output = self.format_header(&format!("🔎 JOB SEARCH: {}", role), 1);

        if jobs.is_empty() {
            output.push_str(&self.colorize("No matching job listings found.\n", Color::Yellow));
            return output;
        }

        for (i, job) in jobs.iter().enumerate() {
            output.push_str(&format!("{}. {}\n", i + 1, self.colorize(&job.title, Color::Cyan)));
            output.push_str(&format!("   🏢 {} | 📍 {}\n", job.company, job.location));
            output.push_str(&format!("   🔗 {}\n", job.url));
            if !job.summary.is_empty() {
                output.push_str(&format!("   {}\n", truncate(&job.summary, 200)));
            }
            output.push('\n');
        }

        output
    }

    pub fn format_cv_summary(&self, state: &CvState) -> String {
        let mut output = self.format_header("📊 CV ANALYSIS COMPLETE", 1);

        let candidate = state.user_name.as_deref().unwrap_or("Unknown");
        output.push_str(&format!("Candidate: {}\n", self.colorize(candidate, Color::Cyan)));
        if let Some(job_title) = &state.job_title {
            output.push_str(&format!("Target role: {}\n", job_title));
        }

        output.push_str(&self.format_header("Skill Gap", 2));
        let missing = state.missing_skills.as_deref().unwrap_or_default();
        output.push_str(&format!("Missing: {}\n", self.format_skill_list(missing, Color::Red)));
        let added = state.new_skills_to_add.as_deref().unwrap_or_default();
        output.push_str(&format!("Added to CV: {}\n", self.format_skill_list(added, Color::Green)));
        let roadmap = state.skills_for_roadmap.as_deref().unwrap_or_default();
        output.push_str(&format!("For the roadmap: {}\n", self.format_skill_list(roadmap, Color::Yellow)));

        output.push_str(&self.format_header("Files", 2));
        if let Some(path) = &state.report_path {
            output.push_str(&format!("📄 Gap report: {}\n", path.display()));
        }
        if let Some(path) = &state.final_cv_path {
            output.push_str(&format!("📝 Final CV: {}\n", path.display()));
        }

        output
    }

    /// The roadmap as pretty JSON under a header.
    pub fn format_roadmap(&self, roadmap: &Roadmap) -> Result<String> {
        let mut output = self.format_header(&format!("🗺️ {}", roadmap.title_or_default()), 1);
        output.push_str(&serde_json::to_string_pretty(roadmap)?);
        output.push('\n');
        Ok(output)
    }

    pub fn format_failure(&self, label: &str, error: &SkillGapError) -> String {
        let mut output = format!("\n{} {}\n", self.colorize("❌", Color::Red), self.colorize(label, Color::Red));
        output.push_str(&format!("   {}\n", error));
        if let Some(hint) = error.diagnosis() {
            output.push_str(&format!("💡 {}\n", self.colorize(&hint, Color::Yellow)));
        }
        output
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{}...", cut.trim_end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn plain() -> ConsoleFormatter {
        ConsoleFormatter::new(false)
    }

    #[test]
    fn test_job_listings_are_numbered() {
        let jobs = vec![JobListing {
            title: "Rust Engineer".to_string(),
            company: "acme.io".to_string(),
            location: "remote".to_string(),
            url: "https://acme.io/jobs/1".to_string(),
            summary: "Build things".to_string(),
        }];

        let output = plain().format_job_listings("rust", &jobs);
        assert!(output.contains("1. Rust Engineer"));
        assert!(output.contains("acme.io | 📍 remote"));
    }

    #[test]
    fn test_empty_job_listing() {
        let output = plain().format_job_listings("rust", &[]);
        assert!(output.contains("No matching job listings found."));
    }

    #[test]
    fn test_cv_summary_lists_outcome() {
        let state = CvState {
            user_name: Some("Ada".to_string()),
            missing_skills: Some(vec!["SQL".to_string(), "Statistics".to_string()]),
            new_skills_to_add: Some(vec!["SQL".to_string()]),
            skills_for_roadmap: Some(vec!["Statistics".to_string()]),
            final_cv_path: Some(PathBuf::from("output/Ada_Optimized_template_1.tex")),
            ..Default::default()
        };

        let output = plain().format_cv_summary(&state);
        assert!(output.contains("Candidate: Ada"));
        assert!(output.contains("Missing: SQL, Statistics"));
        assert!(output.contains("Added to CV: SQL"));
        assert!(output.contains("For the roadmap: Statistics"));
        assert!(output.contains("Ada_Optimized_template_1.tex"));
    }

    #[test]
    fn test_failure_includes_diagnosis() {
        let error = SkillGapError::QuotaExceeded("429".to_string());
        let output = plain().format_failure("CV analysis failed", &error);
        assert!(output.contains("CV analysis failed"));
        assert!(output.contains("💡"));
    }

    #[test]
    fn test_truncate_long_summary() {
        assert_eq!(truncate("abcdef", 3), "abc...");
        assert_eq!(truncate("abc", 3), "abc");
    }
}
