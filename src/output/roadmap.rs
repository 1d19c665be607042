//! Roadmap artifacts: JSON for tooling, Markdown for reading

use crate::error::{Result, SkillGapError};
use crate::output::cv_renderer::sanitize_name;
use crate::output::write_file;
use crate::processing::roadmap::{Roadmap, RoadmapModule};
use askama::Template;
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};

#[derive(Template)]
#[template(
    source = r#"# {{ title }}

_Generated {{ generated_at }}_

{% if modules.is_empty() -%}
No learning modules were suggested.
{%- else -%}
| Week | Skill | Topic | Recommended action |
|------|-------|-------|--------------------|
{% for module in modules -%}
| {{ module.week }} | {{ module.skill }} | {{ module.topic }} | {{ module.recommended_action }} |
{% endfor -%}
{%- endif %}
"#,
    ext = "md"
)]
struct RoadmapMarkdown<'a> {
    title: &'a str,
    generated_at: String,
    modules: Vec<&'a RoadmapModule>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoadmapArtifacts {
    pub json_path: PathBuf,
    pub markdown_path: PathBuf,
}

pub fn render_markdown(roadmap: &Roadmap, generated_at: DateTime<Local>) -> Result<String> {
    RoadmapMarkdown {
        title: roadmap.title_or_default(),
        generated_at: generated_at.format("%Y-%m-%d %H:%M").to_string(),
        modules: roadmap.modules_by_week(),
    }
    .render()
    .map_err(|e| SkillGapError::Render(format!("Failed to render roadmap: {}", e)))
}

/// Writes `Roadmap_<title>.json` and `Roadmap_<title>.md` into `output_dir`.
pub fn save_roadmap(output_dir: &Path, roadmap: &Roadmap) -> Result<RoadmapArtifacts> {
    std::fs::create_dir_all(output_dir)?;

    let stem = format!("Roadmap_{}", sanitize_name(roadmap.title_or_default()));
    let json_path = output_dir.join(format!("{}.json", stem));
    let markdown_path = output_dir.join(format!("{}.md", stem));

    write_file(&json_path, serde_json::to_string_pretty(roadmap)?)?;
    write_file(&markdown_path, render_markdown(roadmap, Local::now())?)?;

    Ok(RoadmapArtifacts {
        json_path,
        markdown_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn roadmap() -> Roadmap {
        Roadmap {
            roadmap_title: "Data Science Catch-up".to_string(),
            modules: vec![
                RoadmapModule {
                    skill: "Statistics".to_string(),
                    week: "2".to_string(),
                    topic: "Hypothesis testing".to_string(),
                    recommended_action: "Work through an open course".to_string(),
                },
                RoadmapModule {
                    skill: "SQL".to_string(),
                    week: "1".to_string(),
                    topic: "Joins and window functions".to_string(),
                    recommended_action: "Solve 20 practice queries".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_markdown_orders_by_week() {
        let at = Local.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let markdown = render_markdown(&roadmap(), at).unwrap();

        assert!(markdown.starts_with("# Data Science Catch-up"));
        assert!(markdown.contains("_Generated 2024-03-01 09:30_"));
        let sql = markdown.find("| 1 | SQL |").unwrap();
        let stats = markdown.find("| 2 | Statistics |").unwrap();
        assert!(sql < stats);
    }

    #[test]
    fn test_markdown_for_empty_roadmap() {
        let markdown = render_markdown(&Roadmap::default(), Local::now()).unwrap();
        assert!(markdown.starts_with("# Learning Roadmap"));
        assert!(markdown.contains("No learning modules were suggested."));
    }

    #[test]
    fn test_save_writes_both_artifacts() {
        let temp_dir = TempDir::new().unwrap();
        let artifacts = save_roadmap(temp_dir.path(), &roadmap()).unwrap();

        assert!(artifacts.json_path.ends_with("Roadmap_Data_Science_Catch-up.json"));
        let saved: Roadmap = serde_json::from_str(&std::fs::read_to_string(&artifacts.json_path).unwrap()).unwrap();
        assert_eq!(saved, roadmap());
        assert!(std::fs::read_to_string(&artifacts.markdown_path).unwrap().contains("Hypothesis testing"));
    }

    #[test]
    fn test_save_with_slash_in_title() {
        let temp_dir = TempDir::new().unwrap();
        let mut plan = roadmap();
        plan.roadmap_title = "Frontend/Backend Learning Plan".to_string();

        let artifacts = save_roadmap(temp_dir.path(), &plan).unwrap();

        assert_eq!(artifacts.json_path.parent(), Some(temp_dir.path()));
        assert!(artifacts.json_path.ends_with("Roadmap_Frontend-Backend_Learning_Plan.json"));
        assert!(artifacts.markdown_path.is_file());
    }
}
