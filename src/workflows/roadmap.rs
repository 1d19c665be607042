//! Roadmap pipeline: extract_text → generate_roadmap

use crate::error::Result;
use crate::input::DocumentReader;
use crate::llm::{parse_model_json, LanguageModel, PromptTemplates};
use crate::pipeline::{overwrite_fields, required, Pipeline, PipelineBuilder, PipelineState, Step};
use crate::processing::Roadmap;
use crate::workflows::Collaborators;
use async_trait::async_trait;
use log::{info, warn};
use std::path::PathBuf;
use std::sync::Arc;

pub const NO_REPORT_CONTENT: &str = "No valid report content to process";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoadmapState {
    pub report_path: Option<PathBuf>,
    pub report_content: Option<String>,
    pub roadmap: Option<Roadmap>,
    /// Set instead of `roadmap` when no roadmap could be produced.
    pub roadmap_error: Option<String>,
}

impl RoadmapState {
    pub fn new(report_path: impl Into<PathBuf>) -> Self {
        Self {
            report_path: Some(report_path.into()),
            ..Default::default()
        }
    }
}

impl PipelineState for RoadmapState {
    const FIELDS: &'static [&'static str] = &["report_path", "report_content", "roadmap", "roadmap_error"];

    fn apply(&mut self, update: Self) {
        overwrite_fields!(self, update; report_path, report_content, roadmap, roadmap_error);
    }
}

pub fn roadmap_pipeline(collaborators: &Collaborators) -> Result<Pipeline<RoadmapState>> {
    PipelineBuilder::new("roadmap")
        .seed(&["report_path"])
        .step(ExtractText {
            documents: collaborators.documents.clone(),
        })
        .step(GenerateRoadmap {
            model: collaborators.roadmap_model.clone(),
            prompts: collaborators.prompts.clone(),
        })
        .build()
}

struct ExtractText {
    documents: Arc<dyn DocumentReader>,
}

#[async_trait]
impl Step<RoadmapState> for ExtractText {
    fn name(&self) -> &'static str {
        "extract_text"
    }

    fn reads(&self) -> &'static [&'static str] {
        &["report_path"]
    }

    fn writes(&self) -> &'static [&'static str] {
        &["report_content"]
    }

    async fn run(&self, state: &RoadmapState) -> Result<RoadmapState> {
        let path = required(&state.report_path, "report_path")?;
        info!("Reading gap report {}", path.display());

        let content = self.documents.extract(path).await?;
        Ok(RoadmapState {
            report_content: Some(content),
            ..Default::default()
        })
    }
}

struct GenerateRoadmap {
    model: Arc<dyn LanguageModel>,
    prompts: PromptTemplates,
}

impl GenerateRoadmap {
    async fn roadmap(&self, report: &str) -> Result<Roadmap> {
        let raw = self.model.generate(&self.prompts.render_roadmap(report)).await?;
        parse_model_json(&raw)
    }
}

#[async_trait]
impl Step<RoadmapState> for GenerateRoadmap {
    fn name(&self) -> &'static str {
        "generate_roadmap"
    }

    fn reads(&self) -> &'static [&'static str] {
        &["report_content"]
    }

    fn writes(&self) -> &'static [&'static str] {
        &["roadmap", "roadmap_error"]
    }

    async fn run(&self, state: &RoadmapState) -> Result<RoadmapState> {
        let content = state.report_content.as_deref().unwrap_or_default();
        if content.trim().is_empty() {
            warn!("Gap report is empty; not calling the model");
            return Ok(RoadmapState {
                roadmap_error: Some(NO_REPORT_CONTENT.to_string()),
                ..Default::default()
            });
        }

        info!("Generating roadmap with {}", self.model.name());
        Ok(match self.roadmap(content).await {
            Ok(roadmap) => RoadmapState {
                roadmap: Some(roadmap),
                ..Default::default()
            },
            Err(e) => {
                warn!("Roadmap generation failed: {}", e);
                RoadmapState {
                    roadmap_error: Some(e.to_string()),
                    ..Default::default()
                }
            }
        })
    }
}
