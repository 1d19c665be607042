//! CV analysis pipeline
//!
//! read_cv → extract_data → gen_requirements → analyze_gap → generate_gap_report →
//! verify_skills → generate_final_cv
//!
//! Model-backed steps degrade to empty results; reading the CV, writing the gap
//! report and rendering the final CV abort the run.

use crate::config::Config;
use crate::error::{Result, SkillGapError};
use crate::input::{choose_index, DocumentReader, InputSource};
use crate::llm::{parse_model_json, LanguageModel, PromptTemplates};
use crate::output::cv_renderer::{output_file_name, resolve_template_name, CvTemplates};
use crate::output::{write_file, GapReport, PdfAuthor};
use crate::pipeline::{overwrite_fields, required, Pipeline, PipelineBuilder, PipelineState, Step};
use crate::processing::skills::compute_missing_skills;
use crate::processing::verification::interview;
use crate::processing::{CvData, VerificationOutcome, VerificationQuestion};
use crate::workflows::Collaborators;
use async_trait::async_trait;
use log::{info, warn};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CvState {
    pub cv_file_path: Option<PathBuf>,
    pub job_title: Option<String>,
    /// Blank or absent means "ask once the templates are known".
    pub template_selection: Option<String>,
    pub cv_text: Option<String>,
    pub structured_cv: Option<CvData>,
    pub user_name: Option<String>,
    pub job_requirements: Option<Vec<String>>,
    pub missing_skills: Option<Vec<String>>,
    pub report_path: Option<PathBuf>,
    pub new_skills_to_add: Option<Vec<String>>,
    pub skills_for_roadmap: Option<Vec<String>>,
    pub final_cv_path: Option<PathBuf>,
}

impl CvState {
    pub fn new(cv_file_path: impl Into<PathBuf>, job_title: impl Into<String>, template_selection: Option<String>) -> Self {
        Self {
            cv_file_path: Some(cv_file_path.into()),
            job_title: Some(job_title.into()),
            template_selection,
            ..Default::default()
        }
    }
}

impl PipelineState for CvState {
    const FIELDS: &'static [&'static str] = &[
        "cv_file_path",
        "job_title",
        "template_selection",
        "cv_text",
        "structured_cv",
        "user_name",
        "job_requirements",
        "missing_skills",
        "report_path",
        "new_skills_to_add",
        "skills_for_roadmap",
        "final_cv_path",
    ];

    fn apply(&mut self, update: Self) {
        overwrite_fields!(self, update;
            cv_file_path, job_title, template_selection, cv_text, structured_cv, user_name,
            job_requirements, missing_skills, report_path, new_skills_to_add,
            skills_for_roadmap, final_cv_path,
        );
    }
}

pub fn cv_pipeline(collaborators: &Collaborators, config: &Config) -> Result<Pipeline<CvState>> {
    PipelineBuilder::new("cv_analysis")
        .seed(&["cv_file_path", "job_title", "template_selection"])
        .step(ReadCv {
            documents: collaborators.documents.clone(),
        })
        .step(ExtractData {
            model: collaborators.model.clone(),
            prompts: collaborators.prompts.clone(),
            max_chars: config.analysis.max_cv_chars,
        })
        .step(GenRequirements {
            model: collaborators.model.clone(),
            prompts: collaborators.prompts.clone(),
            count: config.analysis.requirements_count,
        })
        .step(AnalyzeGap)
        .step(GenerateGapReport {
            pdf: collaborators.pdf.clone(),
            output_dir: config.output.output_dir.clone(),
        })
        .step(VerifySkills {
            model: collaborators.model.clone(),
            prompts: collaborators.prompts.clone(),
            input: collaborators.input.clone(),
            limit: config.analysis.verification_limit,
        })
        .step(GenerateFinalCv {
            templates: CvTemplates::new(&config.output.templates_dir),
            input: collaborators.input.clone(),
            output_dir: config.output.output_dir.clone(),
        })
        .build()
}

struct ReadCv {
    documents: Arc<dyn DocumentReader>,
}

#[async_trait]
impl Step<CvState> for ReadCv {
    fn name(&self) -> &'static str {
        "read_cv"
    }

    fn reads(&self) -> &'static [&'static str] {
        &["cv_file_path"]
    }

    fn writes(&self) -> &'static [&'static str] {
        &["cv_text"]
    }

    async fn run(&self, state: &CvState) -> Result<CvState> {
        let path = required(&state.cv_file_path, "cv_file_path")?;
        info!("Reading CV from {}", path.display());

        let text = self.documents.extract(path).await?;
        Ok(CvState {
            cv_text: Some(text),
            ..Default::default()
        })
    }
}

struct ExtractData {
    model: Arc<dyn LanguageModel>,
    prompts: PromptTemplates,
    max_chars: usize,
}

impl ExtractData {
    async fn parse(&self, cv_text: &str) -> Result<CvData> {
        let truncated: String = cv_text.chars().take(self.max_chars).collect();
        let raw = self.model.generate(&self.prompts.render_resume_parser(&truncated)).await?;
        parse_model_json(&raw)
    }
}

#[async_trait]
impl Step<CvState> for ExtractData {
    fn name(&self) -> &'static str {
        "extract_data"
    }

    fn reads(&self) -> &'static [&'static str] {
        &["cv_text"]
    }

    fn writes(&self) -> &'static [&'static str] {
        &["structured_cv", "user_name"]
    }

    async fn run(&self, state: &CvState) -> Result<CvState> {
        let cv_text = required(&state.cv_text, "cv_text")?;
        info!("Extracting structured CV data with {}", self.model.name());

        match self.parse(cv_text).await {
            Ok(mut data) => {
                data.ensure_name();
                info!("Parsed CV for {} ({} skills)", data.name, data.skills.len());
                Ok(CvState {
                    user_name: Some(data.name.clone()),
                    structured_cv: Some(data),
                    ..Default::default()
                })
            }
            Err(e) => {
                warn!("CV extraction failed, continuing with an empty record: {}", e);
                Ok(CvState {
                    structured_cv: Some(CvData::default()),
                    ..Default::default()
                })
            }
        }
    }
}

struct GenRequirements {
    model: Arc<dyn LanguageModel>,
    prompts: PromptTemplates,
    count: usize,
}

impl GenRequirements {
    async fn requirements(&self, job_title: &str) -> Result<Vec<String>> {
        let raw = self
            .model
            .generate(&self.prompts.render_job_requirements(job_title, self.count))
            .await?;
        parse_model_json(&raw)
    }
}

#[async_trait]
impl Step<CvState> for GenRequirements {
    fn name(&self) -> &'static str {
        "gen_requirements"
    }

    fn reads(&self) -> &'static [&'static str] {
        &["job_title"]
    }

    fn writes(&self) -> &'static [&'static str] {
        &["job_requirements"]
    }

    async fn run(&self, state: &CvState) -> Result<CvState> {
        let job_title = required(&state.job_title, "job_title")?;
        info!("Generating requirements for '{}'", job_title);

        let requirements = self.requirements(job_title).await.unwrap_or_else(|e| {
            warn!("Requirement generation failed, treating the role as having none: {}", e);
            Vec::new()
        });

        Ok(CvState {
            job_requirements: Some(requirements),
            ..Default::default()
        })
    }
}

struct AnalyzeGap;

#[async_trait]
impl Step<CvState> for AnalyzeGap {
    fn name(&self) -> &'static str {
        "analyze_gap"
    }

    fn reads(&self) -> &'static [&'static str] {
        &["structured_cv", "job_requirements"]
    }

    fn writes(&self) -> &'static [&'static str] {
        &["missing_skills"]
    }

    async fn run(&self, state: &CvState) -> Result<CvState> {
        let cv = required(&state.structured_cv, "structured_cv")?;
        let requirements = required(&state.job_requirements, "job_requirements")?;

        if cv.skills.is_empty() {
            warn!("No skills found in the CV; every requirement counts as missing");
        }

        let missing = compute_missing_skills(&cv.skills, requirements);
        info!("{} of {} requirements missing", missing.len(), requirements.len());

        Ok(CvState {
            missing_skills: Some(missing),
            ..Default::default()
        })
    }
}

struct GenerateGapReport {
    pdf: Arc<dyn PdfAuthor>,
    output_dir: PathBuf,
}

#[async_trait]
impl Step<CvState> for GenerateGapReport {
    fn name(&self) -> &'static str {
        "generate_gap_report"
    }

    fn reads(&self) -> &'static [&'static str] {
        &["job_title", "missing_skills"]
    }

    fn writes(&self) -> &'static [&'static str] {
        &["report_path"]
    }

    async fn run(&self, state: &CvState) -> Result<CvState> {
        let job_title = required(&state.job_title, "job_title")?;
        let missing = required(&state.missing_skills, "missing_skills")?;

        let report = GapReport::new(job_title, missing);
        let bytes = self.pdf.author(&report)?;

        std::fs::create_dir_all(&self.output_dir).map_err(|source| SkillGapError::Write {
            path: self.output_dir.clone(),
            source,
        })?;
        let path = self.output_dir.join(GapReport::file_name(job_title));
        write_file(&path, bytes)?;
        info!("Gap report written to {}", path.display());

        Ok(CvState {
            report_path: Some(path),
            ..Default::default()
        })
    }
}

struct VerifySkills {
    model: Arc<dyn LanguageModel>,
    prompts: PromptTemplates,
    input: Arc<dyn InputSource>,
    limit: usize,
}

impl VerifySkills {
    async fn questions(&self, skills: &[String]) -> Result<Vec<VerificationQuestion>> {
        let raw = self
            .model
            .generate(&self.prompts.render_verification_questions(skills))
            .await?;
        parse_model_json(&raw)
    }
}

#[async_trait]
impl Step<CvState> for VerifySkills {
    fn name(&self) -> &'static str {
        "verify_skills"
    }

    fn reads(&self) -> &'static [&'static str] {
        &["missing_skills"]
    }

    fn writes(&self) -> &'static [&'static str] {
        &["new_skills_to_add", "skills_for_roadmap"]
    }

    async fn run(&self, state: &CvState) -> Result<CvState> {
        let missing = required(&state.missing_skills, "missing_skills")?;
        let candidates: Vec<String> = missing.iter().take(self.limit).cloned().collect();

        let outcome = if candidates.is_empty() {
            VerificationOutcome::default()
        } else {
            match self.questions(&candidates).await {
                Ok(questions) if !questions.is_empty() => interview(&questions, self.input.as_ref())?,
                Ok(_) => {
                    warn!("No verification questions generated; skipping the skill check");
                    VerificationOutcome::default()
                }
                Err(e) => {
                    warn!("Verification questions unavailable, skipping the skill check: {}", e);
                    VerificationOutcome::default()
                }
            }
        };

        info!(
            "{} skills confirmed, {} deferred to the roadmap",
            outcome.confirmed.len(),
            outcome.deferred.len()
        );

        Ok(CvState {
            new_skills_to_add: Some(outcome.confirmed),
            skills_for_roadmap: Some(outcome.deferred),
            ..Default::default()
        })
    }
}

struct GenerateFinalCv {
    templates: CvTemplates,
    input: Arc<dyn InputSource>,
    output_dir: PathBuf,
}

impl GenerateFinalCv {
    fn select_template(&self, selection: Option<&str>) -> Result<String> {
        if let Some(selection) = selection.map(str::trim).filter(|s| !s.is_empty()) {
            let template = resolve_template_name(selection);
            if self.templates.exists(&template) {
                return Ok(template);
            }
            self.input.say(&format!(
                "⚠️ Template '{}' not found in {}.",
                template,
                self.templates.dir().display()
            ));
        }

        let mut available = self.templates.available()?;
        self.input.say("📄 Available templates:");
        for (i, name) in available.iter().enumerate() {
            self.input.say(&format!("   {}. {}", i + 1, name));
        }

        let index = choose_index(self.input.as_ref(), "👉 Select a template number: ", available.len())?;
        Ok(available.swap_remove(index))
    }
}

#[async_trait]
impl Step<CvState> for GenerateFinalCv {
    fn name(&self) -> &'static str {
        "generate_final_cv"
    }

    fn reads(&self) -> &'static [&'static str] {
        &["structured_cv", "new_skills_to_add", "template_selection"]
    }

    fn writes(&self) -> &'static [&'static str] {
        &["structured_cv", "final_cv_path"]
    }

    async fn run(&self, state: &CvState) -> Result<CvState> {
        let mut cv = state
            .structured_cv
            .clone()
            .filter(|cv| !cv.is_empty())
            .ok_or_else(|| {
                SkillGapError::MissingPrecondition(
                    "No structured CV data available; CV extraction did not succeed".to_string(),
                )
            })?;

        if let Some(new_skills) = &state.new_skills_to_add {
            cv.add_skills(new_skills);
        }
        cv.ensure_personal_info();

        let template = self.select_template(state.template_selection.as_deref())?;
        let rendered = self.templates.render(&template, &cv)?;

        let user_name = state.user_name.as_deref().unwrap_or(&cv.name);
        let path = self
            .templates
            .write(&self.output_dir, &output_file_name(user_name, &template), &rendered)?;
        info!("Final CV written to {}", path.display());

        Ok(CvState {
            structured_cv: Some(cv),
            final_cv_path: Some(path),
            ..Default::default()
        })
    }
}
