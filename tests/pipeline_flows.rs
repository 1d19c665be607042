//! End-to-end runs of the three pipelines against in-memory collaborators

use async_trait::async_trait;
use skillgap::error::{Result, SkillGapError};
use skillgap::input::{DocumentReader, ScriptedInput};
use skillgap::llm::{LanguageModel, PromptTemplates};
use skillgap::output::{save_roadmap, GapReport, PrintPdfAuthor};
use skillgap::pipeline::{PipelineBuilder, PipelineState, Step};
use skillgap::search::{DisabledSearch, SearchHit, SearchProvider};
use skillgap::workflows::{
    cv_pipeline, job_search_pipeline, roadmap_pipeline, Collaborators, CvState, JobSearchState, RoadmapState,
};
use skillgap::Config;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

const TEMPLATE: &str = r"\section*{\VAR{personal_info.name|latex}}
\BLOCK{for skill in skills}
\item \VAR{skill|latex}
\BLOCK{endfor}
";

/// Documents served from memory, keyed by path.
#[derive(Default)]
struct MemoryReader {
    documents: Mutex<HashMap<PathBuf, String>>,
}

impl MemoryReader {
    fn with(path: &str, text: &str) -> Self {
        let reader = Self::default();
        reader.insert(Path::new(path), text);
        reader
    }

    fn insert(&self, path: &Path, text: &str) {
        self.documents.lock().unwrap().insert(path.to_path_buf(), text.to_string());
    }
}

#[async_trait]
impl DocumentReader for MemoryReader {
    async fn extract(&self, path: &Path) -> Result<String> {
        self.documents
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| SkillGapError::FileNotFound(path.to_path_buf()))
    }
}

/// Answers each kind of prompt with a canned completion.
#[derive(Default)]
struct ScriptedModel {
    resume: Option<&'static str>,
    requirements: Option<&'static str>,
    questions: Option<&'static str>,
    roadmap: Option<&'static str>,
    calls: AtomicUsize,
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let reply = if prompt.contains("Resume Parser") {
            self.resume
        } else if prompt.contains("most critical technical skills") {
            self.requirements
        } else if prompt.contains("candidate is missing these skills") {
            self.questions
        } else if prompt.contains("learning roadmap") {
            self.roadmap
        } else {
            None
        };

        reply
            .map(str::to_string)
            .ok_or_else(|| SkillGapError::LlmApi {
                status: 500,
                message: "no scripted reply".to_string(),
            })
    }
}

struct FixedSearch(Vec<SearchHit>);

#[async_trait]
impl SearchProvider for FixedSearch {
    async fn search(&self, _query: &str, max_results: usize) -> Result<Vec<SearchHit>> {
        Ok(self.0.iter().take(max_results).cloned().collect())
    }
}

struct Workspace {
    dir: TempDir,
    config: Config,
}

impl Workspace {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let templates = dir.path().join("templates");
        std::fs::create_dir_all(&templates).unwrap();
        std::fs::write(templates.join("template_1.tex"), TEMPLATE).unwrap();

        let mut config = Config::default();
        config.output.output_dir = dir.path().join("output");
        config.output.templates_dir = templates;

        Self { dir, config }
    }
}

fn collaborators(
    documents: Arc<dyn DocumentReader>,
    model: Arc<dyn LanguageModel>,
    search: Arc<dyn SearchProvider>,
    input: Arc<ScriptedInput>,
) -> Collaborators {
    Collaborators {
        documents,
        model: model.clone(),
        roadmap_model: model,
        search,
        input,
        pdf: Arc::new(PrintPdfAuthor),
        prompts: PromptTemplates::default(),
    }
}

#[tokio::test]
async fn test_cv_analysis_end_to_end() {
    let workspace = Workspace::new();
    let model = Arc::new(ScriptedModel {
        resume: Some(r#"```json
{"name": "Jane Doe", "email": "jane@example.com", "skills": ["Python"]}
```"#),
        requirements: Some(r#"["Python", "SQL", "Statistics"]"#),
        questions: Some(
            r#"[{"skill": "SQL", "question": "Do you have experience with SQL?", "options": ["1. Yes", "2. No"]},
                {"skill": "Statistics", "question": "Do you have experience with Statistics?", "options": ["1. Yes", "2. No"]}]"#,
        ),
        ..Default::default()
    });
    let input = Arc::new(ScriptedInput::new(["1", "2"]));
    let collaborators = collaborators(
        Arc::new(MemoryReader::with("cv.pdf", "Jane Doe\nPython developer")),
        model,
        Arc::new(DisabledSearch::new("TAVILY_API_KEY")),
        input.clone(),
    );

    let pipeline = cv_pipeline(&collaborators, &workspace.config).unwrap();
    let state = pipeline
        .run(CvState::new("cv.pdf", "Data Scientist", Some("1".to_string())))
        .await
        .unwrap();

    assert_eq!(state.user_name.as_deref(), Some("Jane Doe"));
    assert_eq!(state.missing_skills, Some(vec!["SQL".to_string(), "Statistics".to_string()]));
    assert_eq!(state.new_skills_to_add, Some(vec!["SQL".to_string()]));
    assert_eq!(state.skills_for_roadmap, Some(vec!["Statistics".to_string()]));
    assert_eq!(state.structured_cv.as_ref().unwrap().skills, vec!["Python", "SQL"]);

    let report = std::fs::read(state.report_path.as_ref().unwrap()).unwrap();
    assert!(report.starts_with(b"%PDF"));
    assert!(state
        .report_path
        .as_ref()
        .unwrap()
        .ends_with("Skill_Report_DataScientist.pdf"));

    let final_cv = state.final_cv_path.unwrap();
    assert!(final_cv.ends_with("Jane_Doe_Optimized_template_1.tex"));
    let rendered = std::fs::read_to_string(final_cv).unwrap();
    assert!(rendered.contains(r"\section*{Jane Doe}"));
    assert!(rendered.contains(r"\item SQL"));
    assert!(!rendered.contains("Statistics"));

    assert_eq!(input.remaining(), 0);
}

#[tokio::test]
async fn test_unreadable_cv_stops_the_run() {
    let workspace = Workspace::new();
    let model = Arc::new(ScriptedModel::default());
    let collaborators = collaborators(
        Arc::new(MemoryReader::default()),
        model.clone(),
        Arc::new(DisabledSearch::new("TAVILY_API_KEY")),
        Arc::new(ScriptedInput::default()),
    );

    let result = cv_pipeline(&collaborators, &workspace.config)
        .unwrap()
        .run(CvState::new("missing.pdf", "Data Scientist", None))
        .await;

    assert!(matches!(result, Err(SkillGapError::FileNotFound(_))));
    assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    assert!(!workspace.config.output.output_dir.exists());
}

#[tokio::test]
async fn test_failed_extraction_still_reports_then_aborts() {
    let workspace = Workspace::new();
    let model = Arc::new(ScriptedModel {
        resume: Some("I could not read this resume."),
        requirements: Some(r#"["Go", "Kubernetes"]"#),
        ..Default::default()
    });
    let collaborators = collaborators(
        Arc::new(MemoryReader::with("cv.pdf", "scanned image")),
        model,
        Arc::new(DisabledSearch::new("TAVILY_API_KEY")),
        Arc::new(ScriptedInput::default()),
    );

    let result = cv_pipeline(&collaborators, &workspace.config)
        .unwrap()
        .run(CvState::new("cv.pdf", "Platform Engineer", Some("1".to_string())))
        .await;

    assert!(matches!(result, Err(SkillGapError::MissingPrecondition(_))));
    assert!(workspace
        .config
        .output
        .output_dir
        .join("Skill_Report_PlatformEngineer.pdf")
        .exists());
    assert_eq!(std::fs::read_dir(&workspace.config.output.output_dir).unwrap().count(), 1);
}

#[tokio::test]
async fn test_job_search_without_credentials_is_empty() {
    let workspace = Workspace::new();
    let collaborators = collaborators(
        Arc::new(MemoryReader::default()),
        Arc::new(ScriptedModel::default()),
        Arc::new(DisabledSearch::new("TAVILY_API_KEY")),
        Arc::new(ScriptedInput::default()),
    );

    let state = job_search_pipeline(&collaborators, &workspace.config)
        .unwrap()
        .run(JobSearchState::new("Frontend Developer", "remote"))
        .await
        .unwrap();

    assert_eq!(state.raw_results, Some(vec![]));
    assert_eq!(state.filtered_jobs, Some(vec![]));
}

#[tokio::test]
async fn test_job_search_filters_on_title() {
    let workspace = Workspace::new();
    let hits = vec![
        SearchHit {
            title: Some("Senior Frontend Developer".to_string()),
            url: "https://www.linkedin.com/jobs/view/1".to_string(),
            content: Some("React, TypeScript".to_string()),
        },
        SearchHit {
            title: Some("Backend Engineer".to_string()),
            url: "https://jobs.example.com/2".to_string(),
            content: Some("Looking for a frontend developer mindset".to_string()),
        },
    ];
    let collaborators = collaborators(
        Arc::new(MemoryReader::default()),
        Arc::new(ScriptedModel::default()),
        Arc::new(FixedSearch(hits)),
        Arc::new(ScriptedInput::default()),
    );

    let state = job_search_pipeline(&collaborators, &workspace.config)
        .unwrap()
        .run(JobSearchState::new("frontend developer", "Berlin"))
        .await
        .unwrap();

    let jobs = state.filtered_jobs.unwrap();
    assert_eq!(state.raw_results.unwrap().len(), 2);
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].company, "linkedin.com");
    assert_eq!(jobs[0].location, "Berlin");
}

#[tokio::test]
async fn test_roadmap_from_gap_report() {
    let workspace = Workspace::new();
    let report_path = workspace.dir.path().join("Skill_Report_DataScientist.pdf");
    let reader = MemoryReader::default();
    reader.insert(
        &report_path,
        &GapReport::new("Data Scientist", &["Statistics".to_string()]).to_text(),
    );
    let model = Arc::new(ScriptedModel {
        roadmap: Some(
            r#"{"roadmap_title": "Data Scientist Plan", "modules": [
                {"skill": "Statistics", "week": 1, "topic": "Distributions", "recommended_action": "Read a textbook chapter"}
            ]}"#,
        ),
        ..Default::default()
    });
    let collaborators = collaborators(
        Arc::new(reader),
        model,
        Arc::new(DisabledSearch::new("TAVILY_API_KEY")),
        Arc::new(ScriptedInput::default()),
    );

    let state = roadmap_pipeline(&collaborators)
        .unwrap()
        .run(RoadmapState::new(&report_path))
        .await
        .unwrap();

    assert!(state.report_content.unwrap().contains("- Statistics"));
    assert!(state.roadmap_error.is_none());
    let roadmap = state.roadmap.unwrap();
    assert_eq!(roadmap.modules.len(), 1);

    let artifacts = save_roadmap(&workspace.config.output.output_dir, &roadmap).unwrap();
    assert!(artifacts.markdown_path.exists());
    assert!(artifacts.json_path.ends_with("Roadmap_Data_Scientist_Plan.json"));
}

#[tokio::test]
async fn test_roadmap_with_missing_report_propagates() {
    let collaborators = collaborators(
        Arc::new(MemoryReader::default()),
        Arc::new(ScriptedModel::default()),
        Arc::new(DisabledSearch::new("TAVILY_API_KEY")),
        Arc::new(ScriptedInput::default()),
    );

    let result = roadmap_pipeline(&collaborators)
        .unwrap()
        .run(RoadmapState::new("nowhere.pdf"))
        .await;

    assert!(matches!(result, Err(SkillGapError::FileNotFound(_))));
}

#[derive(Debug, Default)]
struct Trace {
    visited: Option<Vec<&'static str>>,
}

impl PipelineState for Trace {
    const FIELDS: &'static [&'static str] = &["visited"];

    fn apply(&mut self, update: Self) {
        if update.visited.is_some() {
            self.visited = update.visited;
        }
    }
}

struct Visit {
    name: &'static str,
    fail: bool,
    runs: Arc<AtomicUsize>,
}

#[async_trait]
impl Step<Trace> for Visit {
    fn name(&self) -> &'static str {
        self.name
    }

    fn writes(&self) -> &'static [&'static str] {
        &["visited"]
    }

    async fn run(&self, state: &Trace) -> Result<Trace> {
        self.runs.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(SkillGapError::Search(format!("{} exploded", self.name)));
        }
        let mut visited = state.visited.clone().unwrap_or_default();
        visited.push(self.name);
        Ok(Trace { visited: Some(visited) })
    }
}

#[tokio::test]
async fn test_second_of_three_steps_failing_skips_the_third() {
    let third_runs = Arc::new(AtomicUsize::new(0));
    let visit = |name, fail, runs: &Arc<AtomicUsize>| Visit {
        name,
        fail,
        runs: runs.clone(),
    };
    let unused = Arc::new(AtomicUsize::new(0));

    let pipeline = PipelineBuilder::new("three_steps")
        .step(visit("first", false, &unused))
        .step(visit("second", true, &unused))
        .step(visit("third", false, &third_runs))
        .build()
        .unwrap();

    let result = pipeline.run(Trace::default()).await;

    assert!(matches!(result, Err(SkillGapError::Search(msg)) if msg == "second exploded"));
    assert_eq!(third_runs.load(Ordering::SeqCst), 0);
    assert_eq!(unused.load(Ordering::SeqCst), 2);
}
