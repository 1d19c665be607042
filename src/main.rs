//! skillgap: CV gap analysis, job search and learning roadmaps

use clap::Parser;
use log::{error, info};
use skillgap::cli::{self, Cli, Commands, ConfigAction};
use skillgap::output::{save_roadmap, ConsoleFormatter};
use skillgap::workflows::{
    cv_pipeline, job_search_pipeline, roadmap_pipeline, Collaborators, CvState, JobSearchState, RoadmapState,
};
use skillgap::{Config, Credentials, Result, SkillGapError};
use std::path::PathBuf;
use std::process;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    let formatter = ConsoleFormatter::new(config.output.color_output);
    let label = cli.command.failure_label();

    if let Err(e) = run_command(cli.command, cli.config, config, &formatter).await {
        error!("Command failed: {}", e);
        eprintln!("{}", formatter.format_failure(label, &e));
        process::exit(1);
    }
}

async fn run_command(
    command: Commands,
    config_path: Option<PathBuf>,
    config: Config,
    formatter: &ConsoleFormatter,
) -> Result<()> {
    match command {
        Commands::Analyze { cv, job, template } => {
            let collaborators = Collaborators::from_config(&config, &Credentials::from_env())?;
            analyze(cv, job, template, &config, &collaborators, formatter).await
        }
        Commands::Jobs { role, location } => {
            let collaborators = Collaborators::from_config(&config, &Credentials::from_env())?;
            search_jobs(role, location, &config, &collaborators, formatter).await
        }
        Commands::Roadmap { report } => {
            let collaborators = Collaborators::from_config(&config, &Credentials::from_env())?;
            roadmap(report, &config, &collaborators, formatter).await
        }
        Commands::Config { action } => run_config(action, config_path, &config),
    }
}

async fn analyze(
    cv: Option<PathBuf>,
    job: Option<String>,
    template: Option<String>,
    config: &Config,
    collaborators: &Collaborators,
    formatter: &ConsoleFormatter,
) -> Result<()> {
    let input = collaborators.input.as_ref();
    println!("🚀 CV gap analysis");

    let cv_path = cli::prompt_existing_path(input, cv, "\n📂 Enter path to your CV (PDF): ")?;
    let job_title = cli::prompt_required(input, job, "💼 Enter the target job title: ", "Job title")?;
    let template = cli::prompt_optional(
        input,
        template,
        "🎨 Enter template number [press Enter to choose later]: ",
    )?;

    config.ensure_output_dir()?;
    let pipeline = cv_pipeline(collaborators, config)?;
    info!("Steps: {}", pipeline.step_names().join(" → "));

    let state = pipeline.run(CvState::new(cv_path, job_title, template)).await?;
    println!("{}", formatter.format_cv_summary(&state));
    Ok(())
}

async fn search_jobs(
    role: Option<String>,
    location: Option<String>,
    config: &Config,
    collaborators: &Collaborators,
    formatter: &ConsoleFormatter,
) -> Result<()> {
    let input = collaborators.input.as_ref();
    println!("🔎 Job search");

    let role = cli::prompt_required(input, role, "Enter the job role (e.g., Frontend Developer): ", "Role")?;
    let location = cli::prompt_optional(
        input,
        location,
        &format!("Enter location (default: {}): ", config.search.default_location),
    )?
    .unwrap_or_else(|| config.search.default_location.clone());

    println!("⏳ Searching for {} in {}...", role, location);
    let state = job_search_pipeline(collaborators, config)?
        .run(JobSearchState::new(role.as_str(), location))
        .await?;

    let jobs = state.filtered_jobs.unwrap_or_default();
    println!("{}", formatter.format_job_listings(&role, &jobs));
    Ok(())
}

async fn roadmap(
    report: Option<PathBuf>,
    config: &Config,
    collaborators: &Collaborators,
    formatter: &ConsoleFormatter,
) -> Result<()> {
    println!("🗺️ Learning roadmap");

    let report = match report.or_else(|| cli::latest_report(&config.output.output_dir)) {
        Some(path) => path,
        None => cli::prompt_existing_path(
            collaborators.input.as_ref(),
            None,
            "📄 Enter path to the skill gap report (PDF): ",
        )?,
    };
    println!("📄 Using report {}", report.display());

    let state = roadmap_pipeline(collaborators)?.run(RoadmapState::new(report)).await?;

    let roadmap = state.roadmap.ok_or_else(|| {
        SkillGapError::MissingPrecondition(format!(
            "No roadmap produced: {}",
            state.roadmap_error.as_deref().unwrap_or("unknown reason")
        ))
    })?;

    println!("{}", formatter.format_roadmap(&roadmap)?);
    let artifacts = save_roadmap(&config.output.output_dir, &roadmap)?;
    println!("💾 Saved {}", artifacts.json_path.display());
    println!("💾 Saved {}", artifacts.markdown_path.display());
    Ok(())
}

fn run_config(action: Option<ConfigAction>, config_path: Option<PathBuf>, config: &Config) -> Result<()> {
    let path = config_path.unwrap_or_else(Config::config_path);

    match action {
        Some(ConfigAction::Show) | None => {
            println!("⚙️  Current Configuration ({})\n", path.display());
            let rendered = toml::to_string_pretty(config)
                .map_err(|e| SkillGapError::Configuration(format!("Failed to serialize config: {}", e)))?;
            println!("{}", rendered);

            let credentials = Credentials::from_env();
            println!("Credentials:");
            for (var, present) in [
                (Credentials::GEMINI_VAR, credentials.gemini_api_key.is_some()),
                (Credentials::GROQ_VAR, credentials.groq_api_key.is_some()),
                (Credentials::TAVILY_VAR, credentials.tavily_api_key.is_some()),
            ] {
                println!("  {}: {}", var, if present { "set" } else { "not set" });
            }
        }

        Some(ConfigAction::Reset) => {
            println!("🔄 Resetting configuration to defaults...");
            Config::default().save_to(&path)?;
            println!("✅ Configuration reset successfully!");
        }

        Some(ConfigAction::Path) => {
            println!("{}", path.display());
        }
    }

    Ok(())
}
