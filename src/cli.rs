//! CLI interface for skillgap

use crate::error::{Result, SkillGapError};
use crate::input::InputSource;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "skillgap")]
#[command(about = "LLM-driven CV gap analysis, job search and learning roadmaps")]
#[command(long_about = "Compare a CV against a target role, confirm missing skills interactively, \
render an updated CV from LaTeX templates, search for matching jobs and plan what to learn next")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyse a CV against a job title and render an updated CV
    Analyze {
        /// Path to the CV (PDF). Prompted for when absent.
        #[arg(long)]
        cv: Option<PathBuf>,

        /// Target job title. Prompted for when absent.
        #[arg(short, long)]
        job: Option<String>,

        /// Template number or file name; leave out to pick from a list later
        #[arg(short, long)]
        template: Option<String>,
    },

    /// Search the web for job openings matching a role
    Jobs {
        /// Job role, e.g. "Frontend Developer"
        #[arg(short, long)]
        role: Option<String>,

        /// Location (defaults to search.default_location)
        #[arg(short, long)]
        location: Option<String>,
    },

    /// Turn a skill-gap report into a learning roadmap
    Roadmap {
        /// Gap report PDF (defaults to the newest report in the output directory)
        #[arg(short, long)]
        report: Option<PathBuf>,
    },

    /// Show or reset the configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

impl Commands {
    /// Banner printed above a failure.
    pub fn failure_label(&self) -> &'static str {
        match self {
            Commands::Analyze { .. } => "CV analysis failed",
            Commands::Jobs { .. } => "Job search failed",
            Commands::Roadmap { .. } => "Roadmap generation failed",
            Commands::Config { .. } => "Configuration command failed",
        }
    }
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Strips surrounding whitespace and any quote characters pasted with a path.
pub fn clean_path_input(raw: &str) -> PathBuf {
    PathBuf::from(raw.trim().replace(['"', '\''], ""))
}

/// Uses `given` if it exists, otherwise asks until an existing path is entered.
pub fn prompt_existing_path(input: &dyn InputSource, given: Option<PathBuf>, prompt: &str) -> Result<PathBuf> {
    if let Some(path) = given {
        if path.exists() {
            return Ok(path);
        }
        input.say(&format!("❌ File not found: {}", path.display()));
    }

    loop {
        let path = clean_path_input(&input.read_line(prompt)?);
        if !path.as_os_str().is_empty() && path.exists() {
            return Ok(path);
        }
        input.say("❌ File not found. Please try again.");
    }
}

/// Uses `given` or asks once; a blank answer is an error.
pub fn prompt_required(input: &dyn InputSource, given: Option<String>, prompt: &str, what: &str) -> Result<String> {
    let value = match given {
        Some(value) => value,
        None => input.read_line(prompt)?,
    };

    let value = value.trim();
    if value.is_empty() {
        return Err(SkillGapError::InvalidInput(format!("{} is required", what)));
    }
    Ok(value.to_string())
}

/// Uses `given` or asks once; a blank answer means `None`.
pub fn prompt_optional(input: &dyn InputSource, given: Option<String>, prompt: &str) -> Result<Option<String>> {
    let value = match given {
        Some(value) => value,
        None => input.read_line(prompt)?,
    };

    let value = value.trim();
    Ok((!value.is_empty()).then(|| value.to_string()))
}

/// Newest `Skill_Report_*.pdf` in `output_dir`, if any.
pub fn latest_report(output_dir: &Path) -> Option<PathBuf> {
    std::fs::read_dir(output_dir)
        .ok()?
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            let name = entry.file_name().to_string_lossy().to_string();
            name.starts_with("Skill_Report_") && name.ends_with(".pdf")
        })
        .filter_map(|entry| {
            let modified = entry.metadata().and_then(|m| m.modified()).ok()?;
            Some((modified, entry.path()))
        })
        .max_by_key(|(modified, _)| *modified)
        .map(|(_, path)| path)
}
