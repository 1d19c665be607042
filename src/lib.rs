//! skillgap library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod llm;
pub mod output;
pub mod pipeline;
pub mod processing;
pub mod search;
pub mod workflows;

pub use config::{Config, Credentials};
pub use error::{Result, SkillGapError};
