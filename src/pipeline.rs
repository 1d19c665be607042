//! Shared-state pipeline runner
//!
//! A pipeline is an ordered list of named steps. Each step reads the accumulated
//! state and returns a partial update of the same record type; the runner applies
//! the update (wholesale field replacement, no deep merge) before the next step.
//! The first failing step stops the run and its error is returned unchanged.

use crate::error::{Result, SkillGapError};
use async_trait::async_trait;
use log::{debug, error, info};
use std::collections::HashSet;

/// A typed state record. Every field is optional so that the same type doubles as
/// a partial update.
pub trait PipelineState: Default + Send + Sync {
    /// Names of all declared fields, used to validate step wiring.
    const FIELDS: &'static [&'static str];

    /// Overwrite each field that `update` carries.
    fn apply(&mut self, update: Self);
}

/// Implements field-wise overwrite for `PipelineState::apply`.
macro_rules! overwrite_fields {
    ($target:expr, $update:expr; $($field:ident),+ $(,)?) => {
        $(
            if $update.$field.is_some() {
                $target.$field = $update.$field;
            }
        )+
    };
}
pub(crate) use overwrite_fields;

#[async_trait]
pub trait Step<S: PipelineState>: Send + Sync {
    fn name(&self) -> &'static str;

    /// Fields this step expects an earlier step (or the seed) to have written.
    fn reads(&self) -> &'static [&'static str] {
        &[]
    }

    /// Fields this step may write.
    fn writes(&self) -> &'static [&'static str] {
        &[]
    }

    async fn run(&self, state: &S) -> Result<S>;
}

/// Fetch a field that pipeline construction guaranteed was written.
pub fn required<'a, T>(field: &'a Option<T>, name: &'static str) -> Result<&'a T> {
    field.as_ref().ok_or(SkillGapError::MissingField(name))
}

pub struct PipelineBuilder<S: PipelineState> {
    name: &'static str,
    seeded: Vec<&'static str>,
    steps: Vec<Box<dyn Step<S>>>,
}

impl<S: PipelineState> PipelineBuilder<S> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            seeded: Vec::new(),
            steps: Vec::new(),
        }
    }

    /// Fields supplied by the caller in the initial state.
    pub fn seed(mut self, fields: &[&'static str]) -> Self {
        self.seeded.extend_from_slice(fields);
        self
    }

    pub fn step(mut self, step: impl Step<S> + 'static) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    /// Checks that every field a step reads is declared and was seeded or written
    /// by an earlier step.
    pub fn build(self) -> Result<Pipeline<S>> {
        let declared: HashSet<&str> = S::FIELDS.iter().copied().collect();

        for field in &self.seeded {
            if !declared.contains(field) {
                return Err(SkillGapError::PipelineDefinition(format!(
                    "pipeline '{}' seeds undeclared field '{}'",
                    self.name, field
                )));
            }
        }

        let mut available: HashSet<&str> = self.seeded.iter().copied().collect();
        let mut names = HashSet::new();

        for step in &self.steps {
            if !names.insert(step.name()) {
                return Err(SkillGapError::PipelineDefinition(format!(
                    "pipeline '{}' has two steps named '{}'",
                    self.name,
                    step.name()
                )));
            }

            for field in step.reads() {
                if !available.contains(field) {
                    return Err(SkillGapError::PipelineDefinition(format!(
                        "step '{}' reads '{}' but nothing before it writes that field",
                        step.name(),
                        field
                    )));
                }
            }

            for field in step.writes() {
                if !declared.contains(field) {
                    return Err(SkillGapError::PipelineDefinition(format!(
                        "step '{}' writes undeclared field '{}'",
                        step.name(),
                        field
                    )));
                }
                available.insert(field);
            }
        }

        Ok(Pipeline {
            name: self.name,
            steps: self.steps,
        })
    }
}

pub struct Pipeline<S: PipelineState> {
    name: &'static str,
    steps: Vec<Box<dyn Step<S>>>,
}

impl<S: PipelineState> Pipeline<S> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    pub async fn run(&self, initial: S) -> Result<S> {
        let mut state = initial;
        info!("Running pipeline '{}' ({} steps)", self.name, self.steps.len());

        for (index, step) in self.steps.iter().enumerate() {
            debug!("[{}/{}] {}", index + 1, self.steps.len(), step.name());

            match step.run(&state).await {
                Ok(update) => state.apply(update),
                Err(e) => {
                    error!("Step '{}' of pipeline '{}' failed: {}", step.name(), self.name, e);
                    return Err(e);
                }
            }
        }

        info!("Pipeline '{}' finished", self.name);
        Ok(state)
    }
}
