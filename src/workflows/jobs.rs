//! Job-search pipeline: search_jobs → filter_jobs

use crate::config::Config;
use crate::error::Result;
use crate::pipeline::{overwrite_fields, required, Pipeline, PipelineBuilder, PipelineState, Step};
use crate::processing::jobs::{filter_by_role, search_query};
use crate::processing::JobListing;
use crate::search::SearchProvider;
use crate::workflows::Collaborators;
use async_trait::async_trait;
use log::{info, warn};
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobSearchState {
    pub role: Option<String>,
    pub location: Option<String>,
    pub raw_results: Option<Vec<JobListing>>,
    pub filtered_jobs: Option<Vec<JobListing>>,
}

impl JobSearchState {
    pub fn new(role: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            role: Some(role.into()),
            location: Some(location.into()),
            ..Default::default()
        }
    }
}

impl PipelineState for JobSearchState {
    const FIELDS: &'static [&'static str] = &["role", "location", "raw_results", "filtered_jobs"];

    fn apply(&mut self, update: Self) {
        overwrite_fields!(self, update; role, location, raw_results, filtered_jobs);
    }
}

pub fn job_search_pipeline(collaborators: &Collaborators, config: &Config) -> Result<Pipeline<JobSearchState>> {
    PipelineBuilder::new("job_search")
        .seed(&["role", "location"])
        .step(SearchJobs {
            search: collaborators.search.clone(),
            max_results: config.search.max_results,
        })
        .step(FilterJobs)
        .build()
}

struct SearchJobs {
    search: Arc<dyn SearchProvider>,
    max_results: usize,
}

#[async_trait]
impl Step<JobSearchState> for SearchJobs {
    fn name(&self) -> &'static str {
        "search_jobs"
    }

    fn reads(&self) -> &'static [&'static str] {
        &["role", "location"]
    }

    fn writes(&self) -> &'static [&'static str] {
        &["raw_results"]
    }

    async fn run(&self, state: &JobSearchState) -> Result<JobSearchState> {
        let role = required(&state.role, "role")?;
        let location = required(&state.location, "location")?;
        let query = search_query(role, location);
        info!("Searching: {}", query);

        let listings = match self.search.search(&query, self.max_results).await {
            Ok(hits) => hits
                .iter()
                .enumerate()
                .map(|(i, hit)| JobListing::from_hit(hit, i + 1, location))
                .collect(),
            Err(e) => {
                warn!("Job search failed, returning no results: {}", e);
                Vec::new()
            }
        };

        Ok(JobSearchState {
            raw_results: Some(listings),
            ..Default::default()
        })
    }
}

struct FilterJobs;

#[async_trait]
impl Step<JobSearchState> for FilterJobs {
    fn name(&self) -> &'static str {
        "filter_jobs"
    }

    fn reads(&self) -> &'static [&'static str] {
        &["role", "raw_results"]
    }

    fn writes(&self) -> &'static [&'static str] {
        &["filtered_jobs"]
    }

    async fn run(&self, state: &JobSearchState) -> Result<JobSearchState> {
        let role = required(&state.role, "role")?;
        let raw = required(&state.raw_results, "raw_results")?;

        let filtered = filter_by_role(raw, role);
        info!("{} of {} results match '{}'", filtered.len(), raw.len(), role);

        Ok(JobSearchState {
            filtered_jobs: Some(filtered),
            ..Default::default()
        })
    }
}
