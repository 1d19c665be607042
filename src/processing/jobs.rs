//! Job listings from web search results and keyword filtering

use crate::search::SearchHit;
use reqwest::Url;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobListing {
    pub title: String,
    pub company: String,
    pub location: String,
    pub url: String,
    pub summary: String,
}

impl JobListing {
    /// `position` is 1-based and only used to title untitled results.
    pub fn from_hit(hit: &SearchHit, position: usize, location: &str) -> Self {
        let title = hit
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Search Result {}", position));

        Self {
            title,
            company: company_from_url(&hit.url),
            location: location.to_string(),
            url: hit.url.clone(),
            summary: hit.content.clone().unwrap_or_default(),
        }
    }
}

pub fn search_query(role: &str, location: &str) -> String {
    format!("{} job openings in {} - job search results link", role, location)
}

/// Guesses the company from the URL host, without a leading `www.`.
///
/// For job boards this yields the board's domain, not the employer.
pub fn company_from_url(url: &str) -> String {
    let host = match Url::parse(url) {
        Ok(parsed) => parsed.host_str().map(str::to_string),
        Err(_) => url.split('/').nth(2).map(str::to_string),
    };

    host.map(|h| h.trim_start_matches("www.").to_string())
        .unwrap_or_default()
}

/// Keeps listings whose title contains every lowercase keyword of `role`.
/// The summary is not consulted.
pub fn filter_by_role(listings: &[JobListing], role: &str) -> Vec<JobListing> {
    let keywords: Vec<String> = role.to_lowercase().split_whitespace().map(str::to_string).collect();

    listings
        .iter()
        .filter(|job| {
            let title = job.title.to_lowercase();
            keywords.iter().all(|keyword| title.contains(keyword.as_str()))
        })
        .cloned()
        .collect()
}
