//! Learning roadmap produced from a skill-gap report

use crate::processing::cv_data::lenient_string;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roadmap {
    #[serde(default)]
    pub roadmap_title: String,
    #[serde(default)]
    pub modules: Vec<RoadmapModule>,
}

/// One learning module. Models write `week` as `1`, `"1"` or `"1-2"`, so it is
/// kept as text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoadmapModule {
    #[serde(deserialize_with = "lenient_string")]
    pub skill: String,
    #[serde(deserialize_with = "lenient_string")]
    pub week: String,
    #[serde(deserialize_with = "lenient_string")]
    pub topic: String,
    #[serde(deserialize_with = "lenient_string")]
    pub recommended_action: String,
}

impl RoadmapModule {
    /// Leading number of `week` ("1-2" → 1); modules without one sort last.
    pub fn start_week(&self) -> u32 {
        let digits: String = self.week.chars().take_while(|c| c.is_ascii_digit()).collect();
        digits.parse().unwrap_or(u32::MAX)
    }
}

impl Roadmap {
    pub fn title_or_default(&self) -> &str {
        if self.roadmap_title.trim().is_empty() {
            "Learning Roadmap"
        } else {
            &self.roadmap_title
        }
    }

    /// Modules ordered by week; ties keep their original order.
    pub fn modules_by_week(&self) -> Vec<&RoadmapModule> {
        let mut modules: Vec<&RoadmapModule> = self.modules.iter().collect();
        modules.sort_by_key(|m| m.start_week());
        modules
    }
}
