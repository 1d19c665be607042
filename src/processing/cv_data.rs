//! Structured CV data as extracted by the language model

use crate::error::Result;
use crate::processing::skills::merge_skills;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Placeholder used when the model returns no candidate name.
pub const DEFAULT_CANDIDATE_NAME: &str = "Candidate";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CvData {
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portfolio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(deserialize_with = "skill_list")]
    pub skills: Vec<String>,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub projects: Vec<Project>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personal_info: Option<PersonalInfo>,
    /// Keys the model returned beyond the known schema; passed through to templates.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Experience {
    #[serde(deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(deserialize_with = "lenient_string")]
    pub company: String,
    #[serde(deserialize_with = "lenient_string")]
    pub dates: String,
    #[serde(deserialize_with = "lenient_string")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    #[serde(deserialize_with = "lenient_string")]
    pub degree: String,
    #[serde(deserialize_with = "lenient_string")]
    pub institution: String,
    #[serde(deserialize_with = "lenient_string")]
    pub year: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    #[serde(deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(deserialize_with = "lenient_string")]
    pub technologies: String,
    #[serde(deserialize_with = "lenient_string")]
    pub description: String,
}

/// Contact block templates reference as `personal_info.*`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalInfo {
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(deserialize_with = "lenient_string")]
    pub phone: String,
    #[serde(deserialize_with = "lenient_string")]
    pub linkedin: String,
    #[serde(deserialize_with = "lenient_string")]
    pub github: String,
    #[serde(deserialize_with = "lenient_string")]
    pub location: String,
    #[serde(deserialize_with = "lenient_string")]
    pub portfolio: String,
}

impl CvData {
    /// An empty record is how a failed extraction shows up downstream.
    pub fn is_empty(&self) -> bool {
        *self == CvData::default()
    }

    pub fn ensure_name(&mut self) {
        if self.name.trim().is_empty() {
            self.name = DEFAULT_CANDIDATE_NAME.to_string();
        }
    }

    /// Builds `personal_info` from the flat contact fields when the record has none.
    pub fn ensure_personal_info(&mut self) {
        if self.personal_info.is_some() {
            return;
        }

        let name = if self.name.trim().is_empty() {
            "Unknown".to_string()
        } else {
            self.name.clone()
        };

        self.personal_info = Some(PersonalInfo {
            name,
            email: self.email.clone().unwrap_or_default(),
            phone: self.phone.clone().unwrap_or_default(),
            linkedin: self.linkedin.clone().unwrap_or_default(),
            github: self.github.clone().unwrap_or_default(),
            location: self.location.clone().unwrap_or_default(),
            portfolio: self.portfolio.clone().unwrap_or_default(),
        });
    }

    pub fn add_skills(&mut self, new_skills: &[String]) {
        if new_skills.is_empty() {
            return;
        }
        self.skills = merge_skills(&self.skills, new_skills);
    }

    /// Template context: every field at the top level, and the whole record again
    /// under `data`.
    pub fn template_context(&self) -> Result<Value> {
        let value = serde_json::to_value(self)?;
        let mut context = match value {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        context.insert("data".to_string(), serde_json::to_value(self)?);
        Ok(Value::Object(context))
    }
}

/// Any JSON scalar or list as trimmed text; `null` and a missing key become "".
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.map(value_to_text).unwrap_or_default())
}

/// Accepts a JSON list or a comma-separated string.
fn skill_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let skills = match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::String(s)) => s.split(',').map(|part| part.trim().to_string()).collect(),
        Some(Value::Array(items)) => items.into_iter().map(value_to_text).collect(),
        Some(other) => vec![value_to_text(other)],
    };

    Ok(skills.into_iter().filter(|s| !s.is_empty()).collect())
}

fn value_to_text(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.trim().to_string(),
        Value::Array(items) => items
            .into_iter()
            .map(value_to_text)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}
