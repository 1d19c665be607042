//! Yes/no confirmation of missing skills with the user

use crate::error::Result;
use crate::input::{choose_option, InputSource};
use serde::{Deserialize, Serialize};

const YES: &str = "1";
const NO: &str = "2";

/// One generated confirmation question. The answer set is fixed to yes/no.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationQuestion {
    pub skill: String,
    pub question: String,
    #[serde(default = "default_options")]
    pub options: Vec<String>,
}

fn default_options() -> Vec<String> {
    vec!["1. Yes".to_string(), "2. No".to_string()]
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VerificationOutcome {
    /// Confirmed: add to the CV.
    pub confirmed: Vec<String>,
    /// Declined: recommend as a roadmap topic.
    pub deferred: Vec<String>,
}

/// Asks each question in order, blocking until the answer is `1` or `2`.
pub fn interview(questions: &[VerificationQuestion], input: &dyn InputSource) -> Result<VerificationOutcome> {
    let mut outcome = VerificationOutcome::default();

    input.say("\n🔍 SKILL CHECK");
    for question in questions {
        input.say(&format!("🔹 {}", question.question));
        match choose_option(input, "   👉 (1) Yes / (2) No: ", &[YES, NO])?.as_str() {
            YES => outcome.confirmed.push(question.skill.clone()),
            _ => outcome.deferred.push(question.skill.clone()),
        }
    }

    Ok(outcome)
}
