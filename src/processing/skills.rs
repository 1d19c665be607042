//! Skill comparison: gap computation and merging

use std::collections::{BTreeSet, HashSet};

/// Required skills the candidate does not have.
///
/// Comparison is equality after lowercasing; no substring matching, splitting or
/// stemming. Order follows `required`.
pub fn compute_missing_skills(possessed: &[String], required: &[String]) -> Vec<String> {
    let have: HashSet<String> = possessed.iter().map(|s| s.to_lowercase()).collect();

    required
        .iter()
        .filter(|skill| !have.contains(&skill.to_lowercase()))
        .cloned()
        .collect()
}

/// Set union with exact-string equality, so "SQL" and "sql" both survive.
/// The result is sorted.
pub fn merge_skills(current: &[String], new_skills: &[String]) -> Vec<String> {
    current
        .iter()
        .chain(new_skills)
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_missing_skills_case_insensitive_and_ordered() {
        let possessed = strings(&["Python", "SQL"]);
        let required = strings(&["python", "AWS", "sql"]);

        assert_eq!(compute_missing_skills(&possessed, &required), strings(&["AWS"]));
    }

    #[test]
    fn test_missing_skills_does_not_use_substrings() {
        let possessed = strings(&["JavaScript", "Machine Learning"]);
        let required = strings(&["Java", "Machine Learning Ops", "machine learning"]);

        assert_eq!(
            compute_missing_skills(&possessed, &required),
            strings(&["Java", "Machine Learning Ops"])
        );
    }

    #[test]
    fn test_no_requirements_means_no_gaps() {
        assert!(compute_missing_skills(&strings(&["Rust"]), &[]).is_empty());
    }

    #[test]
    fn test_no_possessed_skills_means_everything_missing() {
        let required = strings(&["Go", "Kafka"]);
        assert_eq!(compute_missing_skills(&[], &required), required);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let skills = strings(&["Go", "Rust"]);
        let once = merge_skills(&skills, &strings(&["Go"]));
        let twice = merge_skills(&once, &strings(&["Go"]));

        let as_set = |v: &[String]| v.iter().cloned().collect::<BTreeSet<_>>();
        assert_eq!(as_set(&once), as_set(&twice));
        assert_eq!(as_set(&once), as_set(&skills));
    }

    #[test]
    fn test_merge_keeps_case_variants_distinct() {
        let merged = merge_skills(&strings(&["SQL"]), &strings(&["sql"]));
        assert_eq!(merged.len(), 2);
    }
}
