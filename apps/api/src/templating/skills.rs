//! Skills organizer: case-insensitive alphabetizing plus the grouped and
//! flat renderings used by `{{Skills Summary}}` and `{{Skills List}}`.
//!
//! Comparison folds case; output keeps the author's casing.

use std::cmp::Ordering;

use crate::models::{SkillGroup, SkillSet};

/// Case-insensitive lexicographic comparison.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Stable sort of groups by name.
pub fn sort_groups(groups: &[SkillGroup]) -> Vec<SkillGroup> {
    let mut sorted = groups.to_vec();
    sorted.sort_by(|a, b| compare_names(&a.name, &b.name));
    sorted
}

/// Stable sort of skill names.
pub fn sort_skills(skills: &[String]) -> Vec<String> {
    let mut sorted = skills.to_vec();
    sorted.sort_by(|a, b| compare_names(a, b));
    sorted
}

/// Every skill from every group, alphabetized. Ignores `include`; the caller
/// decides what to filter.
pub fn flatten_and_sort(skill_set: &SkillSet) -> Vec<String> {
    let all: Vec<String> = skill_set
        .groups
        .iter()
        .flat_map(|g| g.skills.iter().cloned())
        .collect();
    sort_skills(&all)
}

/// Included, non-empty groups in sorted order, each with sorted skills.
pub fn grouped_summary(skill_set: &SkillSet) -> Vec<(String, Vec<String>)> {
    sort_groups(&skill_set.groups)
        .into_iter()
        .filter(|g| g.include && g.skills.iter().any(|s| !s.trim().is_empty()))
        .map(|g| {
            let skills = sort_skills(&g.skills)
                .into_iter()
                .filter(|s| !s.trim().is_empty())
                .collect();
            (g.name, skills)
        })
        .collect()
}

/// Skills from included groups only, alphabetized, comma-joined.
pub fn flat_list(skill_set: &SkillSet) -> String {
    let included = SkillSet {
        groups: skill_set
            .groups
            .iter()
            .filter(|g| g.include)
            .cloned()
            .collect(),
        skills_to_use: skill_set.skills_to_use,
    };
    flatten_and_sort(&included)
        .into_iter()
        .filter(|s| !s.trim().is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}
