use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillGroup {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default = "default_include")]
    pub include: bool,
}

fn default_include() -> bool {
    true
}

#[cfg(test)]
impl SkillGroup {
    pub fn new(name: impl Into<String>, skills: &[&str]) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            include: true,
        }
    }
}

/// How many skills the candidate wants surfaced, inclusive on both ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillRange {
    pub min: u32,
    pub max: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillSet {
    pub groups: Vec<SkillGroup>,
    pub skills_to_use: SkillRange,
}

impl SkillSet {
    /// Rejects inverted ranges and case-insensitive duplicates, either among
    /// group names or among the skills of one group.
    pub fn validate(&self) -> Result<(), AppError> {
        let SkillRange { min, max } = self.skills_to_use;
        if min > max {
            return Err(AppError::Validation(format!(
                "skills_to_use.min ({min}) must not exceed skills_to_use.max ({max})"
            )));
        }

        let mut group_names = HashSet::new();
        for group in &self.groups {
            if !group_names.insert(group.name.trim().to_lowercase()) {
                return Err(AppError::Validation(format!(
                    "Duplicate skill group '{}'",
                    group.name
                )));
            }

            let mut skill_names = HashSet::new();
            for skill in &group.skills {
                if !skill_names.insert(skill.trim().to_lowercase()) {
                    return Err(AppError::Validation(format!(
                        "Duplicate skill '{}' in group '{}'",
                        skill, group.name
                    )));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_distinct_groups() {
        let set = SkillSet {
            groups: vec![
                SkillGroup::new("Frameworks", &["React"]),
                SkillGroup::new("Languages", &["Rust", "Go"]),
            ],
            skills_to_use: SkillRange { min: 2, max: 5 },
        };
        assert!(set.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_duplicate_group_names() {
        let set = SkillSet {
            groups: vec![
                SkillGroup::new("Frameworks", &[]),
                SkillGroup::new("frameworks ", &[]),
            ],
            ..Default::default()
        };
        assert!(matches!(set.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_validate_rejects_duplicate_skills_within_group() {
        let set = SkillSet {
            groups: vec![SkillGroup::new("Languages", &["TypeScript", "typescript"])],
            ..Default::default()
        };
        assert!(set.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_inverted_range() {
        let set = SkillSet {
            skills_to_use: SkillRange { min: 6, max: 3 },
            ..Default::default()
        };
        assert!(set.validate().is_err());
    }

    #[test]
    fn test_group_include_defaults_to_true() {
        let group: SkillGroup =
            serde_json::from_value(serde_json::json!({ "name": "Tools" })).unwrap();
        assert!(group.include);
        assert!(group.skills.is_empty());
    }
}
