pub mod candidate;
pub mod document;
pub mod history;
pub mod job;
pub mod skills;

pub use candidate::CandidateProfile;
pub use document::{DocumentKind, DocumentSelection, DocumentTemplates, RenderedDocument};
pub use history::{Education, Experience};
pub use job::JobPosting;
pub use skills::{SkillGroup, SkillSet};

/// Trims `value` and drops it if nothing is left.
pub(crate) fn present(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Joins the non-blank parts with `separator`, never leaving a dangling separator.
pub(crate) fn join_present<'a>(parts: impl IntoIterator<Item = &'a str>, separator: &str) -> String {
    parts
        .into_iter()
        .filter_map(present)
        .collect::<Vec<_>>()
        .join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_present_skips_blank_parts() {
        assert_eq!(join_present(["a", "", "  ", "b"], " | "), "a | b");
    }

    #[test]
    fn test_join_present_all_blank_is_empty() {
        assert_eq!(join_present(["", " "], ", "), "");
    }
}
