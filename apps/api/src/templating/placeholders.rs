//! Placeholder catalog: the fixed `{{Token}}` vocabulary template authors can use.
//!
//! Each token is a variant of [`Placeholder`], so the renderer's `match` is
//! checked for exhaustiveness at compile time. Names not in the catalog are
//! not errors: the renderer leaves them in the output verbatim.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::Serialize;

/// What kind of value a placeholder produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderCategory {
    Date,
    CandidateField,
    JobField,
    SkillsSummary,
    SkillsFlat,
    History,
    Signature,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    TodaysDate,
    CandidateName,
    CandidateEmail,
    CandidatePhone,
    CandidateLocation,
    CandidateLinkedIn,
    CandidatePortfolio,
    CandidateLinks,
    CandidateContactInfo,
    CompanyName,
    JobTitle,
    HiringManager,
    CompanyAddress,
    OfficeLocation,
    JobDescription,
    SkillsSummary,
    SkillsList,
    WorkExperience,
    Education,
    MySignature,
}

static BY_KEY: LazyLock<HashMap<&'static str, Placeholder>> =
    LazyLock::new(|| Placeholder::ALL.iter().map(|p| (p.key(), *p)).collect());

impl Placeholder {
    pub const ALL: [Placeholder; 20] = [
        Placeholder::TodaysDate,
        Placeholder::CandidateName,
        Placeholder::CandidateEmail,
        Placeholder::CandidatePhone,
        Placeholder::CandidateLocation,
        Placeholder::CandidateLinkedIn,
        Placeholder::CandidatePortfolio,
        Placeholder::CandidateLinks,
        Placeholder::CandidateContactInfo,
        Placeholder::CompanyName,
        Placeholder::JobTitle,
        Placeholder::HiringManager,
        Placeholder::CompanyAddress,
        Placeholder::OfficeLocation,
        Placeholder::JobDescription,
        Placeholder::SkillsSummary,
        Placeholder::SkillsList,
        Placeholder::WorkExperience,
        Placeholder::Education,
        Placeholder::MySignature,
    ];

    /// The name written between the braces, e.g. `Job Title`.
    pub fn key(self) -> &'static str {
        match self {
            Placeholder::TodaysDate => "Today's Date",
            Placeholder::CandidateName => "Candidate Name",
            Placeholder::CandidateEmail => "Candidate Email",
            Placeholder::CandidatePhone => "Candidate Phone",
            Placeholder::CandidateLocation => "Candidate Location",
            Placeholder::CandidateLinkedIn => "Candidate LinkedIn",
            Placeholder::CandidatePortfolio => "Candidate Portfolio",
            Placeholder::CandidateLinks => "Candidate Links",
            Placeholder::CandidateContactInfo => "Candidate Contact Info",
            Placeholder::CompanyName => "Company Name",
            Placeholder::JobTitle => "Job Title",
            Placeholder::HiringManager => "Hiring Manager",
            Placeholder::CompanyAddress => "Company Address",
            Placeholder::OfficeLocation => "Office Location",
            Placeholder::JobDescription => "Job Description",
            Placeholder::SkillsSummary => "Skills Summary",
            Placeholder::SkillsList => "Skills List",
            Placeholder::WorkExperience => "Work Experience",
            Placeholder::Education => "Education",
            Placeholder::MySignature => "My Signature",
        }
    }

    pub fn category(self) -> PlaceholderCategory {
        match self {
            Placeholder::TodaysDate => PlaceholderCategory::Date,
            Placeholder::CandidateName
            | Placeholder::CandidateEmail
            | Placeholder::CandidatePhone
            | Placeholder::CandidateLocation
            | Placeholder::CandidateLinkedIn
            | Placeholder::CandidatePortfolio
            | Placeholder::CandidateLinks
            | Placeholder::CandidateContactInfo => PlaceholderCategory::CandidateField,
            Placeholder::CompanyName
            | Placeholder::JobTitle
            | Placeholder::HiringManager
            | Placeholder::CompanyAddress
            | Placeholder::OfficeLocation
            | Placeholder::JobDescription => PlaceholderCategory::JobField,
            Placeholder::SkillsSummary => PlaceholderCategory::SkillsSummary,
            Placeholder::SkillsList => PlaceholderCategory::SkillsFlat,
            Placeholder::WorkExperience | Placeholder::Education => PlaceholderCategory::History,
            Placeholder::MySignature => PlaceholderCategory::Signature,
        }
    }

    /// Looks up a token by the name between the braces. Surrounding
    /// whitespace is ignored; the name itself is case-sensitive.
    pub fn from_key(name: &str) -> Option<Placeholder> {
        BY_KEY.get(name.trim()).copied()
    }

    /// The token as an author would type it.
    pub fn syntax(self) -> String {
        format!("{{{{{}}}}}", self.key())
    }
}

/// One catalog row, as served to template authors.
#[derive(Debug, Clone, Serialize)]
pub struct PlaceholderInfo {
    pub token: &'static str,
    pub syntax: String,
    pub category: PlaceholderCategory,
}

pub fn catalog() -> Vec<PlaceholderInfo> {
    Placeholder::ALL
        .iter()
        .map(|p| PlaceholderInfo {
            token: p.key(),
            syntax: p.syntax(),
            category: p.category(),
        })
        .collect()
}
