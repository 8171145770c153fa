use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Literal end marker for ongoing employment (or an in-progress degree).
pub const PRESENT: &str = "Present";

/// A position held. `start` / `end` are free text, normally `"Month YYYY"`;
/// `end` may be [`PRESENT`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Experience {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(default = "default_include")]
    pub include: bool,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
    /// One accomplishment per line.
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Education {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(default = "default_include")]
    pub include: bool,
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub field: String,
    /// `"Month YYYY"`, `"YYYY"`, [`PRESENT`], blank, or anything else.
    #[serde(default)]
    pub graduation_year: String,
    #[serde(default)]
    pub details: String,
}

fn default_include() -> bool {
    true
}

#[cfg(test)]
impl Experience {
    pub fn new(title: &str, company: &str, start: &str, end: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            include: true,
            title: title.to_string(),
            company: company.to_string(),
            location: String::new(),
            start: start.to_string(),
            end: end.to_string(),
            description: String::new(),
        }
    }
}

#[cfg(test)]
impl Education {
    pub fn new(institution: &str, degree: &str, graduation_year: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            include: true,
            institution: institution.to_string(),
            degree: degree.to_string(),
            field: String::new(),
            graduation_year: graduation_year.to_string(),
            details: String::new(),
        }
    }
}
