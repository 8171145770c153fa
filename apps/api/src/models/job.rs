use serde::{Deserialize, Serialize};

use crate::models::{join_present, present};

/// The role being applied for. All fields are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JobPosting {
    pub company: String,
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub title: String,
    pub hiring_manager: String,
    pub description: String,
}

impl JobPosting {
    /// `City, ST 12345` with separators only between present parts.
    pub fn office_line(&self) -> String {
        let region = join_present([self.state.as_str(), self.postal_code.as_str()], " ");
        join_present([self.city.as_str(), region.as_str()], ", ")
    }

    /// Present address lines, street first.
    pub fn address_lines(&self) -> Vec<String> {
        let office = self.office_line();
        [self.street_address.as_str(), office.as_str()]
            .into_iter()
            .filter_map(present)
            .map(str::to_string)
            .collect()
    }
}
