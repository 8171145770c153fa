use serde::{Deserialize, Serialize};

use crate::models::history::{Education, Experience};
use crate::models::{join_present, present};

/// The applicant: contact details, signature preferences and career history.
///
/// Every text field defaults to `""` when absent from the request body, so
/// downstream formatting never has to distinguish "missing" from "blank".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateProfile {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: String,
    pub portfolio: String,
    /// Raster signature as a `data:` URL (or any URL the preview can load).
    pub signature_image: Option<String>,
    /// Render the signature as the image rather than the typed name.
    pub use_signature_image: bool,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
}

impl CandidateProfile {
    pub fn display_name(&self) -> &str {
        self.full_name.trim()
    }

    /// The signature image, but only when the candidate asked for it and one exists.
    pub fn signature_image_enabled(&self) -> Option<&str> {
        if !self.use_signature_image {
            return None;
        }
        self.signature_image.as_deref().and_then(present)
    }

    /// Professional links joined with ` | `.
    pub fn links_line(&self) -> String {
        join_present([self.linkedin.as_str(), self.portfolio.as_str()], " | ")
    }

    /// `email | phone | linkedin | portfolio`, skipping whatever is absent.
    pub fn contact_line(&self) -> String {
        join_present(
            [
                self.email.as_str(),
                self.phone.as_str(),
                self.linkedin.as_str(),
                self.portfolio.as_str(),
            ],
            " | ",
        )
    }
}
