//! Template renderer: merges candidate, job and skills data into a template.
//!
//! Both token kinds are matched in one scan over the raw template, so every
//! token is substituted exactly once and substituted values are never
//! rescanned:
//! - `{{Name}}` tokens from the [`Placeholder`] catalog are replaced with
//!   formatted values. Unknown names are left exactly as written.
//! - `<%= instruction %>` tokens are replaced with an instruction-site
//!   placeholder; any `{{Name}}` inside the instruction is resolved with
//!   the same values as top-level tokens.
//!
//! `{{My Signature}}` becomes a sentinel (see [`signature`]) so each output
//! surface can decide between image and typed name later.
//!
//! [`signature`]: crate::templating::signature

use std::sync::LazyLock;

use chrono::{Local, NaiveDate};
use regex::{Captures, Regex};

use crate::convert::html::escape_text;
use crate::models::{
    join_present, CandidateProfile, Education, Experience, JobPosting, RenderedDocument, SkillSet,
};
use crate::templating::chronology::{included_education, included_experience};
use crate::templating::placeholders::Placeholder;
use crate::templating::signature::sentinel;
use crate::templating::skills::{flat_list, grouped_summary};

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([^{}]*)\}\}").expect("token pattern is valid"));

/// An instruction (group 1) or a top-level token (group 2), whichever
/// starts first.
static SEGMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<%=(.*?)%>|\{\{([^{}]*)\}\}").expect("segment pattern is valid")
});

/// Prefix of the text substituted for every instructional token.
pub const INSTRUCTION_PLACEHOLDER_PREFIX: &str = "[AI-generated content: ";

/// Borrows the inputs for one render; cheap to build per request.
#[derive(Debug, Clone)]
pub struct TemplateRenderer<'a> {
    candidate: &'a CandidateProfile,
    job: &'a JobPosting,
    skills: &'a SkillSet,
    today: NaiveDate,
}

impl<'a> TemplateRenderer<'a> {
    pub fn new(candidate: &'a CandidateProfile, job: &'a JobPosting, skills: &'a SkillSet) -> Self {
        Self {
            candidate,
            job,
            skills,
            today: Local::now().date_naive(),
        }
    }

    /// Pins `{{Today's Date}}` to `today`.
    pub fn with_date(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn render(&self, template: &str) -> RenderedDocument {
        if template.is_empty() {
            return RenderedDocument::default();
        }
        let merged = SEGMENT_RE.replace_all(template, |caps: &Captures| {
            match (caps.get(1), caps.get(2)) {
                (Some(instruction), _) => self.instruction(instruction.as_str(), &caps[0]),
                (None, Some(name)) => self.token(name.as_str(), &caps[0]),
                (None, None) => caps[0].to_string(),
            }
        });
        RenderedDocument::new(merged.into_owned())
    }

    fn token(&self, name: &str, raw: &str) -> String {
        match Placeholder::from_key(name) {
            Some(placeholder) => self.value(placeholder),
            None => raw.to_string(),
        }
    }

    /// Tokens inside the body come from the template itself, never from a
    /// substituted value.
    fn instruction(&self, body: &str, raw: &str) -> String {
        let body = body.trim();
        if body.is_empty() {
            return raw.to_string();
        }
        let resolved = TOKEN_RE.replace_all(body, |caps: &Captures| self.token(&caps[1], &caps[0]));
        format!("{INSTRUCTION_PLACEHOLDER_PREFIX}{resolved}]")
    }

    /// The formatted, HTML-safe value for one placeholder.
    pub fn value(&self, placeholder: Placeholder) -> String {
        let candidate = self.candidate;
        let job = self.job;
        match placeholder {
            Placeholder::TodaysDate => self.today.format("%B %-d, %Y").to_string(),
            Placeholder::CandidateName => escape_text(candidate.display_name()),
            Placeholder::CandidateEmail => escape_text(candidate.email.trim()),
            Placeholder::CandidatePhone => escape_text(candidate.phone.trim()),
            Placeholder::CandidateLocation => escape_text(candidate.location.trim()),
            Placeholder::CandidateLinkedIn => escape_text(candidate.linkedin.trim()),
            Placeholder::CandidatePortfolio => escape_text(candidate.portfolio.trim()),
            Placeholder::CandidateLinks => escape_text(&candidate.links_line()),
            Placeholder::CandidateContactInfo => escape_text(&candidate.contact_line()),
            Placeholder::CompanyName => escape_text(job.company.trim()),
            Placeholder::JobTitle => escape_text(job.title.trim()),
            Placeholder::HiringManager => escape_text(job.hiring_manager.trim()),
            Placeholder::CompanyAddress => job
                .address_lines()
                .iter()
                .map(|line| escape_text(line))
                .collect::<Vec<_>>()
                .join("<br>"),
            Placeholder::OfficeLocation => escape_text(&job.office_line()),
            Placeholder::JobDescription => multiline(&job.description),
            Placeholder::SkillsSummary => grouped_summary(self.skills)
                .into_iter()
                .map(|(group, skills)| {
                    format!("**{}:** {}", escape_text(&group), escape_text(&skills.join(", ")))
                })
                .collect::<Vec<_>>()
                .join("<br>"),
            Placeholder::SkillsList => escape_text(&flat_list(self.skills)),
            Placeholder::WorkExperience => included_experience(&candidate.experience)
                .iter()
                .map(experience_block)
                .collect(),
            Placeholder::Education => included_education(&candidate.education)
                .iter()
                .map(education_block)
                .collect(),
            Placeholder::MySignature => sentinel(candidate.display_name()),
        }
    }
}

/// Escapes free text and turns its line breaks into `<br>`.
fn multiline(text: &str) -> String {
    text.trim()
        .lines()
        .map(|line| escape_text(line.trim_end()))
        .collect::<Vec<_>>()
        .join("<br>")
}

/// One `<li>` per non-blank line, with any leading bullet glyph removed.
fn bullet_list(text: &str) -> String {
    let items: Vec<String> = text
        .lines()
        .map(|line| line.trim().trim_start_matches(['-', '*', '•']).trim())
        .filter(|line| !line.is_empty())
        .map(|line| format!("<li>{}</li>", escape_text(line)))
        .collect();
    if items.is_empty() {
        String::new()
    } else {
        format!("<ul>{}</ul>", items.concat())
    }
}

fn experience_block(entry: &Experience) -> String {
    let headline = join_present(
        [entry.title.as_str(), entry.company.as_str(), entry.location.as_str()],
        ", ",
    );
    let dates = join_present([entry.start.as_str(), entry.end.as_str()], " – ");

    let mut html = String::new();
    if !headline.is_empty() {
        html.push_str(&format!("<h3>{}</h3>", escape_text(&headline)));
    }
    if !dates.is_empty() {
        html.push_str(&format!("<p><em>{}</em></p>", escape_text(&dates)));
    }
    html.push_str(&bullet_list(&entry.description));
    html
}

fn education_block(entry: &Education) -> String {
    let degree = join_present([entry.degree.as_str(), entry.field.as_str()], " in ");
    let headline = join_present([degree.as_str(), entry.institution.as_str()], ", ");

    let mut html = String::new();
    if !headline.is_empty() {
        html.push_str(&format!("<h3>{}</h3>", escape_text(&headline)));
    }
    if let Some(year) = crate::models::present(&entry.graduation_year) {
        html.push_str(&format!("<p><em>{}</em></p>", escape_text(year)));
    }
    html.push_str(&bullet_list(&entry.details));
    html
}
