//! Document generation: produces the resume and/or cover letter for a request.
//!
//! Flow per requested document: pick template → `DocumentGenerator::generate`
//! → fail-soft on error. A missing template skips that document with a
//! warning; a backend failure replaces its content with an apology. Neither
//! blocks the other document.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::{
    CandidateProfile, DocumentKind, DocumentSelection, DocumentTemplates, JobPosting,
    RenderedDocument, SkillSet,
};
use crate::templating::TemplateRenderer;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub templates: DocumentTemplates,
    #[serde(default)]
    pub candidate: CandidateProfile,
    #[serde(default)]
    pub job: JobPosting,
    #[serde(default)]
    pub skills: SkillSet,
    #[serde(default)]
    pub documents: DocumentSelection,
}

/// Documents that were not requested (or were skipped) are `""`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GenerateResponse {
    pub resume: String,
    pub cover_letter: String,
    pub warnings: Vec<String>,
}

impl GenerateResponse {
    fn set(&mut self, kind: DocumentKind, content: String) {
        match kind {
            DocumentKind::Resume => self.resume = content,
            DocumentKind::CoverLetter => self.cover_letter = content,
        }
    }
}

/// Borrowed view of the data every backend needs.
#[derive(Debug, Clone, Copy)]
pub struct GenerationInputs<'a> {
    pub candidate: &'a CandidateProfile,
    pub job: &'a JobPosting,
    pub skills: &'a SkillSet,
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("generation backend failed: {0}")]
    Backend(String),
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Produces one document from a template. Implement this to swap in a
/// different prose backend without touching the handler.
///
/// Carried in `AppState` as `Arc<dyn DocumentGenerator>`.
#[async_trait]
pub trait DocumentGenerator: Send + Sync {
    async fn generate(
        &self,
        kind: DocumentKind,
        template: &str,
        inputs: GenerationInputs<'_>,
    ) -> Result<RenderedDocument, GenerationError>;
}

/// Default backend: straight template merge, no external calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateDocumentGenerator {
    /// Fixed date for `{{Today's Date}}`; `None` means the local date.
    pub today: Option<NaiveDate>,
}

#[async_trait]
impl DocumentGenerator for TemplateDocumentGenerator {
    async fn generate(
        &self,
        _kind: DocumentKind,
        template: &str,
        inputs: GenerationInputs<'_>,
    ) -> Result<RenderedDocument, GenerationError> {
        let mut renderer = TemplateRenderer::new(inputs.candidate, inputs.job, inputs.skills);
        if let Some(today) = self.today {
            renderer = renderer.with_date(today);
        }
        Ok(renderer.render(template))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Generation pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Text that replaces a document whose backend failed.
pub fn apology(kind: DocumentKind) -> String {
    format!("Sorry, we couldn't generate your {kind} right now. Please try again.")
}

/// Generates every requested document. Asking for nothing is a no-op.
pub async fn generate_documents(
    generator: &dyn DocumentGenerator,
    request: &GenerateRequest,
) -> Result<GenerateResponse, AppError> {
    request.skills.validate()?;

    let inputs = GenerationInputs {
        candidate: &request.candidate,
        job: &request.job,
        skills: &request.skills,
    };
    let mut response = GenerateResponse::default();

    for kind in DocumentKind::ALL {
        if !request.documents.wants(kind) {
            continue;
        }

        let Some(template) = request.templates.get(kind) else {
            let warning = format!("No {kind} template provided; skipping {kind} generation");
            warn!("{warning}");
            response.warnings.push(warning);
            continue;
        };

        let content = match generator.generate(kind, template, inputs).await {
            Ok(document) => document.into_string(),
            Err(e) => {
                warn!("Generation failed for {kind}, returning apology text: {e}");
                apology(kind)
            }
        };
        response.set(kind, content);
    }

    info!(
        "Generated documents: resume={} bytes, cover_letter={} bytes, warnings={}",
        response.resume.len(),
        response.cover_letter.len(),
        response.warnings.len()
    );

    Ok(response)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SkillGroup;

    /// Fails for one document kind, renders the other.
    struct FlakyGenerator {
        fails_for: DocumentKind,
    }

    #[async_trait]
    impl DocumentGenerator for FlakyGenerator {
        async fn generate(
            &self,
            kind: DocumentKind,
            template: &str,
            inputs: GenerationInputs<'_>,
        ) -> Result<RenderedDocument, GenerationError> {
            if kind == self.fails_for {
                return Err(GenerationError::Backend("upstream 503".to_string()));
            }
            TemplateDocumentGenerator::default()
                .generate(kind, template, inputs)
                .await
        }
    }

    fn request() -> GenerateRequest {
        GenerateRequest {
            templates: DocumentTemplates {
                resume: Some("<h1>{{Candidate Name}}</h1>".to_string()),
                cover_letter: Some("<p>Dear {{Hiring Manager}},</p>".to_string()),
            },
            candidate: CandidateProfile {
                full_name: "John Doe".to_string(),
                ..Default::default()
            },
            job: JobPosting {
                hiring_manager: "Ms. Smith".to_string(),
                ..Default::default()
            },
            documents: DocumentSelection {
                resume: true,
                cover_letter: true,
            },
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_generates_both_documents() {
        let response = generate_documents(&TemplateDocumentGenerator::default(), &request())
            .await
            .unwrap();
        assert_eq!(response.resume, "<h1>John Doe</h1>");
        assert_eq!(response.cover_letter, "<p>Dear Ms. Smith,</p>");
        assert!(response.warnings.is_empty());
    }

    #[tokio::test]
    async fn test_nothing_requested_is_a_noop() {
        let mut req = request();
        req.documents = DocumentSelection::default();
        let response = generate_documents(&TemplateDocumentGenerator::default(), &req)
            .await
            .unwrap();
        assert_eq!(response, GenerateResponse::default());
    }

    #[tokio::test]
    async fn test_unrequested_document_is_empty() {
        let mut req = request();
        req.documents.resume = false;
        let response = generate_documents(&TemplateDocumentGenerator::default(), &req)
            .await
            .unwrap();
        assert_eq!(response.resume, "");
        assert!(!response.cover_letter.is_empty());
    }

    #[tokio::test]
    async fn test_missing_template_skips_with_warning() {
        let mut req = request();
        req.templates.cover_letter = None;
        let response = generate_documents(&TemplateDocumentGenerator::default(), &req)
            .await
            .unwrap();
        assert_eq!(response.resume, "<h1>John Doe</h1>", "other document unaffected");
        assert_eq!(response.cover_letter, "");
        assert_eq!(
            response.warnings,
            vec!["No cover letter template provided; skipping cover letter generation"]
        );
    }

    #[tokio::test]
    async fn test_backend_failure_is_fail_soft() {
        let generator = FlakyGenerator {
            fails_for: DocumentKind::Resume,
        };
        let response = generate_documents(&generator, &request()).await.unwrap();
        assert_eq!(response.resume, apology(DocumentKind::Resume));
        assert_eq!(response.cover_letter, "<p>Dear Ms. Smith,</p>");
    }

    #[tokio::test]
    async fn test_invalid_skill_set_is_rejected() {
        let mut req = request();
        req.skills.groups = vec![
            SkillGroup::new("Tools", &["git"]),
            SkillGroup::new("TOOLS", &["vim"]),
        ];
        let result = generate_documents(&TemplateDocumentGenerator::default(), &req).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_pinned_date() {
        let generator = TemplateDocumentGenerator {
            today: NaiveDate::from_ymd_opt(2023, 11, 30),
        };
        let mut req = request();
        req.templates.resume = Some("{{Today's Date}}".to_string());
        let response = generate_documents(&generator, &req).await.unwrap();
        assert_eq!(response.resume, "November 30, 2023");
    }

    #[test]
    fn test_generate_request_deserialization_with_defaults() {
        let json = serde_json::json!({
            "templates": { "resume": "{{Candidate Name}}" },
            "candidate": { "full_name": "Jane" },
            "documents": { "resume": true }
        });
        let request: GenerateRequest = serde_json::from_value(json).unwrap();
        assert!(request.documents.resume);
        assert!(!request.documents.cover_letter);
        assert!(request.templates.cover_letter.is_none());
        assert_eq!(request.job.company, "");
    }
}
