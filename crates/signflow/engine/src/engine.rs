//! Workflow engine: the document/signature state transitions
//!
//! Every operation takes the current record by reference and returns a new
//! record, or a typed error with the input left untouched. The engine never
//! reads or writes a store; callers persist the returned record themselves.

use crate::aggregation::aggregate_status;
use crate::seeding::{seed_signatures, PlaceholderDirectory, SignerDirectory};
use chrono::Utc;
use signflow_types::*;
use std::sync::Arc;

/// Applies workflow transitions to document records
#[derive(Clone)]
pub struct WorkflowEngine {
    /// Resolves signer display names when documents are created
    directory: Arc<dyn SignerDirectory>,
}

impl std::fmt::Debug for WorkflowEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkflowEngine").finish_non_exhaustive()
    }
}

impl Default for WorkflowEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkflowEngine {
    /// Create an engine that names every signer with a placeholder
    pub fn new() -> Self {
        Self {
            directory: Arc::new(PlaceholderDirectory),
        }
    }

    pub fn with_directory(directory: impl SignerDirectory + 'static) -> Self {
        Self {
            directory: Arc::new(directory),
        }
    }

    // ── Creation ─────────────────────────────────────────────────────

    /// Create a draft document with one pending signature slot per role the
    /// template requires.
    pub fn create_document(
        &self,
        template: &DocumentTemplate,
        student_id: StudentId,
        internship_id: Option<InternshipId>,
        title: &str,
        content: &str,
    ) -> DocumentResult<DocumentRecord> {
        let title = title.trim();
        if title.is_empty() {
            return Err(DocumentError::EmptyTitle);
        }
        template.validate()?;

        let signatures = seed_signatures(
            template,
            self.directory.as_ref(),
            &student_id,
            internship_id.as_ref(),
        );
        let mut document = DocumentRecord::new(
            template,
            student_id,
            title,
            content,
            signatures,
            Utc::now(),
        );
        if let Some(internship_id) = internship_id {
            document = document.with_internship(internship_id);
        }

        debug_assert_eq!(
            document.signatures().len(),
            template.required_signatures.len()
        );

        tracing::info!(
            document_id = %document.id(),
            template = %template.id,
            signers = document.signatures().len(),
            "Document created"
        );
        Ok(document)
    }

    // ── Transitions ──────────────────────────────────────────────────

    /// Record `role`'s signature.
    ///
    /// Signing a role that has already signed returns the document
    /// unchanged, so a retried submission is harmless.
    pub fn submit_signature(
        &self,
        document: &DocumentRecord,
        role: SignerRole,
        image: SignatureImage,
    ) -> DocumentResult<DocumentRecord> {
        ensure_open(document)?;
        let slot = find_slot(document, role)?;
        if image.is_blank() {
            return Err(DocumentError::EmptySignatureImage);
        }
        if slot.is_signed() {
            tracing::debug!(
                document_id = %document.id(),
                role = %role,
                "Signature already recorded, ignoring resubmission"
            );
            return Ok(document.clone());
        }

        let now = Utc::now();
        let mut next = document.clone();
        if let Some(slot) = next.signature_mut(role) {
            slot.sign(image, now);
        }
        next.record_history(
            HistoryEvent::SignatureSubmitted { role },
            format!("{} signed", role.label()),
            Some(role),
            now,
        );
        next.touch(now);

        let status = aggregate_status(next.status(), next.signatures());
        next.set_status(status, now);

        tracing::info!(
            document_id = %next.id(),
            role = %role,
            status = ?next.status(),
            signed = next.signed_count(),
            required = next.signatures().len(),
            "Signature submitted"
        );
        Ok(next)
    }

    /// Record `role`'s refusal to sign. Any single rejection rejects the
    /// whole document; signatures already recorded are kept.
    pub fn reject_signature(
        &self,
        document: &DocumentRecord,
        role: SignerRole,
        reason: Option<String>,
    ) -> DocumentResult<DocumentRecord> {
        ensure_open(document)?;
        if document.status() == DocumentStatus::Signed {
            return Err(DocumentError::InvalidTransition {
                from: document.status(),
                action: "reject",
            });
        }
        let slot = find_slot(document, role)?;
        if slot.is_signed() {
            return Err(DocumentError::InvalidTransition {
                from: document.status(),
                action: "withdraw a recorded signature on",
            });
        }

        let now = Utc::now();
        let reason = reason
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());
        let description = match &reason {
            Some(reason) => format!("{} rejected: {}", role.label(), reason),
            None => format!("{} rejected", role.label()),
        };

        let mut next = document.clone();
        if let Some(slot) = next.signature_mut(role) {
            slot.reject(reason);
        }
        next.record_history(
            HistoryEvent::SignatureRejected { role },
            description,
            Some(role),
            now,
        );
        next.touch(now);

        let status = aggregate_status(next.status(), next.signatures());
        next.set_status(status, now);

        tracing::warn!(
            document_id = %next.id(),
            role = %role,
            "Signature rejected, document halted"
        );
        Ok(next)
    }

    /// Administrative acceptance of a fully signed document
    pub fn validate(&self, document: &DocumentRecord) -> DocumentResult<DocumentRecord> {
        ensure_open(document)?;
        if document.status() != DocumentStatus::Signed {
            return Err(DocumentError::InvalidTransition {
                from: document.status(),
                action: "validate",
            });
        }

        let now = Utc::now();
        let mut next = document.clone();
        next.set_status(DocumentStatus::Validated, now);
        next.touch(now);

        tracing::info!(document_id = %next.id(), "Document validated");
        Ok(next)
    }

    /// Replace the body of a document that has not reached a terminal state
    pub fn update_content(
        &self,
        document: &DocumentRecord,
        content: &str,
    ) -> DocumentResult<DocumentRecord> {
        ensure_open(document)?;
        if document.content() == content {
            return Ok(document.clone());
        }

        let now = Utc::now();
        let mut next = document.clone();
        next.set_content(content);
        next.record_history(HistoryEvent::ContentUpdated, "Content updated", None, now);
        next.touch(now);

        tracing::info!(document_id = %next.id(), bytes = content.len(), "Content updated");
        Ok(next)
    }
}

fn ensure_open(document: &DocumentRecord) -> DocumentResult<()> {
    if document.is_terminal() {
        return Err(DocumentError::DocumentTerminated {
            document: document.id().clone(),
            status: document.status(),
        });
    }
    Ok(())
}

fn find_slot(document: &DocumentRecord, role: SignerRole) -> DocumentResult<&SignatureRecord> {
    document
        .signature(role)
        .ok_or_else(|| DocumentError::UnknownSignerRole {
            document: document.id().clone(),
            role,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seeding::StaticDirectory;

    fn make_template() -> DocumentTemplate {
        DocumentTemplate::new("report", "Final report", DocumentType::FinalReport)
            .with_content("Boilerplate")
            .with_required_signatures([SignerRole::Student, SignerRole::Tutor])
    }

    fn make_document(engine: &WorkflowEngine) -> DocumentRecord {
        engine
            .create_document(
                &make_template(),
                StudentId::new("stu-1"),
                Some(InternshipId::new("int-1")),
                "Final report - Alice",
                "Body",
            )
            .unwrap()
    }

    fn img(name: &str) -> SignatureImage {
        SignatureImage::new(format!("img://{}", name))
    }

    #[test]
    fn test_create_document() {
        let engine = WorkflowEngine::new();
        let doc = make_document(&engine);

        assert_eq!(doc.status(), DocumentStatus::Draft);
        assert_eq!(doc.title(), "Final report - Alice");
        assert_eq!(doc.template_id(), &TemplateId::new("report"));
        assert_eq!(doc.internship_id(), Some(&InternshipId::new("int-1")));
        assert_eq!(doc.signatures().len(), 2);
        assert!(doc.signatures().iter().all(|s| s.is_pending()));
    }

    #[test]
    fn test_create_document_empty_title() {
        let engine = WorkflowEngine::new();
        let result = engine.create_document(
            &make_template(),
            StudentId::new("stu-1"),
            None,
            "   ",
            "",
        );
        assert!(matches!(result, Err(DocumentError::EmptyTitle)));
    }

    #[test]
    fn test_create_document_invalid_template() {
        let engine = WorkflowEngine::new();
        let template = make_template().with_required_signature(SignerRole::Tutor);
        let result = engine.create_document(&template, StudentId::new("stu-1"), None, "T", "");
        assert!(matches!(
            result,
            Err(DocumentError::DuplicateSignerRole(SignerRole::Tutor))
        ));
    }

    #[test]
    fn test_create_uses_directory() {
        let engine =
            WorkflowEngine::with_directory(StaticDirectory::new().with_signer(SignerRole::Tutor, "Dr. Martin"));
        let doc = make_document(&engine);
        assert_eq!(doc.signature(SignerRole::Tutor).unwrap().signer_name(), "Dr. Martin");
        assert_eq!(
            doc.signature(SignerRole::Student).unwrap().signer_name(),
            "Student (pending assignment)"
        );
    }

    #[test]
    fn test_submit_does_not_mutate_input() {
        let engine = WorkflowEngine::new();
        let doc = make_document(&engine);
        let before = doc.clone();
        let signed = engine
            .submit_signature(&doc, SignerRole::Student, img("s"))
            .unwrap();

        assert_eq!(doc, before);
        assert_ne!(signed, doc);
        assert!(signed.last_modified() >= doc.last_modified());
    }

    #[test]
    fn test_submit_unknown_role() {
        let engine = WorkflowEngine::new();
        let doc = make_document(&engine);
        let result = engine.submit_signature(&doc, SignerRole::Admin, img("a"));
        assert!(matches!(
            result,
            Err(DocumentError::UnknownSignerRole { role: SignerRole::Admin, .. })
        ));
    }

    #[test]
    fn test_submit_blank_image() {
        let engine = WorkflowEngine::new();
        let doc = make_document(&engine);
        let result = engine.submit_signature(&doc, SignerRole::Student, SignatureImage::new(""));
        assert!(matches!(result, Err(DocumentError::EmptySignatureImage)));
    }

    #[test]
    fn test_submit_is_idempotent() {
        let engine = WorkflowEngine::new();
        let doc = make_document(&engine);
        let once = engine
            .submit_signature(&doc, SignerRole::Student, img("s"))
            .unwrap();
        let twice = engine
            .submit_signature(&once, SignerRole::Student, img("other"))
            .unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_signed_history() {
        let engine = WorkflowEngine::new();
        let doc = make_document(&engine);
        let doc = engine
            .submit_signature(&doc, SignerRole::Student, img("s"))
            .unwrap();
        let doc = engine
            .submit_signature(&doc, SignerRole::Tutor, img("t"))
            .unwrap();

        let events: Vec<_> = doc.history().iter().map(|h| h.event.name()).collect();
        assert_eq!(
            events,
            vec![
                "created",
                "signature_submitted",
                "status_changed",
                "signature_submitted",
                "status_changed",
            ]
        );
        assert_eq!(doc.history()[1].actor, Some(SignerRole::Student));
    }

    #[test]
    fn test_reject_signed_document_is_invalid() {
        let engine = WorkflowEngine::new();
        let doc = make_document(&engine);
        let doc = engine
            .submit_signature(&doc, SignerRole::Student, img("s"))
            .unwrap();
        let doc = engine
            .submit_signature(&doc, SignerRole::Tutor, img("t"))
            .unwrap();

        let result = engine.reject_signature(&doc, SignerRole::Tutor, None);
        assert!(matches!(
            result,
            Err(DocumentError::InvalidTransition {
                from: DocumentStatus::Signed,
                ..
            })
        ));
    }

    #[test]
    fn test_reject_already_signed_role_is_invalid() {
        let engine = WorkflowEngine::new();
        let doc = make_document(&engine);
        let doc = engine
            .submit_signature(&doc, SignerRole::Student, img("s"))
            .unwrap();

        let result = engine.reject_signature(&doc, SignerRole::Student, None);
        assert!(matches!(result, Err(DocumentError::InvalidTransition { .. })));
    }

    #[test]
    fn test_reject_from_draft_with_reason() {
        let engine = WorkflowEngine::new();
        let doc = make_document(&engine);
        let rejected = engine
            .reject_signature(&doc, SignerRole::Tutor, Some("  Wrong company  ".into()))
            .unwrap();

        assert_eq!(rejected.status(), DocumentStatus::Rejected);
        let slot = rejected.signature(SignerRole::Tutor).unwrap();
        assert_eq!(slot.rejection_reason(), Some("Wrong company"));
        assert!(slot.is_consistent());
    }

    #[test]
    fn test_validate_requires_signed() {
        let engine = WorkflowEngine::new();
        let doc = make_document(&engine);
        let result = engine.validate(&doc);
        assert!(matches!(
            result,
            Err(DocumentError::InvalidTransition {
                from: DocumentStatus::Draft,
                action: "validate"
            })
        ));
    }

    #[test]
    fn test_update_content() {
        let engine = WorkflowEngine::new();
        let doc = make_document(&engine);

        let same = engine.update_content(&doc, "Body").unwrap();
        assert_eq!(same, doc);

        let edited = engine.update_content(&doc, "New body").unwrap();
        assert_eq!(edited.content(), "New body");
        assert_eq!(edited.status(), DocumentStatus::Draft);
        assert_eq!(
            edited.history().last().unwrap().event,
            HistoryEvent::ContentUpdated
        );
    }

    #[test]
    fn test_update_content_terminal() {
        let engine = WorkflowEngine::new();
        let doc = make_document(&engine);
        let rejected = engine
            .reject_signature(&doc, SignerRole::Student, None)
            .unwrap();
        let result = engine.update_content(&rejected, "Too late");
        assert!(matches!(
            result,
            Err(DocumentError::DocumentTerminated {
                status: DocumentStatus::Rejected,
                ..
            })
        ));
    }
}
