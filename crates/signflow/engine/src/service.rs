//! Document service: the entry point that ties templates, the workflow
//! engine and a document store together.
//!
//! Each operation loads the current record, applies one engine transition
//! and writes the result back. When the engine refuses a transition nothing
//! is written, so the stored record stays exactly as it was.

use crate::store::{DocumentFilter, DocumentStore};
use crate::{DocumentStats, TemplateRegistry, WorkflowEngine};
use signflow_types::*;

/// Document workflow service over a store backend
#[derive(Debug)]
pub struct DocumentService<S: DocumentStore> {
    templates: TemplateRegistry,
    engine: WorkflowEngine,
    store: S,
}

impl<S: DocumentStore> DocumentService<S> {
    pub fn new(templates: TemplateRegistry, engine: WorkflowEngine, store: S) -> Self {
        Self {
            templates,
            engine,
            store,
        }
    }

    // ── Templates ────────────────────────────────────────────────────

    pub fn templates(&self) -> &TemplateRegistry {
        &self.templates
    }

    pub fn templates_mut(&mut self) -> &mut TemplateRegistry {
        &mut self.templates
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // ── Document lifecycle ───────────────────────────────────────────

    /// Create a document from a registered template and persist it
    pub fn create_document(
        &mut self,
        template_id: &TemplateId,
        student_id: StudentId,
        internship_id: Option<InternshipId>,
        title: &str,
        content: Option<&str>,
    ) -> DocumentResult<DocumentRecord> {
        let template = self.templates.get(template_id)?;
        let content = content.unwrap_or(&template.content);
        let document =
            self.engine
                .create_document(template, student_id, internship_id, title, content)?;
        self.store.put(document.clone())?;
        Ok(document)
    }

    /// Record a signature from a submission
    pub fn submit_signature(
        &mut self,
        submission: &SignatureSubmission,
    ) -> DocumentResult<DocumentRecord> {
        let document = self.load(&submission.document_id)?;
        let next = self.engine.submit_signature(
            &document,
            submission.role,
            submission.signature_image_ref.clone(),
        )?;
        self.save_if_changed(&document, next)
    }

    pub fn reject_signature(
        &mut self,
        id: &DocumentId,
        role: SignerRole,
        reason: Option<String>,
    ) -> DocumentResult<DocumentRecord> {
        let document = self.load(id)?;
        let next = self.engine.reject_signature(&document, role, reason)?;
        self.save_if_changed(&document, next)
    }

    pub fn validate(&mut self, id: &DocumentId) -> DocumentResult<DocumentRecord> {
        let document = self.load(id)?;
        let next = self.engine.validate(&document)?;
        self.save_if_changed(&document, next)
    }

    pub fn update_content(&mut self, id: &DocumentId, content: &str) -> DocumentResult<DocumentRecord> {
        let document = self.load(id)?;
        let next = self.engine.update_content(&document, content)?;
        self.save_if_changed(&document, next)
    }

    /// Delete a document outright, whatever its status
    pub fn delete(&mut self, id: &DocumentId) -> DocumentResult<()> {
        if !self.store.delete(id)? {
            return Err(DocumentError::DocumentNotFound(id.clone()));
        }
        tracing::info!(document_id = %id, "Document deleted");
        Ok(())
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn get(&self, id: &DocumentId) -> DocumentResult<DocumentRecord> {
        self.load(id)
    }

    pub fn list(&self, filter: &DocumentFilter) -> DocumentResult<Vec<DocumentRecord>> {
        Ok(self.store.list(filter)?)
    }

    pub fn stats(&self, filter: &DocumentFilter) -> DocumentResult<DocumentStats> {
        let documents = self.store.list(filter)?;
        Ok(DocumentStats::from_documents(&documents))
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn load(&self, id: &DocumentId) -> DocumentResult<DocumentRecord> {
        self.store
            .get(id)?
            .ok_or_else(|| DocumentError::DocumentNotFound(id.clone()))
    }

    fn save_if_changed(
        &mut self,
        before: &DocumentRecord,
        after: DocumentRecord,
    ) -> DocumentResult<DocumentRecord> {
        if &after != before {
            self.store.put(after.clone())?;
        }
        Ok(after)
    }
}
