//! Storage trait definitions

use signflow_types::{
    DocumentId, DocumentRecord, DocumentStatus, DocumentType, InternshipId, SignerRole, StoreResult,
    StudentId,
};

/// Storage for document records.
///
/// `put` replaces the whole record. Nothing coordinates concurrent writers;
/// the last `put` for an id wins.
pub trait DocumentStore {
    /// Get a document by ID
    fn get(&self, id: &DocumentId) -> StoreResult<Option<DocumentRecord>>;

    /// Create or replace a document
    fn put(&mut self, record: DocumentRecord) -> StoreResult<()>;

    /// List documents matching a filter, oldest first
    fn list(&self, filter: &DocumentFilter) -> StoreResult<Vec<DocumentRecord>>;

    /// Delete a document by ID
    fn delete(&mut self, id: &DocumentId) -> StoreResult<bool>;
}

/// Criteria for listing documents. Unset fields match everything.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DocumentFilter {
    pub student_id: Option<StudentId>,
    pub internship_id: Option<InternshipId>,
    pub status: Option<DocumentStatus>,
    pub doc_type: Option<DocumentType>,
    /// Only documents still waiting on this role's signature
    pub awaiting: Option<SignerRole>,
    /// Case-insensitive substring of the title
    pub search: Option<String>,
}

impl DocumentFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn for_student(student_id: StudentId) -> Self {
        Self {
            student_id: Some(student_id),
            ..Self::default()
        }
    }

    pub fn with_status(mut self, status: DocumentStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_type(mut self, doc_type: DocumentType) -> Self {
        self.doc_type = Some(doc_type);
        self
    }

    pub fn with_internship(mut self, internship_id: InternshipId) -> Self {
        self.internship_id = Some(internship_id);
        self
    }

    pub fn awaiting(mut self, role: SignerRole) -> Self {
        self.awaiting = Some(role);
        self
    }

    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    pub fn matches(&self, record: &DocumentRecord) -> bool {
        if let Some(student_id) = &self.student_id {
            if record.student_id() != student_id {
                return false;
            }
        }
        if let Some(internship_id) = &self.internship_id {
            if record.internship_id() != Some(internship_id) {
                return false;
            }
        }
        if let Some(status) = self.status {
            if record.status() != status {
                return false;
            }
        }
        if let Some(doc_type) = self.doc_type {
            if record.doc_type() != doc_type {
                return false;
            }
        }
        if let Some(role) = self.awaiting {
            if record.is_terminal() || !record.pending_roles().contains(&role) {
                return false;
            }
        }
        if let Some(search) = &self.search {
            let needle = search.trim().to_lowercase();
            if !needle.is_empty() && !record.title().to_lowercase().contains(&needle) {
                return false;
            }
        }
        true
    }
}

/// Order records oldest first, breaking ties by id
pub(crate) fn sort_records(records: &mut [DocumentRecord]) {
    records.sort_by(|a, b| {
        a.created_date()
            .cmp(&b.created_date())
            .then_with(|| a.id().cmp(b.id()))
    });
}
