//! In-memory storage implementation

use super::traits::{sort_records, DocumentFilter, DocumentStore};
use signflow_types::{DocumentId, DocumentRecord, StoreResult};
use std::collections::HashMap;

/// In-memory storage for development and testing
#[derive(Clone, Debug, Default)]
pub struct InMemoryDocumentStore {
    documents: HashMap<DocumentId, DocumentRecord>,
}

impl InMemoryDocumentStore {
    /// Create a new in-memory storage
    pub fn new() -> Self {
        Self {
            documents: HashMap::new(),
        }
    }

    /// Create a store pre-populated with records
    pub fn with_documents(records: impl IntoIterator<Item = DocumentRecord>) -> Self {
        Self {
            documents: records
                .into_iter()
                .map(|record| (record.id().clone(), record))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// All records, oldest first
    pub fn snapshot(&self) -> Vec<DocumentRecord> {
        let mut records: Vec<_> = self.documents.values().cloned().collect();
        sort_records(&mut records);
        records
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn get(&self, id: &DocumentId) -> StoreResult<Option<DocumentRecord>> {
        Ok(self.documents.get(id).cloned())
    }

    fn put(&mut self, record: DocumentRecord) -> StoreResult<()> {
        self.documents.insert(record.id().clone(), record);
        Ok(())
    }

    fn list(&self, filter: &DocumentFilter) -> StoreResult<Vec<DocumentRecord>> {
        let mut records: Vec<_> = self
            .documents
            .values()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect();
        sort_records(&mut records);
        Ok(records)
    }

    fn delete(&mut self, id: &DocumentId) -> StoreResult<bool> {
        Ok(self.documents.remove(id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WorkflowEngine;
    use signflow_types::*;

    fn make_document(engine: &WorkflowEngine, student: &str, title: &str) -> DocumentRecord {
        let template = DocumentTemplate::new("report", "Report", DocumentType::FinalReport)
            .with_required_signatures([SignerRole::Student, SignerRole::Tutor]);
        engine
            .create_document(&template, StudentId::new(student), None, title, "")
            .unwrap()
    }

    #[test]
    fn test_put_get_delete() {
        let engine = WorkflowEngine::new();
        let mut store = InMemoryDocumentStore::new();
        let doc = make_document(&engine, "stu-1", "Report");
        let id = doc.id().clone();

        store.put(doc.clone()).unwrap();
        assert_eq!(store.get(&id).unwrap(), Some(doc));
        assert_eq!(store.len(), 1);

        assert!(store.delete(&id).unwrap());
        assert!(!store.delete(&id).unwrap());
        assert!(store.get(&id).unwrap().is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_put_replaces_whole_record() {
        let engine = WorkflowEngine::new();
        let mut store = InMemoryDocumentStore::new();
        let doc = make_document(&engine, "stu-1", "Report");
        store.put(doc.clone()).unwrap();

        let signed = engine
            .submit_signature(&doc, SignerRole::Student, SignatureImage::new("img"))
            .unwrap();
        store.put(signed.clone()).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(doc.id()).unwrap(), Some(signed));
    }

    #[test]
    fn test_list_with_filters() {
        let engine = WorkflowEngine::new();
        let a = make_document(&engine, "stu-1", "Final report Alice");
        let b = make_document(&engine, "stu-2", "Final report Bob");
        let b = engine
            .submit_signature(&b, SignerRole::Student, SignatureImage::new("img"))
            .unwrap();
        let store = InMemoryDocumentStore::with_documents(vec![a.clone(), b.clone()]);

        assert_eq!(store.list(&DocumentFilter::all()).unwrap().len(), 2);

        let alice = store
            .list(&DocumentFilter::for_student(StudentId::new("stu-1")))
            .unwrap();
        assert_eq!(alice, vec![a.clone()]);

        let pending = store
            .list(&DocumentFilter::all().with_status(DocumentStatus::PendingSignature))
            .unwrap();
        assert_eq!(pending, vec![b.clone()]);

        let awaiting_student = store
            .list(&DocumentFilter::all().awaiting(SignerRole::Student))
            .unwrap();
        assert_eq!(awaiting_student, vec![a.clone()]);

        let search = store
            .list(&DocumentFilter::all().with_search("BOB"))
            .unwrap();
        assert_eq!(search, vec![b]);

        let none = store
            .list(&DocumentFilter::all().with_type(DocumentType::EvaluationForm))
            .unwrap();
        assert!(none.is_empty());
    }
}
