//! JSON file storage implementation
//!
//! The whole store lives in one pretty-printed JSON array. Every write
//! rewrites the file through a temporary sibling and a rename, so readers
//! never observe a half-written store.

use super::memory::InMemoryDocumentStore;
use super::traits::{DocumentFilter, DocumentStore};
use signflow_types::{DocumentId, DocumentRecord, StoreError, StoreResult};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Document store persisted to a single JSON file
#[derive(Debug)]
pub struct JsonFileDocumentStore {
    path: PathBuf,
    documents: InMemoryDocumentStore,
}

impl JsonFileDocumentStore {
    /// Open a store file. A missing file is an empty store.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let documents = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            let records = parse_records(&contents)?;
            tracing::debug!(path = %path.display(), documents = records.len(), "Document store loaded");
            InMemoryDocumentStore::with_documents(records)
        } else {
            tracing::debug!(path = %path.display(), "Document store file missing, starting empty");
            InMemoryDocumentStore::new()
        };
        Ok(Self { path, documents })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    fn persist(&self, documents: &InMemoryDocumentStore) -> StoreResult<()> {
        let json = serde_json::to_string_pretty(&documents.snapshot())
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }

        tracing::debug!(path = %self.path.display(), documents = documents.len(), "Document store written");
        Ok(())
    }
}

fn parse_records(contents: &str) -> StoreResult<Vec<DocumentRecord>> {
    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }
    let records: Vec<DocumentRecord> =
        serde_json::from_str(contents).map_err(|e| StoreError::Serialization(e.to_string()))?;

    let mut seen = HashSet::new();
    for record in &records {
        if !seen.insert(record.id().clone()) {
            return Err(StoreError::Corrupt(format!(
                "document {} appears more than once",
                record.id()
            )));
        }
        record
            .check_invariants()
            .map_err(|e| StoreError::Corrupt(e.to_string()))?;
    }
    Ok(records)
}

impl DocumentStore for JsonFileDocumentStore {
    fn get(&self, id: &DocumentId) -> StoreResult<Option<DocumentRecord>> {
        self.documents.get(id)
    }

    fn put(&mut self, record: DocumentRecord) -> StoreResult<()> {
        let mut next = self.documents.clone();
        next.put(record)?;
        self.persist(&next)?;
        self.documents = next;
        Ok(())
    }

    fn list(&self, filter: &DocumentFilter) -> StoreResult<Vec<DocumentRecord>> {
        self.documents.list(filter)
    }

    fn delete(&mut self, id: &DocumentId) -> StoreResult<bool> {
        let mut next = self.documents.clone();
        if !next.delete(id)? {
            return Ok(false);
        }
        self.persist(&next)?;
        self.documents = next;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WorkflowEngine;
    use signflow_types::*;

    fn make_document() -> DocumentRecord {
        let template = DocumentTemplate::new("cert", "Certificate", DocumentType::InternshipCertificate)
            .with_required_signatures([SignerRole::Supervisor, SignerRole::Admin]);
        WorkflowEngine::new()
            .create_document(&template, StudentId::new("stu-1"), None, "Certificate", "")
            .unwrap()
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileDocumentStore::open(dir.path().join("docs.json")).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_put_persists_across_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("docs.json");
        let doc = make_document();

        let mut store = JsonFileDocumentStore::open(&path).unwrap();
        store.put(doc.clone()).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());

        let reopened = JsonFileDocumentStore::open(&path).unwrap();
        assert_eq!(reopened.len(), 1);
        assert_eq!(reopened.get(doc.id()).unwrap(), Some(doc));
    }

    #[test]
    fn test_delete_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docs.json");
        let doc = make_document();

        let mut store = JsonFileDocumentStore::open(&path).unwrap();
        store.put(doc.clone()).unwrap();
        assert!(store.delete(doc.id()).unwrap());
        assert!(!store.delete(doc.id()).unwrap());

        let reopened = JsonFileDocumentStore::open(&path).unwrap();
        assert!(reopened.is_empty());
    }

    #[test]
    fn test_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docs.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            JsonFileDocumentStore::open(&path),
            Err(StoreError::Serialization(_))
        ));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docs.json");
        let doc = make_document();
        let json = serde_json::to_string(&vec![doc.clone(), doc]).unwrap();
        fs::write(&path, json).unwrap();
        assert!(matches!(
            JsonFileDocumentStore::open(&path),
            Err(StoreError::Corrupt(_))
        ));
    }

    fn write_tampered(path: &Path, tamper: impl FnOnce(&mut serde_json::Value)) {
        let mut json = serde_json::to_value(vec![make_document()]).unwrap();
        tamper(&mut json[0]);
        fs::write(path, serde_json::to_string(&json).unwrap()).unwrap();
    }

    #[test]
    fn test_repeated_signer_role_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docs.json");
        write_tampered(&path, |doc| {
            let extra = doc["signatures"][1].clone();
            doc["signatures"].as_array_mut().unwrap().push(extra);
        });
        assert!(matches!(
            JsonFileDocumentStore::open(&path),
            Err(StoreError::Corrupt(_))
        ));
    }

    #[test]
    fn test_signed_status_with_pending_slots_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docs.json");
        write_tampered(&path, |doc| doc["status"] = "signed".into());
        assert!(matches!(
            JsonFileDocumentStore::open(&path),
            Err(StoreError::Corrupt(_))
        ));
    }

    #[test]
    fn test_history_gap_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docs.json");
        write_tampered(&path, |doc| doc["history"][0]["sequence"] = 3.into());
        assert!(matches!(
            JsonFileDocumentStore::open(&path),
            Err(StoreError::Corrupt(_))
        ));
    }

    #[test]
    fn test_failed_rename_cleans_up_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docs.json");
        let mut store = JsonFileDocumentStore::open(&path).unwrap();

        // a non-empty directory at the target path makes the rename fail
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), "x").unwrap();

        assert!(matches!(store.put(make_document()), Err(StoreError::Io(_))));
        assert!(!path.with_extension("json.tmp").exists());
        assert!(store.is_empty());
    }

    #[test]
    fn test_empty_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docs.json");
        fs::write(&path, "").unwrap();
        assert!(JsonFileDocumentStore::open(&path).unwrap().is_empty());
    }
}
