//! Error types for the document workflow

use crate::{DocumentId, DocumentStatus, SignerRole, TemplateId};

/// Errors that can occur in document workflow operations
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("Signer role '{role}' is not required on document {document}")]
    UnknownSignerRole {
        document: DocumentId,
        role: SignerRole,
    },

    #[error("Document {document} is {status} and accepts no further transitions")]
    DocumentTerminated {
        document: DocumentId,
        status: DocumentStatus,
    },

    #[error("Invalid transition: cannot {action} a {from} document")]
    InvalidTransition {
        from: DocumentStatus,
        action: &'static str,
    },

    #[error("Document {document} is inconsistent: {reason}")]
    InconsistentRecord {
        document: DocumentId,
        reason: String,
    },

    #[error("Document template not found: {0}")]
    TemplateNotFound(TemplateId),

    #[error("Document not found: {0}")]
    DocumentNotFound(DocumentId),

    #[error("Document title must not be empty")]
    EmptyTitle,

    #[error("Signature image reference must not be empty")]
    EmptySignatureImage,

    #[error("Invalid document template: {0}")]
    InvalidTemplate(String),

    #[error("Signer role listed more than once: {0}")]
    DuplicateSignerRole(SignerRole),

    #[error("Unknown signer role: {0}")]
    UnknownRole(String),

    #[error("Unknown document type: {0}")]
    UnknownDocumentType(String),

    #[error("Unknown document status: {0}")]
    UnknownStatus(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Errors raised by document store backends
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Corrupt store: {0}")]
    Corrupt(String),
}

/// Result type alias for document workflow operations
pub type DocumentResult<T> = Result<T, DocumentError>;

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
