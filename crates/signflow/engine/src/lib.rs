//! Signflow workflow engine
//!
//! Moves internship documents through their signature lifecycle. The
//! engine itself is a set of pure transitions over [`DocumentRecord`]
//! values; storage is a separate concern behind [`DocumentStore`].
//!
//! # Architecture
//!
//! - [`WorkflowEngine`] - create, sign, reject, validate and edit documents
//! - [`aggregate_status`] - derives document status from its signature slots
//! - [`TemplateRegistry`] - stores and retrieves document templates
//! - [`SignerDirectory`] - resolves signer names when slots are seeded
//! - [`DocumentStore`] - `get`/`put`/`list`/`delete` over document records
//! - [`DocumentService`] - loads, transitions and persists in one call
//! - [`DocumentStats`] - dashboard counts
//!
//! # Example
//!
//! ```rust
//! use signflow_engine::{WorkflowEngine, TemplateRegistry};
//! use signflow_types::*;
//!
//! let registry = TemplateRegistry::with_builtin_templates();
//! let template = registry.get(&TemplateId::new("final-report")).unwrap();
//! let engine = WorkflowEngine::new();
//!
//! let doc = engine
//!     .create_document(template, StudentId::new("stu-42"), None, "Final report", "")
//!     .unwrap();
//! assert_eq!(doc.status(), DocumentStatus::Draft);
//!
//! let doc = engine
//!     .submit_signature(&doc, SignerRole::Student, SignatureImage::new("img://student"))
//!     .unwrap();
//! assert_eq!(doc.status(), DocumentStatus::PendingSignature);
//!
//! let doc = engine
//!     .submit_signature(&doc, SignerRole::Tutor, SignatureImage::new("img://tutor"))
//!     .unwrap();
//! assert_eq!(doc.status(), DocumentStatus::Signed);
//!
//! let doc = engine.validate(&doc).unwrap();
//! assert!(doc.is_terminal());
//! ```
//!
//! [`DocumentRecord`]: signflow_types::DocumentRecord

#![deny(unsafe_code)]

pub mod aggregation;
pub mod engine;
pub mod seeding;
pub mod service;
pub mod stats;
pub mod store;
pub mod template_registry;

// Re-export main types
pub use aggregation::aggregate_status;
pub use engine::WorkflowEngine;
pub use seeding::{placeholder_name, seed_signatures, PlaceholderDirectory, SignerDirectory, StaticDirectory};
pub use service::DocumentService;
pub use stats::DocumentStats;
pub use store::{DocumentFilter, DocumentStore, InMemoryDocumentStore, JsonFileDocumentStore};
pub use template_registry::TemplateRegistry;
