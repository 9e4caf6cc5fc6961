//! Signflow domain types
//!
//! Internship documents move through a multi-party signature workflow.
//! Every document is created from a template that names the signer roles
//! it requires, and each required role gets exactly one signature record.
//!
//! # Key Concepts
//!
//! - **DocumentTemplate**: boilerplate content plus the ordered set of
//!   signer roles a document of that kind needs.
//! - **DocumentRecord**: a document created from a template, bound to a
//!   student and optionally an internship, with its own lifecycle status.
//! - **SignatureRecord**: one signer's attestation state for one document.
//! - **HistoryEntry**: an ordered audit trail of every mutation.
//!
//! # Lifecycle
//!
//! ```text
//! draft -> pending_signature -> signed -> validated
//!    \              \
//!     +--------------+--> rejected
//! ```
//!
//! `validated` and `rejected` are terminal.

#![deny(unsafe_code)]

mod document;
mod errors;
mod history;
mod role;
mod signature;
mod submission;
mod template;

pub use document::*;
pub use errors::*;
pub use history::*;
pub use role::*;
pub use signature::*;
pub use submission::*;
pub use template::*;
