//! Storage layer for document records
//!
//! The workflow engine never touches storage itself. The service layer
//! loads a record with `get`, hands it to the engine and writes the result
//! back with `put`.

mod json_file;
mod memory;
mod traits;

pub use json_file::JsonFileDocumentStore;
pub use memory::InMemoryDocumentStore;
pub use traits::{DocumentFilter, DocumentStore};
