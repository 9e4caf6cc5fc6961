//! CLI command implementations

pub mod documents;
pub mod stats;
pub mod templates;

use crate::config::CliConfig;
use crate::error::CliResult;
use signflow_engine::{DocumentService, JsonFileDocumentStore, WorkflowEngine};

/// Service over the configured JSON store, templates and signer names
pub fn open_service(config: &CliConfig) -> CliResult<DocumentService<JsonFileDocumentStore>> {
    let templates = config.template_registry()?;
    let engine = WorkflowEngine::with_directory(config.signer_directory()?);
    let store = JsonFileDocumentStore::open(&config.store_path)?;
    Ok(DocumentService::new(templates, engine, store))
}
