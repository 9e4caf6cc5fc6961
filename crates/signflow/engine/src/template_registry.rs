//! Template registry: stores and retrieves document templates
//!
//! Templates are validated on registration, so anything the registry hands
//! out can seed a well-formed document.

use signflow_types::{DocumentError, DocumentResult, DocumentTemplate, DocumentType, TemplateId};
use std::collections::HashMap;

/// Registry of document templates
#[derive(Clone, Debug, Default)]
pub struct TemplateRegistry {
    templates: HashMap<TemplateId, DocumentTemplate>,
}

impl TemplateRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            templates: HashMap::new(),
        }
    }

    /// Create a registry holding the standard internship office catalog
    pub fn with_builtin_templates() -> Self {
        let mut registry = Self::new();
        for template in DocumentTemplate::builtin() {
            let id = template.id.clone();
            if let Err(e) = registry.register(template) {
                tracing::error!(template = %id, error = %e, "Builtin template rejected");
            }
        }
        registry
    }

    /// Register a template, replacing any template with the same id
    pub fn register(&mut self, template: DocumentTemplate) -> DocumentResult<TemplateId> {
        template.validate()?;

        let id = template.id.clone();
        if self.templates.insert(id.clone(), template).is_some() {
            tracing::info!(template = %id, "Document template replaced");
        } else {
            tracing::info!(template = %id, "Document template registered");
        }
        Ok(id)
    }

    /// Register several templates, stopping at the first invalid one
    pub fn register_all(
        &mut self,
        templates: impl IntoIterator<Item = DocumentTemplate>,
    ) -> DocumentResult<usize> {
        let mut count = 0;
        for template in templates {
            self.register(template)?;
            count += 1;
        }
        Ok(count)
    }

    /// Get a template by ID
    pub fn get(&self, id: &TemplateId) -> DocumentResult<&DocumentTemplate> {
        self.templates
            .get(id)
            .ok_or_else(|| DocumentError::TemplateNotFound(id.clone()))
    }

    /// All templates producing documents of a given kind
    pub fn get_by_type(&self, doc_type: DocumentType) -> Vec<&DocumentTemplate> {
        let mut found: Vec<_> = self
            .templates
            .values()
            .filter(|t| t.doc_type == doc_type)
            .collect();
        found.sort_by(|a, b| a.id.cmp(&b.id));
        found
    }

    /// List all templates, ordered by id
    pub fn list(&self) -> Vec<&DocumentTemplate> {
        let mut all: Vec<_> = self.templates.values().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        all
    }

    pub fn count(&self) -> usize {
        self.templates.len()
    }

    pub fn contains(&self, id: &TemplateId) -> bool {
        self.templates.contains_key(id)
    }

    /// Remove a template. Documents already created from it are unaffected.
    pub fn remove(&mut self, id: &TemplateId) -> DocumentResult<DocumentTemplate> {
        let template = self
            .templates
            .remove(id)
            .ok_or_else(|| DocumentError::TemplateNotFound(id.clone()))?;
        tracing::info!(template = %id, "Document template removed");
        Ok(template)
    }
}
