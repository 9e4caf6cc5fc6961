//! Template seeding: one pending signature slot per required role
//!
//! Signer display names come from a [`SignerDirectory`]. When the directory
//! has no entry, a deterministic placeholder is used instead.

use signflow_types::{
    DocumentTemplate, InternshipId, SignatureId, SignatureRecord, SignerRole, StudentId,
};
use std::collections::HashMap;

/// Resolves who signs for a role on a given student's document
pub trait SignerDirectory: Send + Sync {
    fn resolve(
        &self,
        role: SignerRole,
        student_id: &StudentId,
        internship_id: Option<&InternshipId>,
    ) -> Option<String>;
}

/// Directory that knows nobody; every slot gets a placeholder name
#[derive(Clone, Copy, Debug, Default)]
pub struct PlaceholderDirectory;

impl SignerDirectory for PlaceholderDirectory {
    fn resolve(&self, _: SignerRole, _: &StudentId, _: Option<&InternshipId>) -> Option<String> {
        None
    }
}

/// Fixed role-to-name table with optional per-student overrides
#[derive(Clone, Debug, Default)]
pub struct StaticDirectory {
    by_role: HashMap<SignerRole, String>,
    by_student: HashMap<String, HashMap<SignerRole, String>>,
}

impl StaticDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_signer(mut self, role: SignerRole, name: impl Into<String>) -> Self {
        self.by_role.insert(role, name.into());
        self
    }

    /// Name a signer for one student only (e.g. that student's own name)
    pub fn with_student_signer(
        mut self,
        student_id: &StudentId,
        role: SignerRole,
        name: impl Into<String>,
    ) -> Self {
        self.by_student
            .entry(student_id.0.clone())
            .or_default()
            .insert(role, name.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.by_role.is_empty() && self.by_student.is_empty()
    }
}

impl SignerDirectory for StaticDirectory {
    fn resolve(
        &self,
        role: SignerRole,
        student_id: &StudentId,
        _internship_id: Option<&InternshipId>,
    ) -> Option<String> {
        self.by_student
            .get(&student_id.0)
            .and_then(|names| names.get(&role))
            .or_else(|| self.by_role.get(&role))
            .cloned()
    }
}

/// Display name used when no signer is known for a role
pub fn placeholder_name(role: SignerRole) -> String {
    format!("{} (pending assignment)", role.label())
}

/// Build the signature slots for a new document, in template order
pub fn seed_signatures(
    template: &DocumentTemplate,
    directory: &dyn SignerDirectory,
    student_id: &StudentId,
    internship_id: Option<&InternshipId>,
) -> Vec<SignatureRecord> {
    template
        .required_signatures
        .iter()
        .enumerate()
        .map(|(index, role)| {
            let name = directory
                .resolve(*role, student_id, internship_id)
                .unwrap_or_else(|| placeholder_name(*role));
            SignatureRecord::pending(SignatureId::for_slot(index, *role), *role, name)
        })
        .collect()
}
