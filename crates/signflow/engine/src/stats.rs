//! Dashboard statistics over a set of documents

use serde::Serialize;
use signflow_types::{DocumentRecord, DocumentStatus, SignerRole};
use std::collections::BTreeMap;

/// Counts shown on the dashboard overview
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentStats {
    pub total: usize,
    pub draft: usize,
    pub pending_signature: usize,
    pub signed: usize,
    pub validated: usize,
    pub rejected: usize,
    /// Signature slots still waiting, across non-terminal documents
    pub pending_signatures: usize,
    /// Non-terminal documents waiting on each role
    pub awaiting_by_role: BTreeMap<SignerRole, usize>,
}

impl DocumentStats {
    pub fn from_documents(documents: &[DocumentRecord]) -> Self {
        let mut stats = Self {
            total: documents.len(),
            ..Self::default()
        };

        for document in documents {
            match document.status() {
                DocumentStatus::Draft => stats.draft += 1,
                DocumentStatus::PendingSignature => stats.pending_signature += 1,
                DocumentStatus::Signed => stats.signed += 1,
                DocumentStatus::Validated => stats.validated += 1,
                DocumentStatus::Rejected => stats.rejected += 1,
            }

            if document.is_terminal() {
                continue;
            }
            for role in document.pending_roles() {
                stats.pending_signatures += 1;
                *stats.awaiting_by_role.entry(role).or_default() += 1;
            }
        }
        stats
    }

    /// Count for one status
    pub fn count(&self, status: DocumentStatus) -> usize {
        match status {
            DocumentStatus::Draft => self.draft,
            DocumentStatus::PendingSignature => self.pending_signature,
            DocumentStatus::Signed => self.signed,
            DocumentStatus::Validated => self.validated,
            DocumentStatus::Rejected => self.rejected,
        }
    }

    /// Number of open documents waiting on `role`
    pub fn awaiting(&self, role: SignerRole) -> usize {
        self.awaiting_by_role.get(&role).copied().unwrap_or(0)
    }

    /// Share of documents that reached validation, as a percentage
    pub fn completion_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.validated as f64 / self.total as f64 * 100.0
    }
}
