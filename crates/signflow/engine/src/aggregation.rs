//! Status aggregation: derive a document's status from its signature slots
//!
//! Applied after every signature mutation. The rule only ever moves a
//! document forward along `draft -> pending_signature -> signed`, or into
//! `rejected`; it never regresses and never touches terminal documents.

use signflow_types::{DocumentStatus, SignatureRecord};

/// Compute the status a document should have given its current status and
/// the state of its signature slots.
pub fn aggregate_status(current: DocumentStatus, signatures: &[SignatureRecord]) -> DocumentStatus {
    if current.is_terminal() {
        return current;
    }

    if signatures.iter().any(|s| s.is_rejected()) {
        return DocumentStatus::Rejected;
    }

    if !signatures.is_empty() && signatures.iter().all(|s| s.is_signed()) {
        return DocumentStatus::Signed;
    }

    if current == DocumentStatus::Draft && signatures.iter().any(|s| s.is_signed()) {
        return DocumentStatus::PendingSignature;
    }

    current
}
