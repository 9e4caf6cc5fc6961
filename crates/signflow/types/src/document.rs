//! Document records: templated artifacts tracked through the signature workflow
//!
//! A DocumentRecord carries its own lifecycle status plus one signature
//! slot per role its template requires. The slot set is fixed at creation;
//! only slot states, the document status and the content change afterwards.

use crate::{
    BadgeColor, DocumentError, DocumentResult, DocumentTemplate, DocumentType, HistoryEntry, HistoryEvent,
    SignatureRecord, SignerRole, TemplateId,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;

// ── Identifiers ──────────────────────────────────────────────────────

/// Unique identifier for a document
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(pub String);

impl DocumentId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn short(&self) -> &str {
        self.0.get(..8).unwrap_or(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reference to a student, owned by the surrounding application
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(pub String);

impl StudentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for StudentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reference to an internship, owned by the surrounding application
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InternshipId(pub String);

impl InternshipId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for InternshipId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── Document Status ──────────────────────────────────────────────────

/// The lifecycle state of a document
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    /// Created, no signature recorded yet
    #[default]
    Draft,
    /// At least one signature recorded, others outstanding
    PendingSignature,
    /// Every required signature recorded
    Signed,
    /// Accepted by the internship office
    Validated,
    /// Refused by one of the required signers
    Rejected,
}

impl DocumentStatus {
    pub const ALL: [DocumentStatus; 5] = [
        DocumentStatus::Draft,
        DocumentStatus::PendingSignature,
        DocumentStatus::Signed,
        DocumentStatus::Validated,
        DocumentStatus::Rejected,
    ];

    /// Check if this is a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Validated | Self::Rejected)
    }

    /// Position along `draft -> pending_signature -> signed -> validated`.
    /// `Rejected` sits outside that chain.
    pub fn progress_rank(&self) -> Option<u8> {
        match self {
            Self::Draft => Some(0),
            Self::PendingSignature => Some(1),
            Self::Signed => Some(2),
            Self::Validated => Some(3),
            Self::Rejected => None,
        }
    }

    /// Whether the state machine has an edge from `self` to `next`
    pub fn can_transition_to(&self, next: DocumentStatus) -> bool {
        use DocumentStatus::*;
        matches!(
            (self, next),
            (Draft, PendingSignature)
                | (Draft, Signed)
                | (Draft, Rejected)
                | (PendingSignature, Signed)
                | (PendingSignature, Rejected)
                | (Signed, Validated)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::PendingSignature => "pending_signature",
            Self::Signed => "signed",
            Self::Validated => "validated",
            Self::Rejected => "rejected",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::PendingSignature => "Pending signature",
            Self::Signed => "Signed",
            Self::Validated => "Validated",
            Self::Rejected => "Rejected",
        }
    }

    pub fn badge_color(&self) -> BadgeColor {
        match self {
            Self::Draft => BadgeColor::Gray,
            Self::PendingSignature => BadgeColor::Yellow,
            Self::Signed => BadgeColor::Blue,
            Self::Validated => BadgeColor::Green,
            Self::Rejected => BadgeColor::Red,
        }
    }
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentStatus {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == wanted)
            .ok_or_else(|| DocumentError::UnknownStatus(s.to_string()))
    }
}

// ── Document Record ──────────────────────────────────────────────────

/// A document moving through the signature workflow
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    id: DocumentId,
    title: String,
    template_id: TemplateId,
    #[serde(rename = "type")]
    doc_type: DocumentType,
    student_id: StudentId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    internship_id: Option<InternshipId>,
    content: String,
    status: DocumentStatus,
    signatures: Vec<SignatureRecord>,
    created_date: DateTime<Utc>,
    last_modified: DateTime<Utc>,
    #[serde(default)]
    history: Vec<HistoryEntry>,
}

impl DocumentRecord {
    /// Create a draft document from a template and its seeded signature slots
    pub fn new(
        template: &DocumentTemplate,
        student_id: StudentId,
        title: impl Into<String>,
        content: impl Into<String>,
        signatures: Vec<SignatureRecord>,
        at: DateTime<Utc>,
    ) -> Self {
        let mut record = Self {
            id: DocumentId::generate(),
            title: title.into(),
            template_id: template.id.clone(),
            doc_type: template.doc_type,
            student_id,
            internship_id: None,
            content: content.into(),
            status: DocumentStatus::Draft,
            signatures,
            created_date: at,
            last_modified: at,
            history: Vec::new(),
        };
        record.record_history(
            HistoryEvent::Created,
            format!("Created from template '{}'", template.id),
            None,
            at,
        );
        record
    }

    pub fn with_internship(mut self, internship_id: InternshipId) -> Self {
        self.internship_id = Some(internship_id);
        self
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn id(&self) -> &DocumentId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn template_id(&self) -> &TemplateId {
        &self.template_id
    }

    pub fn doc_type(&self) -> DocumentType {
        self.doc_type
    }

    pub fn student_id(&self) -> &StudentId {
        &self.student_id
    }

    pub fn internship_id(&self) -> Option<&InternshipId> {
        self.internship_id.as_ref()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn status(&self) -> DocumentStatus {
        self.status
    }

    pub fn signatures(&self) -> &[SignatureRecord] {
        &self.signatures
    }

    pub fn created_date(&self) -> DateTime<Utc> {
        self.created_date
    }

    pub fn last_modified(&self) -> DateTime<Utc> {
        self.last_modified
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    // ── Query methods ────────────────────────────────────────────────

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// The signature slot for a role
    pub fn signature(&self, role: SignerRole) -> Option<&SignatureRecord> {
        self.signatures.iter().find(|s| s.signer_role() == role)
    }

    /// Roles in template order
    pub fn required_roles(&self) -> Vec<SignerRole> {
        self.signatures.iter().map(|s| s.signer_role()).collect()
    }

    /// Roles whose signature is still outstanding
    pub fn pending_roles(&self) -> Vec<SignerRole> {
        self.signatures
            .iter()
            .filter(|s| s.is_pending())
            .map(|s| s.signer_role())
            .collect()
    }

    pub fn signed_count(&self) -> usize {
        self.signatures.iter().filter(|s| s.is_signed()).count()
    }

    pub fn all_signed(&self) -> bool {
        !self.signatures.is_empty() && self.signatures.iter().all(|s| s.is_signed())
    }

    /// Check a record loaded from outside the engine: one slot per role,
    /// consistent slots, a status that matches the slots, and a gapless
    /// history chain.
    pub fn check_invariants(&self) -> DocumentResult<()> {
        let fail = |reason: String| DocumentError::InconsistentRecord {
            document: self.id.clone(),
            reason,
        };

        if self.signatures.is_empty() {
            return Err(fail("no signature slots".into()));
        }
        let mut seen = HashSet::new();
        for slot in &self.signatures {
            if !seen.insert(slot.signer_role()) {
                return Err(fail(format!("signer role '{}' appears more than once", slot.signer_role())));
            }
            if !slot.is_consistent() {
                return Err(fail(format!(
                    "{} slot is {} but its date and image disagree",
                    slot.signer_role(),
                    slot.status()
                )));
            }
        }

        let signed = self.signed_count();
        let rejected = self.signatures.iter().any(|s| s.is_rejected());
        let all_signed = signed == self.signatures.len();
        let status_matches = match self.status {
            DocumentStatus::Draft => signed == 0 && !rejected,
            DocumentStatus::PendingSignature => signed > 0 && !all_signed && !rejected,
            DocumentStatus::Signed | DocumentStatus::Validated => all_signed,
            DocumentStatus::Rejected => rejected,
        };
        if !status_matches {
            return Err(fail(format!(
                "status {} does not match {}/{} signed slots{}",
                self.status,
                signed,
                self.signatures.len(),
                if rejected { " with a rejection" } else { "" }
            )));
        }

        for (i, entry) in self.history.iter().enumerate() {
            if entry.sequence != i as u64 {
                return Err(fail(format!(
                    "history entry {} has sequence {}",
                    i, entry.sequence
                )));
            }
        }
        Ok(())
    }

    // ── Mutation ─────────────────────────────────────────────────────
    //
    // These do not enforce the state machine; transitions are decided by
    // the workflow engine, which calls into them on a cloned record.

    /// Mutable access to the slot for a role. Slots can change state but
    /// can never be added or removed.
    pub fn signature_mut(&mut self, role: SignerRole) -> Option<&mut SignatureRecord> {
        self.signatures.iter_mut().find(|s| s.signer_role() == role)
    }

    /// Move to a new status, recording the change in the history chain
    pub fn set_status(&mut self, status: DocumentStatus, at: DateTime<Utc>) {
        if self.status == status {
            return;
        }
        let from = self.status;
        self.status = status;
        self.record_history(
            HistoryEvent::StatusChanged { from, to: status },
            format!("Status changed: {} -> {}", from, status),
            None,
            at,
        );
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    pub fn touch(&mut self, at: DateTime<Utc>) {
        self.last_modified = at;
    }

    /// Append to the history chain
    pub fn record_history(
        &mut self,
        event: HistoryEvent,
        description: impl Into<String>,
        actor: Option<SignerRole>,
        at: DateTime<Utc>,
    ) {
        let mut entry = HistoryEntry::new(self.history.len() as u64, event, description, at);
        if let Some(actor) = actor {
            entry = entry.with_actor(actor);
        }
        self.history.push(entry);
    }
}
