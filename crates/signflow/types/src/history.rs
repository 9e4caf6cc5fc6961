//! Document history: ordered audit trail of every document mutation

use crate::{DocumentStatus, SignerRole};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An entry in a document's history chain
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Monotonically increasing sequence number, starting at 0
    pub sequence: u64,
    /// What happened
    pub event: HistoryEvent,
    /// Human-readable description
    pub description: String,
    /// When it happened
    pub timestamp: DateTime<Utc>,
    /// The signer role that caused it (if any)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor: Option<SignerRole>,
}

impl HistoryEntry {
    pub fn new(
        sequence: u64,
        event: HistoryEvent,
        description: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            sequence,
            event,
            description: description.into(),
            timestamp,
            actor: None,
        }
    }

    pub fn with_actor(mut self, actor: SignerRole) -> Self {
        self.actor = Some(actor);
        self
    }
}

/// Kinds of document history events
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HistoryEvent {
    Created,
    SignatureSubmitted { role: SignerRole },
    SignatureRejected { role: SignerRole },
    StatusChanged { from: DocumentStatus, to: DocumentStatus },
    ContentUpdated,
}

impl HistoryEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::SignatureSubmitted { .. } => "signature_submitted",
            Self::SignatureRejected { .. } => "signature_rejected",
            Self::StatusChanged { .. } => "status_changed",
            Self::ContentUpdated => "content_updated",
        }
    }
}

impl std::fmt::Display for HistoryEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
