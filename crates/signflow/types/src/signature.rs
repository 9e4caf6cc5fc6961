//! Signature records: one signer's attestation state for one document

use crate::{BadgeColor, SignerRole};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a signature record, unique within its document
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignatureId(pub String);

impl SignatureId {
    /// Derive the identifier of the signature slot at `index` for `role`
    pub fn for_slot(index: usize, role: SignerRole) -> Self {
        Self(format!("sig-{}-{}", index + 1, role))
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for SignatureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque reference to an uploaded signature image
///
/// Upload and storage happen before the workflow sees the reference.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignatureImage(pub String);

impl SignatureImage {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Status of a single signature slot
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SignatureStatus {
    #[default]
    Pending,
    Signed,
    Rejected,
}

impl SignatureStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Signed => "signed",
            Self::Rejected => "rejected",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Signed => "Signed",
            Self::Rejected => "Rejected",
        }
    }

    pub fn badge_color(&self) -> BadgeColor {
        match self {
            Self::Pending => BadgeColor::Yellow,
            Self::Signed => BadgeColor::Green,
            Self::Rejected => BadgeColor::Red,
        }
    }
}

impl std::fmt::Display for SignatureStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One required signer's state on a document.
///
/// `signed_date` and `signature_image` are only ever set together, and only
/// while the status is [`SignatureStatus::Signed`]. Fields are private so
/// that invariant can only be changed through [`SignatureRecord::sign`] and
/// [`SignatureRecord::reject`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureRecord {
    id: SignatureId,
    signer_role: SignerRole,
    signer_name: String,
    status: SignatureStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    signed_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    signature_image: Option<SignatureImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rejection_reason: Option<String>,
}

impl SignatureRecord {
    /// Create a pending signature slot
    pub fn pending(id: SignatureId, signer_role: SignerRole, signer_name: impl Into<String>) -> Self {
        Self {
            id,
            signer_role,
            signer_name: signer_name.into(),
            status: SignatureStatus::Pending,
            signed_date: None,
            signature_image: None,
            rejection_reason: None,
        }
    }

    pub fn id(&self) -> &SignatureId {
        &self.id
    }

    pub fn signer_role(&self) -> SignerRole {
        self.signer_role
    }

    pub fn signer_name(&self) -> &str {
        &self.signer_name
    }

    pub fn status(&self) -> SignatureStatus {
        self.status
    }

    pub fn signed_date(&self) -> Option<DateTime<Utc>> {
        self.signed_date
    }

    pub fn signature_image(&self) -> Option<&SignatureImage> {
        self.signature_image.as_ref()
    }

    pub fn rejection_reason(&self) -> Option<&str> {
        self.rejection_reason.as_deref()
    }

    pub fn is_signed(&self) -> bool {
        self.status == SignatureStatus::Signed
    }

    pub fn is_pending(&self) -> bool {
        self.status == SignatureStatus::Pending
    }

    pub fn is_rejected(&self) -> bool {
        self.status == SignatureStatus::Rejected
    }

    /// Record the signature
    pub fn sign(&mut self, image: SignatureImage, at: DateTime<Utc>) {
        self.status = SignatureStatus::Signed;
        self.signed_date = Some(at);
        self.signature_image = Some(image);
        self.rejection_reason = None;
    }

    /// Record a refusal to sign
    pub fn reject(&mut self, reason: Option<String>) {
        self.status = SignatureStatus::Rejected;
        self.signed_date = None;
        self.signature_image = None;
        self.rejection_reason = reason;
    }

    /// Check the signed-date/image pairing against the status
    pub fn is_consistent(&self) -> bool {
        let attested = self.signed_date.is_some() && self.signature_image.is_some();
        let blank = self.signed_date.is_none() && self.signature_image.is_none();
        match self.status {
            SignatureStatus::Signed => attested && self.rejection_reason.is_none(),
            SignatureStatus::Pending => blank && self.rejection_reason.is_none(),
            SignatureStatus::Rejected => blank,
        }
    }
}
