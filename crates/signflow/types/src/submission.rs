//! Signature submission: the boundary shape of a "sign this document" action

use crate::{DocumentId, SignatureImage, SignerRole};
use serde::{Deserialize, Serialize};

/// A request to record one role's signature on a document
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureSubmission {
    pub document_id: DocumentId,
    pub role: SignerRole,
    pub signature_image_ref: SignatureImage,
}

impl SignatureSubmission {
    pub fn new(document_id: DocumentId, role: SignerRole, image: impl Into<String>) -> Self {
        Self {
            document_id,
            role,
            signature_image_ref: SignatureImage::new(image),
        }
    }
}
