//! Document templates: boilerplate plus the signer roles a document needs
//!
//! Templates are static reference data. They are only consulted when a
//! document is created, to seed its signature slots.

use crate::{DocumentError, DocumentResult, SignerRole};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;

/// Unique identifier for a document template
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(pub String);

impl TemplateId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TemplateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The closed set of document kinds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    InternshipAgreement,
    FinalReport,
    EvaluationForm,
    InternshipCertificate,
}

impl DocumentType {
    pub const ALL: [DocumentType; 4] = [
        DocumentType::InternshipAgreement,
        DocumentType::FinalReport,
        DocumentType::EvaluationForm,
        DocumentType::InternshipCertificate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InternshipAgreement => "internship_agreement",
            Self::FinalReport => "final_report",
            Self::EvaluationForm => "evaluation_form",
            Self::InternshipCertificate => "internship_certificate",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::InternshipAgreement => "Internship agreement",
            Self::FinalReport => "Final report",
            Self::EvaluationForm => "Evaluation form",
            Self::InternshipCertificate => "Internship certificate",
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| DocumentError::UnknownDocumentType(s.to_string()))
    }
}

/// A blueprint for documents of one kind
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentTemplate {
    pub id: TemplateId,
    pub name: String,
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    /// Boilerplate body copied into new documents
    #[serde(default)]
    pub content: String,
    /// Roles that must sign, in signing display order
    pub required_signatures: Vec<SignerRole>,
}

impl DocumentTemplate {
    pub fn new(id: impl Into<String>, name: impl Into<String>, doc_type: DocumentType) -> Self {
        Self {
            id: TemplateId::new(id),
            name: name.into(),
            doc_type,
            content: String::new(),
            required_signatures: Vec::new(),
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_required_signature(mut self, role: SignerRole) -> Self {
        self.required_signatures.push(role);
        self
    }

    pub fn with_required_signatures(mut self, roles: impl IntoIterator<Item = SignerRole>) -> Self {
        self.required_signatures.extend(roles);
        self
    }

    pub fn requires(&self, role: SignerRole) -> bool {
        self.required_signatures.contains(&role)
    }

    /// Check that the template can seed a well-formed document
    pub fn validate(&self) -> DocumentResult<()> {
        if self.id.0.trim().is_empty() {
            return Err(DocumentError::InvalidTemplate("template id is empty".into()));
        }
        if self.name.trim().is_empty() {
            return Err(DocumentError::InvalidTemplate(format!(
                "template '{}' has no name",
                self.id
            )));
        }
        if self.required_signatures.is_empty() {
            return Err(DocumentError::InvalidTemplate(format!(
                "template '{}' requires no signatures",
                self.id
            )));
        }

        let mut seen = HashSet::new();
        for role in &self.required_signatures {
            if !seen.insert(*role) {
                return Err(DocumentError::DuplicateSignerRole(*role));
            }
        }
        Ok(())
    }

    /// The standard internship office catalog
    pub fn builtin() -> Vec<DocumentTemplate> {
        vec![
            DocumentTemplate::new(
                "internship-agreement",
                "Internship agreement",
                DocumentType::InternshipAgreement,
            )
            .with_content(
                "This agreement sets out the terms of the internship between the student, \
                 the host company and the school.",
            )
            .with_required_signatures(SignerRole::ALL),
            DocumentTemplate::new("final-report", "Final report", DocumentType::FinalReport)
                .with_content("Summary of the work carried out during the internship.")
                .with_required_signatures([SignerRole::Student, SignerRole::Tutor]),
            DocumentTemplate::new(
                "evaluation-form",
                "Evaluation form",
                DocumentType::EvaluationForm,
            )
            .with_content("Assessment of the student's skills and conduct.")
            .with_required_signatures([SignerRole::Tutor, SignerRole::Supervisor]),
            DocumentTemplate::new(
                "internship-certificate",
                "Internship certificate",
                DocumentType::InternshipCertificate,
            )
            .with_content("Certifies that the student completed the internship.")
            .with_required_signatures([SignerRole::Supervisor, SignerRole::Admin]),
        ]
    }
}
