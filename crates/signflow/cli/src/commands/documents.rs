//! Document lifecycle commands

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::{self, badge, print_success, print_warning, OutputFormat};
use clap::Subcommand;
use serde::Serialize;
use signflow_engine::DocumentFilter;
use signflow_types::*;
use tabled::Tabled;

/// Document subcommands
#[derive(Subcommand)]
pub enum DocumentsCommands {
    /// Create a document from a template
    Create {
        /// Template ID
        #[arg(long)]
        template: String,

        /// Student the document belongs to
        #[arg(long)]
        student: String,

        /// Internship the document belongs to
        #[arg(long)]
        internship: Option<String>,

        /// Document title
        #[arg(long)]
        title: String,

        /// Body text (defaults to the template content)
        #[arg(long)]
        content: Option<String>,
    },

    /// List documents
    List {
        /// Filter by student
        #[arg(long)]
        student: Option<String>,

        /// Filter by status
        #[arg(long)]
        status: Option<DocumentStatus>,

        /// Filter by document type
        #[arg(long = "type")]
        doc_type: Option<DocumentType>,

        /// Only documents waiting on this role's signature
        #[arg(long)]
        awaiting: Option<SignerRole>,

        /// Search titles
        #[arg(long)]
        search: Option<String>,
    },

    /// Show a document with its signatures and history
    Show {
        /// Document ID
        document_id: String,
    },

    /// Sign a document as one role
    Sign {
        /// Document ID
        document_id: String,

        /// Signing role
        #[arg(long)]
        role: SignerRole,

        /// Reference to the captured signature image
        #[arg(long)]
        image: String,
    },

    /// Refuse to sign; rejects the whole document
    Reject {
        /// Document ID
        document_id: String,

        /// Rejecting role
        #[arg(long)]
        role: SignerRole,

        /// Why the document was rejected
        #[arg(long)]
        reason: Option<String>,
    },

    /// Validate a fully signed document
    Validate {
        /// Document ID
        document_id: String,
    },

    /// Replace the body of an open document
    Edit {
        /// Document ID
        document_id: String,

        /// New body text
        #[arg(long)]
        content: String,
    },

    /// Delete a document
    Delete {
        /// Document ID
        document_id: String,
    },
}

/// Table row for document display
#[derive(Debug, Serialize, Tabled)]
struct DocumentRow {
    id: String,
    title: String,
    #[tabled(rename = "type")]
    doc_type: String,
    student: String,
    status: String,
    signed: String,
    modified: String,
}

impl From<DocumentRecord> for DocumentRow {
    fn from(doc: DocumentRecord) -> Self {
        Self {
            id: doc.id().to_string(),
            title: doc.title().to_string(),
            doc_type: doc.doc_type().label().to_string(),
            student: doc.student_id().to_string(),
            status: doc.status().label().to_string(),
            signed: format!("{}/{}", doc.signed_count(), doc.signatures().len()),
            modified: doc.last_modified().format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Table row for the signature slots of one document
#[derive(Debug, Serialize, Tabled)]
struct SignatureRow {
    role: String,
    signer: String,
    status: String,
    date: String,
    note: String,
}

impl From<&SignatureRecord> for SignatureRow {
    fn from(slot: &SignatureRecord) -> Self {
        Self {
            role: slot.signer_role().label().to_string(),
            signer: slot.signer_name().to_string(),
            status: slot.status().label().to_string(),
            date: slot
                .signed_date()
                .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
            note: slot.rejection_reason().unwrap_or_default().to_string(),
        }
    }
}

/// Execute a document command
pub fn execute(command: DocumentsCommands, config: &CliConfig, format: OutputFormat) -> CliResult<()> {
    let mut service = super::open_service(config)?;

    match command {
        DocumentsCommands::Create {
            template,
            student,
            internship,
            title,
            content,
        } => {
            let doc = service.create_document(
                &TemplateId::new(template),
                StudentId::new(student),
                internship.map(InternshipId::new),
                &title,
                content.as_deref(),
            )?;
            report(&doc, format, &format!("Created document {}", doc.id()))
        }

        DocumentsCommands::List {
            student,
            status,
            doc_type,
            awaiting,
            search,
        } => {
            let filter = DocumentFilter {
                student_id: student.map(StudentId::new),
                status,
                doc_type,
                awaiting,
                search,
                ..DocumentFilter::default()
            };
            let rows: Vec<DocumentRow> = service
                .list(&filter)?
                .into_iter()
                .map(DocumentRow::from)
                .collect();
            output::print_output(rows, format)
        }

        DocumentsCommands::Show { document_id } => {
            let doc = service.get(&parse_id(&document_id)?)?;
            match format {
                OutputFormat::Json => output::print_json(&doc),
                OutputFormat::Table => {
                    print_document(&doc);
                    Ok(())
                }
            }
        }

        DocumentsCommands::Sign {
            document_id,
            role,
            image,
        } => {
            let submission = SignatureSubmission::new(parse_id(&document_id)?, role, image);
            let doc = service.submit_signature(&submission)?;
            let message = format!(
                "{} signed {} ({})",
                role.label(),
                doc.id(),
                doc.status().label()
            );
            report(&doc, format, &message)
        }

        DocumentsCommands::Reject {
            document_id,
            role,
            reason,
        } => {
            let doc = service.reject_signature(&parse_id(&document_id)?, role, reason)?;
            if format == OutputFormat::Table {
                print_warning(&format!("{} rejected {}", role.label(), doc.id()));
                return Ok(());
            }
            output::print_json(&doc)
        }

        DocumentsCommands::Validate { document_id } => {
            let doc = service.validate(&parse_id(&document_id)?)?;
            report(&doc, format, &format!("Validated document {}", doc.id()))
        }

        DocumentsCommands::Edit {
            document_id,
            content,
        } => {
            let doc = service.update_content(&parse_id(&document_id)?, &content)?;
            report(&doc, format, &format!("Updated content of {}", doc.id()))
        }

        DocumentsCommands::Delete { document_id } => {
            let id = parse_id(&document_id)?;
            service.delete(&id)?;
            print_success(&format!("Deleted document {}", id));
            Ok(())
        }
    }
}

fn parse_id(raw: &str) -> CliResult<DocumentId> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(CliError::InvalidInput("document ID must not be empty".into()));
    }
    Ok(DocumentId::new(raw))
}

/// Success line in table mode, the updated record in JSON mode
fn report(doc: &DocumentRecord, format: OutputFormat, message: &str) -> CliResult<()> {
    match format {
        OutputFormat::Json => output::print_json(doc),
        OutputFormat::Table => {
            print_success(message);
            Ok(())
        }
    }
}

fn print_document(doc: &DocumentRecord) {
    let status = doc.status();
    println!("ID:          {}", doc.id());
    println!("Title:       {}", doc.title());
    println!("Type:        {}", doc.doc_type().label());
    println!("Template:    {}", doc.template_id());
    println!("Student:     {}", doc.student_id());
    if let Some(internship) = doc.internship_id() {
        println!("Internship:  {}", internship);
    }
    println!("Status:      {}", badge(status.label(), status.badge_color()));
    println!("Created:     {}", doc.created_date().format("%Y-%m-%d %H:%M"));
    println!("Modified:    {}", doc.last_modified().format("%Y-%m-%d %H:%M"));
    println!();
    println!("{}", doc.content());
    println!();

    let rows: Vec<SignatureRow> = doc.signatures().iter().map(SignatureRow::from).collect();
    println!("{}", tabled::Table::new(rows));

    println!();
    println!("History:");
    for entry in doc.history() {
        let actor = entry
            .actor
            .map(|role| format!(" [{}]", badge(role.as_str(), role.badge_color())))
            .unwrap_or_default();
        println!(
            "  {:>3}  {}  {}{}",
            entry.sequence,
            entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
            entry.description,
            actor
        );
    }
}
