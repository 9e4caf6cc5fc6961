//! Document template commands

use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::{self, OutputFormat};
use clap::Subcommand;
use serde::Serialize;
use signflow_types::*;
use tabled::Tabled;

/// Template subcommands
#[derive(Subcommand)]
pub enum TemplatesCommands {
    /// List registered templates
    List,

    /// Show one template with its content
    Show {
        /// Template ID
        template_id: String,
    },
}

/// Table row for template display
#[derive(Debug, Serialize, Tabled)]
struct TemplateRow {
    id: String,
    name: String,
    #[tabled(rename = "type")]
    doc_type: String,
    signers: String,
}

impl From<&DocumentTemplate> for TemplateRow {
    fn from(template: &DocumentTemplate) -> Self {
        Self {
            id: template.id.to_string(),
            name: template.name.clone(),
            doc_type: template.doc_type.label().to_string(),
            signers: join_roles(&template.required_signatures),
        }
    }
}

pub(crate) fn join_roles(roles: &[SignerRole]) -> String {
    roles
        .iter()
        .map(|r| r.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Execute a template command
pub fn execute(command: TemplatesCommands, config: &CliConfig, format: OutputFormat) -> CliResult<()> {
    let registry = config.template_registry()?;

    match command {
        TemplatesCommands::List => {
            let rows: Vec<TemplateRow> = registry.list().into_iter().map(TemplateRow::from).collect();
            output::print_output(rows, format)
        }

        TemplatesCommands::Show { template_id } => {
            let template = registry.get(&TemplateId::new(template_id))?;
            match format {
                OutputFormat::Json => output::print_json(template),
                OutputFormat::Table => {
                    println!("ID:        {}", template.id);
                    println!("Name:      {}", template.name);
                    println!("Type:      {}", template.doc_type.label());
                    println!("Signers:   {}", join_roles(&template.required_signatures));
                    println!();
                    println!("{}", template.content);
                    Ok(())
                }
            }
        }
    }
}
