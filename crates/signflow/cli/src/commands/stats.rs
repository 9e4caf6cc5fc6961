//! Dashboard statistics command

use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::{self, OutputFormat};
use serde::Serialize;
use signflow_engine::DocumentFilter;
use signflow_types::*;
use tabled::Tabled;

/// Table row for per-status counts
#[derive(Debug, Serialize, Tabled)]
struct StatusRow {
    status: String,
    documents: usize,
}

/// Print dashboard counts, optionally for one student
pub fn execute(student: Option<String>, config: &CliConfig, format: OutputFormat) -> CliResult<()> {
    let service = super::open_service(config)?;
    let filter = match student {
        Some(student) => DocumentFilter::for_student(StudentId::new(student)),
        None => DocumentFilter::all(),
    };
    let stats = service.stats(&filter)?;

    if format == OutputFormat::Json {
        return output::print_json(&stats);
    }

    let rows: Vec<StatusRow> = DocumentStatus::ALL
        .iter()
        .map(|status| StatusRow {
            status: status.label().to_string(),
            documents: stats.count(*status),
        })
        .collect();
    output::print_output(rows, format)?;

    println!("Total documents:     {}", stats.total);
    println!("Pending signatures:  {}", stats.pending_signatures);
    for role in SignerRole::ALL {
        println!("  awaiting {:<11} {}", role.as_str(), stats.awaiting(role));
    }
    println!("Completion rate:     {:.1}%", stats.completion_rate());
    Ok(())
}
