//! Output formatting utilities

use crate::error::CliResult;
use colored::*;
use serde::Serialize;
use signflow_types::BadgeColor;
use tabled::{Table, Tabled};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed table format
    Table,
    /// JSON format
    Json,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Table
    }
}

/// Print a vector of items in the specified format
pub fn print_output<T: Serialize + Tabled>(data: Vec<T>, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Table => {
            if data.is_empty() {
                println!("{}", "No results".dimmed());
            } else {
                println!("{}", Table::new(data));
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
    }
    Ok(())
}

/// Print a single item as JSON
pub fn print_json<T: Serialize>(data: &T) -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Colorize a label with its display badge color
pub fn badge(text: &str, color: BadgeColor) -> ColoredString {
    match color {
        BadgeColor::Gray => text.dimmed(),
        BadgeColor::Blue => text.blue(),
        BadgeColor::Green => text.green(),
        BadgeColor::Yellow => text.yellow(),
        BadgeColor::Purple => text.purple(),
        BadgeColor::Red => text.red(),
    }
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_default() {
        let format = OutputFormat::default();
        assert!(matches!(format, OutputFormat::Table));
    }

    #[test]
    fn test_badge_keeps_text() {
        colored::control::set_override(false);
        assert_eq!(badge("Signed", BadgeColor::Green).to_string(), "Signed");
        assert_eq!(badge("Draft", BadgeColor::Gray).to_string(), "Draft");
    }
}
