//! Signflow CLI - internship documents and their signatures
//!
//! This CLI gives the internship office, students and signers a terminal
//! interface to:
//! - Browse document templates
//! - Create documents for a student's internship
//! - Sign, reject and validate documents
//! - Follow progress on the dashboard counts

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod output;

use commands::{documents, stats, templates};
use config::CliConfig;
use error::CliResult;

/// Signflow CLI application
#[derive(Parser)]
#[command(name = "signflow")]
#[command(about = "Signflow - internship document signature workflow", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "SIGNFLOW_CONFIG")]
    config: Option<String>,

    /// Document store file
    #[arg(short, long, global = true, env = "SIGNFLOW_STORE")]
    store: Option<PathBuf>,

    /// Log level (overridden by RUST_LOG)
    #[arg(long, global = true, env = "SIGNFLOW_LOG_LEVEL")]
    log_level: Option<String>,

    /// Output format (table, json)
    #[arg(short, long, global = true, default_value = "table")]
    output: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Browse document templates
    Templates {
        #[command(subcommand)]
        command: templates::TemplatesCommands,
    },

    /// Manage documents and signatures
    #[command(alias = "doc")]
    Documents {
        #[command(subcommand)]
        command: documents::DocumentsCommands,
    },

    /// Dashboard counts
    Stats {
        /// Only count this student's documents
        #[arg(long)]
        student: Option<String>,
    },

    /// Show configuration
    Config,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        output::print_error(&e.to_string());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> CliResult<()> {
    let config = CliConfig::load(cli.config.as_deref())?.with_overrides(cli.store, cli.log_level);
    init_tracing(&config);

    match cli.command {
        Commands::Templates { command } => templates::execute(command, &config, cli.output),
        Commands::Documents { command } => documents::execute(command, &config, cli.output),
        Commands::Stats { student } => stats::execute(student, &config, cli.output),
        Commands::Config => match cli.output {
            output::OutputFormat::Json => output::print_json(&config),
            output::OutputFormat::Table => {
                println!("Store: {}", config.store_path.display());
                println!(
                    "Templates: {}{}",
                    if config.builtin_templates { "builtin" } else { "none" },
                    config
                        .templates_path
                        .as_ref()
                        .map(|p| format!(" + {}", p.display()))
                        .unwrap_or_default()
                );
                println!("Log level: {}", config.log_level);
                println!("Log format: {}", if config.log_json { "json" } else { "plain" });
                for (role, name) in &config.signers {
                    println!("Signer {}: {}", role, name);
                }
                Ok(())
            }
        },
    }
}

/// Logs go to stderr so stdout stays parseable in JSON mode
fn init_tracing(config: &CliConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if config.log_json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().without_time().with_writer(std::io::stderr))
            .init();
    }
}
