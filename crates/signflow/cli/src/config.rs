//! CLI configuration

use crate::error::{CliError, CliResult};
use serde::{Deserialize, Serialize};
use signflow_engine::{StaticDirectory, TemplateRegistry};
use signflow_types::{DocumentTemplate, SignerRole};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// JSON file holding all document records
    pub store_path: PathBuf,

    /// Extra templates (JSON array) registered on top of the builtin catalog
    pub templates_path: Option<PathBuf>,

    /// Register the builtin internship templates
    pub builtin_templates: bool,

    /// Log level when `RUST_LOG` is unset
    pub log_level: String,

    /// Emit logs as JSON lines
    pub log_json: bool,

    /// Signer names by role, used when seeding new documents
    pub signers: BTreeMap<String, String>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from("signflow-documents.json"),
            templates_path: None,
            builtin_templates: true,
            log_level: "info".into(),
            log_json: false,
            signers: BTreeMap::new(),
        }
    }
}

impl CliConfig {
    /// Load configuration from file
    pub fn load(path: Option<&str>) -> CliResult<Self> {
        let config_path = match path {
            Some(p) => PathBuf::from(p),
            None => Self::default_config_path()?,
        };

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            let config: CliConfig =
                toml::from_str(&contents).map_err(|e| CliError::Config(e.to_string()))?;
            Ok(config)
        } else {
            Ok(CliConfig::default())
        }
    }

    /// Apply command-line and environment overrides
    pub fn with_overrides(mut self, store: Option<PathBuf>, log_level: Option<String>) -> Self {
        if let Some(store) = store {
            self.store_path = store;
        }
        if let Some(level) = log_level {
            self.log_level = level;
        }
        self
    }

    /// Build the signer directory from the `signers` table
    pub fn signer_directory(&self) -> CliResult<StaticDirectory> {
        let mut directory = StaticDirectory::new();
        for (role, name) in &self.signers {
            let role: SignerRole = role
                .parse()
                .map_err(|_| CliError::Config(format!("unknown signer role '{}' in [signers]", role)))?;
            directory = directory.with_signer(role, name.clone());
        }
        Ok(directory)
    }

    /// Build the template registry: builtin catalog plus the optional file
    pub fn template_registry(&self) -> CliResult<TemplateRegistry> {
        let mut registry = if self.builtin_templates {
            TemplateRegistry::with_builtin_templates()
        } else {
            TemplateRegistry::new()
        };
        if let Some(path) = &self.templates_path {
            let templates = load_templates(path)?;
            let count = registry.register_all(templates)?;
            tracing::debug!(path = %path.display(), count, "Loaded extra templates");
        }
        Ok(registry)
    }

    /// Get the default configuration file path
    fn default_config_path() -> CliResult<PathBuf> {
        let config_dir =
            dirs::config_dir().ok_or_else(|| CliError::Config("Cannot find config directory".into()))?;
        Ok(config_dir.join("signflow").join("config.toml"))
    }
}

fn load_templates(path: &Path) -> CliResult<Vec<DocumentTemplate>> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}
