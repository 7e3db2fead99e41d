//! Configuration types for the citemint host.

use std::path::{Path, PathBuf};

use citemint_sources::CitationConfig;
use serde::{Deserialize, Serialize};

use crate::error::{CiteMintError, Result};
use crate::research::ResearchStyle;

/// Top-level configuration, loaded from TOML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CiteMintConfig {
    /// Authority domains, freshness window and snippet limits.
    pub citations: CitationConfig,
    /// Defaults applied to research requests.
    pub research: ResearchConfig,
    /// Where exported reports are written.
    pub export: ExportConfig,
}

/// Defaults for research requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResearchConfig {
    /// Answer style used when the caller does not pick one.
    pub default_style: ResearchStyle,
    /// Ask the capability to avoid medical, financial and legal advice.
    pub safe_mode: bool,
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            default_style: ResearchStyle::Explainer,
            safe_mode: true,
        }
    }
}

/// Export settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory for saved JSON and Markdown reports.
    pub directory: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("exports"),
        }
    }
}

impl CiteMintConfig {
    /// Load configuration from a TOML file and validate it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML, or
    /// holds invalid citation settings.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self =
            toml::from_str(&content).map_err(|e| CiteMintError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| CiteMintError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate every section.
    ///
    /// # Errors
    ///
    /// Returns [`CiteMintError::Config`] describing the first invalid field.
    pub fn validate(&self) -> Result<()> {
        self.citations
            .validate()
            .map_err(|e| CiteMintError::Config(e.to_string()))?;
        if self.export.directory.as_os_str().is_empty() {
            return Err(CiteMintError::Config(
                "export directory must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Returns the default config file path: `~/.config/citemint/config.toml`.
    pub fn default_config_path() -> PathBuf {
        if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(config).join("citemint").join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("citemint")
                .join("config.toml")
        } else {
            PathBuf::from("/tmp/citemint-config/config.toml")
        }
    }
}
