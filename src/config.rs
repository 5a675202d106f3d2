//! Configuration management for typedef-check
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (typedef-check.toml)
//! - Environment variables (TYPEDEF_CHECK__*)
//!
//! ## Example config file (typedef-check.toml):
//! ```toml
//! [check]
//! directory = "./fixtures"
//! max_alias_depth = 64
//! fail_on_warning = false
//!
//! [output]
//! format = "text"
//! prefix = "[JTC]: "
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::validator::{ValidatorOptions, DEFAULT_MAX_ALIAS_DEPTH};

/// Main configuration for a checking run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckConfig {
    /// What to check and how strictly
    #[serde(default)]
    pub check: CheckSection,

    /// How results are printed
    #[serde(default)]
    pub output: OutputSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckSection {
    /// Root directory searched for `*.typedef.json` files
    #[serde(default = "default_directory")]
    pub directory: PathBuf,

    /// Consecutive alias dereferences allowed at one data location
    #[serde(default = "default_max_alias_depth")]
    pub max_alias_depth: usize,

    /// Treat unexpected fields as failures
    #[serde(default)]
    pub fail_on_warning: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSection {
    #[serde(default)]
    pub format: OutputFormat,

    /// Prefix for every console line in text mode
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

/// Output format for results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn default_directory() -> PathBuf {
    PathBuf::from(".")
}

fn default_max_alias_depth() -> usize {
    DEFAULT_MAX_ALIAS_DEPTH
}

fn default_prefix() -> String {
    "[JTC]: ".to_string()
}

impl Default for CheckSection {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            max_alias_depth: default_max_alias_depth(),
            fail_on_warning: false,
        }
    }
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            prefix: default_prefix(),
        }
    }
}

impl CheckConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, with `config_path` layered over the default locations
    pub fn load_from(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        for location in ["typedef-check.toml", ".typedef-check.toml"] {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        if let Some(dirs) = directories::ProjectDirs::from("dev", "jtc", "typedef-check") {
            let xdg_config = dirs.config_dir().join("typedef-check.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // TYPEDEF_CHECK__CHECK__MAX_ALIAS_DEPTH=16
        builder = builder.add_source(
            Environment::with_prefix("TYPEDEF_CHECK")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }

    pub fn validator_options(&self) -> ValidatorOptions {
        ValidatorOptions {
            max_alias_depth: self.check.max_alias_depth,
        }
    }
}
