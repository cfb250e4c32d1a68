#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Configuration management for modlink
//!
//! This crate handles loading and merging configuration from:
//! - Default values (the built-in NDI I/O module rules)
//! - Configuration file (~/.config/modlink/config.toml)
//! - Environment variables
//! - CLI flags

pub mod constants;
pub mod rules;

pub use rules::{EditorRules, IncludeGroup, ModuleRules, ThirdPartyRules};

use modlink_errors::{ConfigError, Error};
use modlink_types::{ColorChoice, OutputFormat};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default = "default_modules")]
    pub modules: Vec<ModuleRules>,
}

/// General configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
    #[serde(default = "default_color_choice")]
    pub color: ColorChoice,
    /// Module resolved when the CLI is not told which one
    #[serde(default = "default_module")]
    pub default_module: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            modules: default_modules(),
        }
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: OutputFormat::Tty,
            color: ColorChoice::Auto,
            default_module: default_module(),
        }
    }
}

// Default value functions for serde
fn default_output_format() -> OutputFormat {
    OutputFormat::Tty
}

fn default_color_choice() -> ColorChoice {
    ColorChoice::Auto
}

fn default_module() -> String {
    constants::CORE_MODULE.to_string()
}

fn default_modules() -> Vec<ModuleRules> {
    vec![ModuleRules::ndiio(), ModuleRules::ndiio_editor()]
}

impl Config {
    /// Get the default config file path
    ///
    /// # Errors
    ///
    /// Returns an error if the system config directory cannot be determined.
    pub fn default_path() -> Result<PathBuf, Error> {
        let config_dir = dirs::config_dir().ok_or_else(|| ConfigError::NotFound {
            path: "config directory".to_string(),
        })?;
        Ok(config_dir.join(constants::CONFIG_FILE))
    }

    /// Parse and validate configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML for this schema or if
    /// the module rules fail validation.
    pub fn from_toml_str(contents: &str) -> Result<Self, Error> {
        let config: Self = toml::from_str(contents).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML
    /// syntax, or declares invalid module rules.
    pub async fn load_from_file(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound {
                    path: path.display().to_string(),
                }
                .into()
            } else {
                Error::io_with_path(&e, path)
            }
        })?;

        debug!(path = %path.display(), "loaded config file");
        Self::from_toml_str(&contents)
    }

    /// Load configuration with fallback to defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read
    /// or parsed.
    pub async fn load() -> Result<Self, Error> {
        let config_path = Self::default_path()?;

        if fs::try_exists(&config_path).await.unwrap_or(false) {
            Self::load_from_file(&config_path).await
        } else {
            debug!("no config file, using built-in module rules");
            Ok(Self::default())
        }
    }

    /// Load configuration from an optional path or use default
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed
    pub async fn load_or_default(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(config_path) => Self::load_from_file(config_path).await,
            None => Self::load().await,
        }
    }

    /// Merge with environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values or
    /// `MODLINK_MODULE` names a module the configuration does not declare.
    pub fn merge_env(&mut self) -> Result<(), Error> {
        // MODLINK_OUTPUT
        if let Ok(output) = std::env::var("MODLINK_OUTPUT") {
            self.general.default_output = match output.as_str() {
                "plain" => OutputFormat::Plain,
                "tty" => OutputFormat::Tty,
                "json" => OutputFormat::Json,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        field: "MODLINK_OUTPUT".to_string(),
                        value: output,
                    }
                    .into())
                }
            };
        }

        // MODLINK_COLOR
        if let Ok(color) = std::env::var("MODLINK_COLOR") {
            self.general.color = match color.as_str() {
                "always" => ColorChoice::Always,
                "auto" => ColorChoice::Auto,
                "never" => ColorChoice::Never,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        field: "MODLINK_COLOR".to_string(),
                        value: color,
                    }
                    .into())
                }
            };
        }

        // MODLINK_MODULE
        if let Ok(module) = std::env::var("MODLINK_MODULE") {
            if module.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "MODLINK_MODULE".to_string(),
                    value: module,
                }
                .into());
            }
            self.module(&module)?;
            self.general.default_module = module;
        }

        Ok(())
    }

    /// Check module rules for structural problems
    ///
    /// # Errors
    ///
    /// Returns an error on duplicate or empty module names, empty include
    /// gates, third-party rules missing their environment variable or
    /// feature define, or a default module that no rules declare.
    pub fn validate(&self) -> Result<(), Error> {
        let mut seen = HashSet::new();
        for module in &self.modules {
            if module.name.trim().is_empty() {
                return Err(ConfigError::Invalid {
                    message: "module name must not be empty".to_string(),
                }
                .into());
            }
            if !seen.insert(module.name.as_str()) {
                return Err(ConfigError::DuplicateModule {
                    name: module.name.clone(),
                }
                .into());
            }

            let groups = module
                .public_include_groups
                .iter()
                .chain(&module.private_include_groups);
            for group in groups {
                if group.when_exists.trim().is_empty() {
                    return Err(ConfigError::Invalid {
                        message: format!("{}: include group has an empty `when_exists`", module.name),
                    }
                    .into());
                }
            }

            if let Some(sdk) = &module.third_party {
                if sdk.runtime_env_var.trim().is_empty() {
                    return Err(ConfigError::InvalidValue {
                        field: format!("{}.third_party.runtime_env_var", module.name),
                        value: sdk.runtime_env_var.clone(),
                    }
                    .into());
                }
                if sdk.feature_define.trim().is_empty() {
                    return Err(ConfigError::InvalidValue {
                        field: format!("{}.third_party.feature_define", module.name),
                        value: sdk.feature_define.clone(),
                    }
                    .into());
                }
            }
        }

        if !seen.contains(self.general.default_module.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.default_module".to_string(),
                value: self.general.default_module.clone(),
            }
            .into());
        }
        Ok(())
    }

    /// Look up a module's rules by name
    ///
    /// # Errors
    ///
    /// Returns `UnknownModule` if no rules carry that name.
    pub fn module(&self, name: &str) -> Result<&ModuleRules, Error> {
        self.modules
            .iter()
            .find(|m| m.name == name)
            .ok_or_else(|| {
                ConfigError::UnknownModule {
                    name: name.to_string(),
                }
                .into()
            })
    }

    /// Render the effective configuration as TOML
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml_string(&self) -> Result<String, Error> {
        Ok(toml::to_string_pretty(self)?)
    }
}
