#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Core type definitions for modlink
//!
//! This crate holds the immutable build context a resolution pass runs
//! against and the records the pass produces for the external build tool.

pub mod context;
pub mod module;

// Re-export commonly used types
pub use context::{BuildContext, EnvironmentSnapshot, TargetPlatform};
pub use indexmap::IndexSet;
pub use module::{DependencySet, ModuleConfiguration, SdkLink, ThirdPartyLinkage};

use serde::{Deserialize, Serialize};

/// Precompiled header usage requested by a module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PchUsage {
    /// Let the host pick per its own defaults
    Default,
    /// Use the module's explicit PCH if declared, otherwise a shared one
    UseExplicitOrSharedPchs,
    /// Only ever use shared PCHs
    UseSharedPchs,
    /// Never use precompiled headers
    NoPchs,
}

impl Default for PchUsage {
    fn default() -> Self {
        Self::UseExplicitOrSharedPchs
    }
}

impl std::fmt::Display for PchUsage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Default => "default",
            Self::UseExplicitOrSharedPchs => "use_explicit_or_shared_pchs",
            Self::UseSharedPchs => "use_shared_pchs",
            Self::NoPchs => "no_pchs",
        };
        f.write_str(s)
    }
}

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Plain,
    Tty,
    Json,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Tty
    }
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    Always,
    Auto,
    Never,
}

impl clap::ValueEnum for ColorChoice {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Always, Self::Auto, Self::Never]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(match self {
            Self::Always => clap::builder::PossibleValue::new("always"),
            Self::Auto => clap::builder::PossibleValue::new("auto"),
            Self::Never => clap::builder::PossibleValue::new("never"),
        })
    }
}

impl Default for ColorChoice {
    fn default() -> Self {
        Self::Auto
    }
}
