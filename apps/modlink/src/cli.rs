//! Command line interface definition

use clap::{Args, Parser, Subcommand};
use modlink_types::{ColorChoice, TargetPlatform};
use std::path::PathBuf;

/// modlink - module dependency and SDK linkage resolver
#[derive(Parser)]
#[command(name = "modlink")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Resolve module dependencies and optional NDI SDK linkage")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Global arguments available for all commands
#[derive(Parser)]
pub struct GlobalArgs {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging to stderr
    #[arg(long, global = true)]
    pub debug: bool,

    /// Color output control
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorChoice>,

    /// Use alternate config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Which module to look at, and where
#[derive(Args)]
pub struct TargetArgs {
    /// Target platform identifier (win64, linux, mac, ...)
    #[arg(long, default_value = "win64")]
    pub platform: TargetPlatform,

    /// Module source directory (defaults to the current directory)
    #[arg(long, value_name = "PATH")]
    pub module_root: Option<PathBuf>,

    /// Module name (defaults to general.default_module)
    #[arg(long)]
    pub module: Option<String>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a module's dependencies and SDK linkage
    #[command(alias = "r")]
    Resolve {
        #[command(flatten)]
        target: TargetArgs,

        /// Resolve for an editor build
        #[arg(long)]
        editor: bool,
    },

    /// Show effective module rules
    Rules {
        /// Only this module
        #[arg(long)]
        module: Option<String>,
    },

    /// Show every filesystem probe a resolution would make
    Probe {
        #[command(flatten)]
        target: TargetArgs,

        /// Include editor-only include groups
        #[arg(long)]
        editor: bool,
    },
}
