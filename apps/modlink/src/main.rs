//! modlink - module dependency and conditional SDK linkage resolver
//!
//! Loads module rules, captures the build context from the command line and
//! the process environment, and runs one resolution pass per invocation.

mod cli;
mod display;
mod error;

use crate::cli::{Cli, Commands, GlobalArgs, TargetArgs};
use crate::display::{CommandOutput, OutputRenderer};
use crate::error::CliError;
use clap::Parser;
use modlink_config::Config;
use modlink_errors::ContextError;
use modlink_platform::HostFileSystem;
use modlink_resolver::ModuleResolver;
use modlink_types::{BuildContext, ColorChoice, EnvironmentSnapshot, OutputFormat};
use std::path::PathBuf;
use std::process;
use tracing::{debug, error, info, warn};

#[tokio::main]
async fn main() {
    // Parse command line arguments first to check for JSON mode
    let cli = Cli::parse();
    let json_mode = cli.global.json;

    init_tracing(json_mode, cli.global.debug);

    if let Err(e) = run(cli).await {
        error!("Application error: {}", e);
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Main application logic
async fn run(cli: Cli) -> Result<(), CliError> {
    info!("Starting modlink v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration with proper precedence:
    // 1. Start with file config (or defaults)
    let mut config = Config::load_or_default(cli.global.config.as_deref()).await?;

    // 2. Merge environment variables
    config.merge_env()?;

    // 3. Apply CLI flags (highest precedence)
    apply_cli_config(&mut config, &cli.global);

    let json_output = config.general.default_output == OutputFormat::Json;
    let renderer = OutputRenderer::new(json_output, config.general.color);

    let output = execute_command(cli.command, &config)?;
    renderer.render_result(&output)?;

    info!("Command completed successfully");
    Ok(())
}

/// Execute the specified command
fn execute_command(command: Commands, config: &Config) -> Result<CommandOutput, CliError> {
    match command {
        Commands::Resolve { target, editor } => {
            let (rules, ctx) = prepare(config, target, editor)?;
            let fs = HostFileSystem::new();
            let resolved = ModuleResolver::new(rules, &fs).resolve(&ctx);
            Ok(CommandOutput::Configuration(Box::new(resolved)))
        }

        Commands::Probe { target, editor } => {
            let (rules, ctx) = prepare(config, target, editor)?;
            let fs = HostFileSystem::new();
            let report = ModuleResolver::new(rules, &fs).probe(&ctx);
            Ok(CommandOutput::Probe(Box::new(report)))
        }

        Commands::Rules { module: Some(name) } => {
            let rules = config.module(&name)?;
            Ok(CommandOutput::Rules(Box::new(rules.clone())))
        }

        Commands::Rules { module: None } => Ok(CommandOutput::Config(Box::new(config.clone()))),
    }
}

/// Look up the module rules and build the context for one pass
fn prepare<'c>(
    config: &'c Config,
    target: TargetArgs,
    editor: bool,
) -> Result<(&'c modlink_config::ModuleRules, BuildContext), CliError> {
    let name = target
        .module
        .unwrap_or_else(|| config.general.default_module.clone());
    let rules = config.module(&name)?;

    let module_root = resolve_module_root(target.module_root)?;
    if !module_root.is_dir() {
        warn!(root = %module_root.display(), "module root is not a directory");
    }

    let environment = EnvironmentSnapshot::from_process();
    debug!(
        module = %name,
        vars = environment.len(),
        "captured build environment"
    );

    let ctx = BuildContext::new(target.platform, editor, module_root, environment);
    Ok((rules, ctx))
}

/// Absolute module root from the flag, or the current directory
fn resolve_module_root(flag: Option<PathBuf>) -> Result<PathBuf, ContextError> {
    let cwd = std::env::current_dir().map_err(|e| ContextError::ModuleRoot {
        message: e.to_string(),
    });
    match flag {
        Some(path) if path.is_absolute() => Ok(path),
        Some(path) => Ok(cwd?.join(path)),
        None => cwd,
    }
}

/// Apply CLI configuration overrides (highest precedence)
fn apply_cli_config(config: &mut Config, global: &GlobalArgs) {
    if let Some(color) = global.color {
        config.general.color = color;
    }
    if global.json {
        config.general.default_output = OutputFormat::Json;
    }
    if config.general.default_output == OutputFormat::Plain {
        config.general.color = ColorChoice::Never;
    }
}

/// Initialize tracing/logging
///
/// Logs go to stderr so stdout only carries command output.
fn init_tracing(json_mode: bool, debug_enabled_flag: bool) {
    let debug_enabled = std::env::var("RUST_LOG").is_ok() || debug_enabled_flag;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if debug_enabled {
            tracing_subscriber::EnvFilter::new(
                "info,modlink=debug,modlink_config=debug,modlink_resolver=debug,modlink_platform=debug",
            )
        } else {
            tracing_subscriber::EnvFilter::new("warn")
        }
    });

    if json_mode {
        if debug_enabled {
            tracing_subscriber::fmt()
                .json()
                .with_writer(std::io::stderr)
                .with_env_filter(filter)
                .init();
        } else {
            // JSON mode: keep stderr quiet unless debugging
            tracing_subscriber::fmt()
                .with_writer(std::io::sink)
                .with_env_filter("off")
                .init();
        }
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(filter)
            .init();
    }
}
