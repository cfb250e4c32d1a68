//! Output rendering and formatting

use crate::error::CliError;
use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Color, ContentArrangement, Table};
use console::{Style, Term};
use modlink_config::{Config, ModuleRules};
use modlink_platform::ProbeResult;
use modlink_resolver::{GateCheck, ProbeReport, SdkEvaluation, SdkProbe};
use modlink_types::{ColorChoice, ModuleConfiguration};
use std::fmt::Display;
use std::io;
use std::path::PathBuf;

/// Result of a CLI command, ready for rendering
pub enum CommandOutput {
    Configuration(Box<ModuleConfiguration>),
    Probe(Box<ProbeReport>),
    Rules(Box<ModuleRules>),
    Config(Box<Config>),
}

/// Output renderer for CLI results
#[derive(Clone)]
pub struct OutputRenderer {
    /// Use JSON output format
    json_output: bool,
    /// Color configuration
    color_choice: ColorChoice,
    /// Terminal instance
    term: Term,
}

impl OutputRenderer {
    /// Create new output renderer
    pub fn new(json_output: bool, color_choice: ColorChoice) -> Self {
        Self {
            json_output,
            color_choice,
            term: Term::stdout(),
        }
    }

    /// Render command output
    pub fn render_result(&self, output: &CommandOutput) -> Result<(), CliError> {
        if self.json_output {
            self.render_json(output)
        } else {
            self.render_text(output)
        }
    }

    /// Render as pretty JSON
    fn render_json(&self, output: &CommandOutput) -> Result<(), CliError> {
        let json = match output {
            CommandOutput::Configuration(config) => serde_json::to_string_pretty(config),
            CommandOutput::Probe(report) => serde_json::to_string_pretty(report),
            CommandOutput::Rules(rules) => serde_json::to_string_pretty(rules),
            CommandOutput::Config(config) => serde_json::to_string_pretty(config),
        }
        .map_err(modlink_errors::Error::from)?;
        println!("{json}");
        Ok(())
    }

    fn render_text(&self, output: &CommandOutput) -> Result<(), CliError> {
        match output {
            CommandOutput::Configuration(config) => self.render_configuration(config)?,
            CommandOutput::Probe(report) => self.render_probe_report(report)?,
            CommandOutput::Rules(rules) => print!("{}", rules.to_toml_string()?),
            CommandOutput::Config(config) => print!("{}", config.to_toml_string()?),
        }
        Ok(())
    }

    /// Render a resolved module configuration
    fn render_configuration(&self, config: &ModuleConfiguration) -> io::Result<()> {
        let build = if config.editor_build { "editor" } else { "game" };
        println!(
            "{} ({}, {build})",
            self.style_bold(&config.module),
            config.platform
        );
        println!();

        let mut table = self.new_table();
        table.set_header(vec![
            Cell::new("Setting").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        let rows = [
            ("IWYU", enforced(config.enforce_iwyu)),
            ("PCH usage", config.pch_usage.to_string()),
            ("Public include paths", paths(&config.public_include_paths)),
            ("Private include paths", paths(&config.private_include_paths)),
            ("Public modules", lines(&config.public_dependency_modules)),
            ("Private modules", lines(&config.private_dependency_modules)),
            (
                "Private include path modules",
                lines(&config.private_include_path_modules),
            ),
            ("Editor modules", lines(&config.editor_dependency_modules)),
            ("Static libraries", paths(&config.static_libraries)),
            ("Delay-loaded libraries", lines(&config.delay_loaded_libraries)),
            ("Runtime search paths", paths(&config.runtime_search_paths)),
            ("Feature defines", lines(&config.feature_defines)),
        ];
        for (name, value) in rows {
            table.add_row(vec![Cell::new(name), Cell::new(value)]);
        }
        println!("{table}");
        println!();

        if config.sdk_available {
            println!("SDK: {}", self.status_text("linked", true));
        } else {
            println!("SDK: {}", self.status_text("not linked", false));
        }
        Ok(())
    }

    /// Render include gates and SDK probes
    fn render_probe_report(&self, report: &ProbeReport) -> io::Result<()> {
        println!(
            "{} ({}) at {}",
            self.style_bold(&report.module),
            report.platform,
            report.module_root.display()
        );
        println!();

        let mut table = self.new_table();
        table.set_header(vec![
            Cell::new("Probe").add_attribute(Attribute::Bold),
            Cell::new("Path").add_attribute(Attribute::Bold),
            Cell::new("Result").add_attribute(Attribute::Bold),
            Cell::new("Gates link").add_attribute(Attribute::Bold),
        ]);
        for gate in &report.include_gates {
            table.add_row(self.probe_row("include gate", gate, None));
        }
        if let SdkEvaluation::Probed { checks, .. } = &report.sdk {
            for check in checks {
                table.add_row(self.check_row(check));
            }
        }
        println!("{table}");
        println!();

        match &report.sdk {
            SdkEvaluation::NotConfigured => println!("SDK: not configured for this module"),
            SdkEvaluation::UnsupportedPlatform { platform } => {
                println!("SDK: skipped, not supported on {platform}");
            }
            SdkEvaluation::RuntimeUnset { env_var } => {
                println!("SDK: skipped, {env_var} is not set");
            }
            SdkEvaluation::RuntimeNotAbsolute { env_var, value } => {
                println!("SDK: skipped, {env_var}={value} is not an absolute path");
            }
            SdkEvaluation::Probed { sdk_root, .. } => {
                let status = if report.sdk_gate_open {
                    self.status_text("open", true)
                } else {
                    self.status_text("closed", false)
                };
                println!("SDK gate at {}: {status}", sdk_root.display());
            }
        }
        Ok(())
    }

    fn check_row(&self, check: &GateCheck) -> Vec<Cell> {
        let name = match check.probe {
            SdkProbe::Includes => "sdk includes",
            SdkProbe::LibraryDir => "sdk library dir",
            SdkProbe::RuntimeRoot => "sdk runtime",
            SdkProbe::LibraryFile => "sdk library file",
        };
        self.probe_row(name, &check.result, Some(check.gates_link))
    }

    fn probe_row(&self, name: &str, result: &ProbeResult, gates: Option<bool>) -> Vec<Cell> {
        let found = if result.exists { "found" } else { "missing" };
        let mut status = Cell::new(found);
        if self.supports_color() {
            status = status.fg(if result.exists { Color::Green } else { Color::Yellow });
        }
        let gates = match gates {
            Some(true) => "yes",
            Some(false) => "no",
            None => "-",
        };
        vec![
            Cell::new(name),
            Cell::new(result.path.display()),
            status,
            Cell::new(gates),
        ]
    }

    fn new_table(&self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);
        if !self.supports_color() {
            table.force_no_tty();
        }
        table
    }

    fn status_text(&self, text: &str, good: bool) -> String {
        if self.supports_color() {
            let style = if good {
                Style::new().green().bold()
            } else {
                Style::new().yellow()
            };
            style.apply_to(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn style_bold(&self, name: &str) -> String {
        if self.supports_color() {
            Style::new().bold().apply_to(name).to_string()
        } else {
            name.to_string()
        }
    }

    /// Check if color output is supported
    fn supports_color(&self) -> bool {
        match self.color_choice {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => self.term.features().colors_supported(),
        }
    }
}

fn enforced(flag: bool) -> String {
    let text = if flag { "enforced" } else { "off" };
    text.to_string()
}

fn lines<T: Display>(items: impl IntoIterator<Item = T>) -> String {
    let joined = items
        .into_iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join("\n");
    if joined.is_empty() {
        "-".to_string()
    } else {
        joined
    }
}

fn paths(items: &[PathBuf]) -> String {
    lines(items.iter().map(|p| p.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_lists_render_as_dash() {
        assert_eq!(lines(Vec::<String>::new()), "-");
        assert_eq!(paths(&[]), "-");
        assert_eq!(lines(["Core", "Engine"]), "Core\nEngine");
    }
}
