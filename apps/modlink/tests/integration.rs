//! Integration tests for modlink CLI

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const RUNTIME_VAR: &str = "NDI_RUNTIME_DIR_V4";

/// Run modlink against an empty config file and a controlled environment
fn modlink(dir: &TempDir, runtime: Option<&Path>, args: &[&str]) -> Output {
    let config = dir.path().join("config.toml");
    fs::write(&config, "[general]\n").unwrap();

    let mut cmd = Command::new(env!("CARGO_BIN_EXE_modlink"));
    cmd.arg("--config")
        .arg(&config)
        .args(args)
        .env_remove(RUNTIME_VAR)
        .env_remove("MODLINK_OUTPUT")
        .env_remove("MODLINK_COLOR")
        .env_remove("MODLINK_MODULE")
        .env_remove("RUST_LOG");
    if let Some(runtime) = runtime {
        cmd.env(RUNTIME_VAR, runtime);
    }
    cmd.output().expect("Failed to execute modlink")
}

fn plugin_tree(dir: &TempDir, with_sdk: bool) -> std::path::PathBuf {
    let core = dir.path().join("Source").join("Core");
    fs::create_dir_all(core.join("Public")).unwrap();
    fs::create_dir_all(core.join("Private")).unwrap();
    if with_sdk {
        fs::create_dir_all(core.join("ThirdParty/NDI/Includes")).unwrap();
        let libs = core.join("ThirdParty/NDI/Libraries/Win64");
        fs::create_dir_all(&libs).unwrap();
        fs::write(libs.join("Processing.NDI.Lib.x64.lib"), b"").unwrap();
    }
    core
}

fn json(output: &Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

#[test]
fn test_cli_version() {
    let output = Command::new(env!("CARGO_BIN_EXE_modlink"))
        .arg("--version")
        .output()
        .expect("Failed to execute modlink");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("modlink"));
}

#[test]
fn test_cli_help() {
    let output = Command::new(env!("CARGO_BIN_EXE_modlink"))
        .arg("--help")
        .output()
        .expect("Failed to execute modlink");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("resolve"));
    assert!(stdout.contains("rules"));
    assert!(stdout.contains("probe"));
}

#[test]
fn test_cli_invalid_command() {
    let output = Command::new(env!("CARGO_BIN_EXE_modlink"))
        .arg("invalid-command")
        .output()
        .expect("Failed to execute modlink");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unrecognized subcommand"));
}

#[test]
fn test_resolve_with_sdk_present() {
    let dir = TempDir::new().unwrap();
    let core = plugin_tree(&dir, true);
    let runtime = dir.path().join("runtime");
    fs::create_dir_all(&runtime).unwrap();

    let root = core.to_str().unwrap();
    let output = modlink(&dir, Some(&runtime), &["--json", "resolve", "--module-root", root]);
    let value = json(&output);

    assert_eq!(value["module"], "NDIIO");
    assert_eq!(value["platform"], "win64");
    assert_eq!(value["sdk_available"], true);
    assert_eq!(value["feature_defines"], serde_json::json!(["NDI_SDK_ENABLED"]));
    assert_eq!(
        value["delay_loaded_libraries"],
        serde_json::json!(["Processing.NDI.Lib.x64.dll"])
    );
    assert_eq!(value["public_include_paths"].as_array().unwrap().len(), 2);
}

#[test]
fn test_resolve_without_runtime_variable() {
    let dir = TempDir::new().unwrap();
    let core = plugin_tree(&dir, true);

    let root = core.to_str().unwrap();
    let output = modlink(&dir, None, &["--json", "resolve", "--module-root", root, "--editor"]);
    let value = json(&output);

    assert_eq!(value["sdk_available"], false);
    assert_eq!(value["static_libraries"], serde_json::json!([]));
    assert_eq!(value["editor_dependency_modules"], serde_json::json!(["NDIIOEditor"]));
    assert_eq!(value["public_include_paths"].as_array().unwrap().len(), 1);
}

#[test]
fn test_probe_other_platform_skips_sdk() {
    let dir = TempDir::new().unwrap();
    let core = plugin_tree(&dir, true);

    let root = core.to_str().unwrap();
    let output = modlink(
        &dir,
        Some(dir.path()),
        &["--json", "probe", "--module-root", root, "--platform", "Linux"],
    );
    let value = json(&output);

    assert_eq!(value["platform"], "linux");
    assert_eq!(value["sdk"]["status"], "unsupported_platform");
    assert_eq!(value["sdk_gate_open"], false);
    assert_eq!(value["include_gates"].as_array().unwrap().len(), 2);
}

#[test]
fn test_rules_for_companion_module() {
    let dir = TempDir::new().unwrap();
    let output = modlink(&dir, None, &["--json", "rules", "--module", "NDIIOEditor"]);
    let value = json(&output);

    assert_eq!(value["name"], "NDIIOEditor");
    assert!(value["third_party"].is_null());
}

#[test]
fn test_unknown_module_fails_with_code() {
    let dir = TempDir::new().unwrap();
    let output = modlink(&dir, None, &["rules", "--module", "Missing"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Missing"));
    assert!(stderr.contains("Code: config."));
}
