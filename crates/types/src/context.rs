//! Build context for a single resolution pass

use modlink_errors::ContextError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Target platform of a build request
///
/// Only `Win64` carries the optional SDK; every other identifier is kept
/// verbatim (lower-cased) so it can be reported back.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum TargetPlatform {
    Win64,
    Other(String),
}

impl TargetPlatform {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Win64 => "win64",
            Self::Other(name) => name,
        }
    }

    #[must_use]
    pub fn is_win64(&self) -> bool {
        matches!(self, Self::Win64)
    }
}

impl std::fmt::Display for TargetPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetPlatform {
    type Err = ContextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        match name.as_str() {
            "" => Err(ContextError::InvalidPlatform {
                value: s.to_string(),
            }),
            "win64" => Ok(Self::Win64),
            _ => Ok(Self::Other(name)),
        }
    }
}

impl From<TargetPlatform> for String {
    fn from(platform: TargetPlatform) -> Self {
        platform.as_str().to_string()
    }
}

impl TryFrom<String> for TargetPlatform {
    type Error = ContextError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Environment captured once at the start of a pass
///
/// Lookups never consult the live process environment, so a pass sees a
/// consistent view and tests can supply their own variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentSnapshot {
    vars: BTreeMap<String, String>,
}

impl EnvironmentSnapshot {
    /// Empty snapshot
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the current process environment
    ///
    /// Variables whose name or value is not valid UTF-8 are skipped.
    #[must_use]
    pub fn from_process() -> Self {
        std::env::vars_os()
            .filter_map(|(key, value): (OsString, OsString)| {
                Some((key.into_string().ok()?, value.into_string().ok()?))
            })
            .collect()
    }

    /// Look up a variable, treating an empty value as unset
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for EnvironmentSnapshot
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Immutable description of one build request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildContext {
    platform: TargetPlatform,
    editor_build: bool,
    module_root: PathBuf,
    environment: EnvironmentSnapshot,
}

impl BuildContext {
    #[must_use]
    pub fn new(
        platform: TargetPlatform,
        editor_build: bool,
        module_root: impl Into<PathBuf>,
        environment: EnvironmentSnapshot,
    ) -> Self {
        Self {
            platform,
            editor_build,
            module_root: module_root.into(),
            environment,
        }
    }

    #[must_use]
    pub fn platform(&self) -> &TargetPlatform {
        &self.platform
    }

    #[must_use]
    pub fn is_editor_build(&self) -> bool {
        self.editor_build
    }

    #[must_use]
    pub fn module_root(&self) -> &Path {
        &self.module_root
    }

    /// Look up an environment variable; absent if unset or empty
    #[must_use]
    pub fn env_var(&self, name: &str) -> Option<&str> {
        self.environment.get(name)
    }

    /// Same request retargeted at another module directory
    ///
    /// Used when a companion module is resolved next to the primary one.
    #[must_use]
    pub fn for_module_root(&self, module_root: impl Into<PathBuf>) -> Self {
        Self {
            module_root: module_root.into(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_parsing() {
        assert_eq!("Win64".parse::<TargetPlatform>().unwrap(), TargetPlatform::Win64);
        assert_eq!(
            " Linux ".parse::<TargetPlatform>().unwrap(),
            TargetPlatform::Other("linux".to_string())
        );
        assert!("  ".parse::<TargetPlatform>().is_err());
    }

    #[test]
    fn test_empty_env_value_is_absent() {
        let env: EnvironmentSnapshot =
            [("NDI_RUNTIME_DIR_V4", ""), ("PATH", "/usr/bin")].into_iter().collect();
        assert_eq!(env.get("NDI_RUNTIME_DIR_V4"), None);
        assert_eq!(env.get("PATH"), Some("/usr/bin"));
        assert_eq!(env.get("MISSING"), None);
        assert_eq!(env.len(), 2);
    }

    #[test]
    fn test_context_accessors() {
        let env: EnvironmentSnapshot = [("A", "1")].into_iter().collect();
        let ctx = BuildContext::new(TargetPlatform::Win64, true, "/plugin/Source/Core", env);
        assert!(ctx.platform().is_win64());
        assert!(ctx.is_editor_build());
        assert_eq!(ctx.module_root(), Path::new("/plugin/Source/Core"));
        assert_eq!(ctx.env_var("A"), Some("1"));

        let editor = ctx.for_module_root("/plugin/Source/Editor");
        assert_eq!(editor.module_root(), Path::new("/plugin/Source/Editor"));
        assert_eq!(editor.env_var("A"), Some("1"));
    }
}
