//! Declarative module rules
//!
//! A `ModuleRules` value says which modules a module depends on, which of
//! its own directories become include paths, what editor builds add, and how
//! to find its optional third-party SDK. The resolver turns rules plus a
//! build context into a `ModuleConfiguration`.

use crate::constants;
use modlink_errors::Error;
use modlink_types::PchUsage;
use serde::{Deserialize, Serialize};

/// Rules for one module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleRules {
    pub name: String,
    #[serde(default = "default_enforce_iwyu")]
    pub enforce_iwyu: bool,
    #[serde(default)]
    pub pch_usage: PchUsage,
    #[serde(default)]
    pub public_dependencies: Vec<String>,
    #[serde(default)]
    pub private_dependencies: Vec<String>,
    #[serde(default)]
    pub public_include_groups: Vec<IncludeGroup>,
    #[serde(default)]
    pub private_include_groups: Vec<IncludeGroup>,
    #[serde(default)]
    pub editor: EditorRules,
    #[serde(default)]
    pub third_party: Option<ThirdPartyRules>,
}

/// Include paths registered together when a directory exists
///
/// `when_exists` and every entry of `paths` are relative to the module root.
/// An empty `paths` registers `when_exists` itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncludeGroup {
    pub when_exists: String,
    #[serde(default)]
    pub paths: Vec<String>,
    #[serde(default)]
    pub editor_only: bool,
}

impl IncludeGroup {
    /// Group that registers a single directory when it exists
    #[must_use]
    pub fn dir(name: &str) -> Self {
        Self {
            when_exists: name.to_string(),
            paths: Vec::new(),
            editor_only: false,
        }
    }

    /// Paths to register once the gate directory exists
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        let own = self.paths.is_empty().then_some(self.when_exists.as_str());
        own.into_iter()
            .chain(self.paths.iter().map(String::as_str))
    }
}

/// Additions applied only to editor builds
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorRules {
    /// Modules searched for private includes only (asset tooling, target
    /// platform introspection)
    #[serde(default)]
    pub private_include_path_modules: Vec<String>,
    #[serde(default)]
    pub private_dependencies: Vec<String>,
    /// Appended by the aggregator so the editor companion can reach this
    /// module
    #[serde(default)]
    pub dependency_modules: Vec<String>,
}

/// Where the optional SDK lives and what it links
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThirdPartyRules {
    #[serde(default = "default_sdk_dir")]
    pub sdk_dir: String,
    #[serde(default = "default_include_dir")]
    pub include_dir: String,
    #[serde(default = "default_library_dir")]
    pub library_dir: String,
    #[serde(default = "default_runtime_env_var")]
    pub runtime_env_var: String,
    #[serde(default = "default_static_libraries")]
    pub static_libraries: Vec<String>,
    #[serde(default = "default_delay_load_libraries")]
    pub delay_load_libraries: Vec<String>,
    #[serde(default = "default_feature_define")]
    pub feature_define: String,
    /// Also require every static library to exist as a file
    #[serde(default)]
    pub require_library_files: bool,
}

impl Default for ThirdPartyRules {
    fn default() -> Self {
        Self {
            sdk_dir: default_sdk_dir(),
            include_dir: default_include_dir(),
            library_dir: default_library_dir(),
            runtime_env_var: default_runtime_env_var(),
            static_libraries: default_static_libraries(),
            delay_load_libraries: default_delay_load_libraries(),
            feature_define: default_feature_define(),
            require_library_files: false,
        }
    }
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}

impl ModuleRules {
    /// Render these rules as a standalone `[[modules]]`-style TOML table
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml_string(&self) -> Result<String, Error> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Runtime module of the NDI I/O plugin
    #[must_use]
    pub fn ndiio() -> Self {
        Self {
            name: constants::CORE_MODULE.to_string(),
            enforce_iwyu: true,
            pch_usage: PchUsage::UseExplicitOrSharedPchs,
            public_dependencies: names(&["Engine", "Core", "CoreUObject", "Projects"]),
            private_dependencies: names(&[
                "Renderer",
                "RenderCore",
                "RHI",
                "Slate",
                "SlateCore",
                "UMG",
                "ImageWrapper",
                "AudioMixer",
                "InputCore",
                "Media",
                "MediaAssets",
                "MediaUtils",
                "CinematicCamera",
            ]),
            public_include_groups: vec![IncludeGroup::dir(constants::PUBLIC_DIR)],
            private_include_groups: vec![IncludeGroup::dir(constants::PRIVATE_DIR)],
            editor: EditorRules {
                private_include_path_modules: names(&["AssetTools", "TargetPlatform"]),
                private_dependencies: names(&["UnrealEd", "AssetTools", "MaterialUtilities"]),
                dependency_modules: names(&[constants::EDITOR_MODULE]),
            },
            third_party: Some(ThirdPartyRules::default()),
        }
    }

    /// Editor-only companion of [`ModuleRules::ndiio`]
    #[must_use]
    pub fn ndiio_editor() -> Self {
        Self {
            name: constants::EDITOR_MODULE.to_string(),
            enforce_iwyu: true,
            pch_usage: PchUsage::UseExplicitOrSharedPchs,
            public_dependencies: names(&["Engine", "Core", "CoreUObject"]),
            private_dependencies: Vec::new(),
            public_include_groups: vec![IncludeGroup::dir(constants::PUBLIC_DIR)],
            private_include_groups: vec![IncludeGroup {
                when_exists: constants::PRIVATE_DIR.to_string(),
                paths: names(&[
                    constants::PRIVATE_DIR,
                    "../Core/Private",
                    "../ThirdParty/NDI/Source",
                ]),
                editor_only: true,
            }],
            editor: EditorRules {
                private_include_path_modules: names(&["AssetTools", "TargetPlatform"]),
                private_dependencies: names(&[
                    "Projects",
                    "UnrealEd",
                    "AssetTools",
                    "MaterialUtilities",
                    "Renderer",
                    "RenderCore",
                    "PlacementMode",
                    "CinematicCamera",
                    "RHI",
                    "Slate",
                    "SlateCore",
                    "UMG",
                    "ImageWrapper",
                    "Media",
                    "MediaAssets",
                    "MediaUtils",
                    "AssetTools",
                    "TargetPlatform",
                    "PropertyEditor",
                    constants::CORE_MODULE,
                ]),
                dependency_modules: Vec::new(),
            },
            third_party: None,
        }
    }
}

fn default_enforce_iwyu() -> bool {
    true
}

fn default_sdk_dir() -> String {
    constants::SDK_DIR.to_string()
}

fn default_include_dir() -> String {
    constants::SDK_INCLUDE_DIR.to_string()
}

fn default_library_dir() -> String {
    constants::SDK_LIBRARY_DIR.to_string()
}

fn default_runtime_env_var() -> String {
    constants::RUNTIME_ENV_VAR.to_string()
}

fn default_static_libraries() -> Vec<String> {
    vec![constants::SDK_STATIC_LIBRARY.to_string()]
}

fn default_delay_load_libraries() -> Vec<String> {
    vec![constants::SDK_DYNAMIC_LIBRARY.to_string()]
}

fn default_feature_define() -> String {
    constants::SDK_FEATURE_DEFINE.to_string()
}
