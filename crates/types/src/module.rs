//! Records produced by a resolution pass

use crate::{PchUsage, TargetPlatform};
use indexmap::IndexSet;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::path::{Path, PathBuf};

/// Dependency modules and include paths declared by a module
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DependencySet {
    pub public_modules: IndexSet<String>,
    pub private_modules: IndexSet<String>,
    /// Modules whose headers are searched for private includes only
    pub private_include_path_modules: IndexSet<String>,
    pub public_include_paths: Vec<PathBuf>,
    pub private_include_paths: Vec<PathBuf>,
}

impl DependencySet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True when every entry of `self` also appears in `other`
    #[must_use]
    pub fn is_subset_of(&self, other: &Self) -> bool {
        self.public_modules.is_subset(&other.public_modules)
            && self.private_modules.is_subset(&other.private_modules)
            && self
                .private_include_path_modules
                .is_subset(&other.private_include_path_modules)
            && self
                .public_include_paths
                .iter()
                .all(|p| other.public_include_paths.contains(p))
            && self
                .private_include_paths
                .iter()
                .all(|p| other.private_include_paths.contains(p))
    }
}

/// Link outputs of an available SDK
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SdkLink {
    pub static_libraries: Vec<PathBuf>,
    pub delay_loaded_libraries: Vec<String>,
    pub runtime_search_paths: Vec<PathBuf>,
    pub feature_defines: IndexSet<String>,
}

/// Outcome of resolving the optional third-party SDK
///
/// Link outputs exist only as a whole: either every field of [`SdkLink`] is
/// emitted or none is. The SDK include path is tracked separately because
/// headers can be visible while the libraries are not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThirdPartyLinkage {
    sdk_include_path: Option<PathBuf>,
    link: Option<SdkLink>,
}

impl ThirdPartyLinkage {
    /// Nothing resolved: unsupported platform or missing runtime variable
    #[must_use]
    pub fn unavailable() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn new(sdk_include_path: Option<PathBuf>, link: Option<SdkLink>) -> Self {
        Self {
            sdk_include_path,
            link,
        }
    }

    #[must_use]
    pub fn available(&self) -> bool {
        self.link.is_some()
    }

    #[must_use]
    pub fn sdk_include_path(&self) -> Option<&Path> {
        self.sdk_include_path.as_deref()
    }

    #[must_use]
    pub fn static_libraries(&self) -> &[PathBuf] {
        self.link.as_ref().map_or(&[][..], |l| l.static_libraries.as_slice())
    }

    #[must_use]
    pub fn delay_loaded_libraries(&self) -> &[String] {
        self.link.as_ref().map_or(&[][..], |l| l.delay_loaded_libraries.as_slice())
    }

    #[must_use]
    pub fn runtime_search_paths(&self) -> &[PathBuf] {
        self.link.as_ref().map_or(&[][..], |l| l.runtime_search_paths.as_slice())
    }

    /// Feature defines, in declaration order
    pub fn feature_defines(&self) -> impl Iterator<Item = &str> {
        self.link
            .iter()
            .flat_map(|l| l.feature_defines.iter().map(String::as_str))
    }
}

impl Serialize for ThirdPartyLinkage {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let defines: Vec<&str> = self.feature_defines().collect();
        let mut state = serializer.serialize_struct("ThirdPartyLinkage", 6)?;
        state.serialize_field("available", &self.available())?;
        state.serialize_field("sdk_include_path", &self.sdk_include_path)?;
        state.serialize_field("static_libraries", self.static_libraries())?;
        state.serialize_field("delay_loaded_libraries", self.delay_loaded_libraries())?;
        state.serialize_field("runtime_search_paths", self.runtime_search_paths())?;
        state.serialize_field("feature_defines", &defines)?;
        state.end()
    }
}

/// Terminal record handed to the external build tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleConfiguration {
    pub module: String,
    pub platform: TargetPlatform,
    pub editor_build: bool,
    pub enforce_iwyu: bool,
    pub pch_usage: PchUsage,
    pub public_include_paths: Vec<PathBuf>,
    pub private_include_paths: Vec<PathBuf>,
    pub public_dependency_modules: IndexSet<String>,
    pub private_dependency_modules: IndexSet<String>,
    pub private_include_path_modules: IndexSet<String>,
    /// Editor-only addendum; empty for runtime builds
    pub editor_dependency_modules: IndexSet<String>,
    pub sdk_available: bool,
    pub static_libraries: Vec<PathBuf>,
    pub delay_loaded_libraries: Vec<String>,
    pub runtime_search_paths: Vec<PathBuf>,
    pub feature_defines: IndexSet<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_link() -> SdkLink {
        SdkLink {
            static_libraries: vec![PathBuf::from("/sdk/Libraries/Win64/Processing.NDI.Lib.x64.lib")],
            delay_loaded_libraries: vec!["Processing.NDI.Lib.x64.dll".to_string()],
            runtime_search_paths: vec![PathBuf::from("/ndi/runtime")],
            feature_defines: ["NDI_SDK_ENABLED".to_string()].into_iter().collect(),
        }
    }

    #[test]
    fn test_unavailable_has_no_outputs() {
        let linkage = ThirdPartyLinkage::unavailable();
        assert!(!linkage.available());
        assert!(linkage.sdk_include_path().is_none());
        assert!(linkage.static_libraries().is_empty());
        assert!(linkage.delay_loaded_libraries().is_empty());
        assert!(linkage.runtime_search_paths().is_empty());
        assert_eq!(linkage.feature_defines().count(), 0);
    }

    #[test]
    fn test_linkage_serializes_available_flag() {
        let linkage =
            ThirdPartyLinkage::new(Some(PathBuf::from("/sdk/Includes")), Some(sample_link()));
        let json = serde_json::to_value(&linkage).unwrap();
        assert_eq!(json["available"], true);
        assert_eq!(json["feature_defines"][0], "NDI_SDK_ENABLED");
        assert_eq!(json["sdk_include_path"], "/sdk/Includes");

        let headers_only = ThirdPartyLinkage::new(Some(PathBuf::from("/sdk/Includes")), None);
        let json = serde_json::to_value(&headers_only).unwrap();
        assert_eq!(json["available"], false);
        assert!(json["static_libraries"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_subset_check() {
        let mut base = DependencySet::new();
        base.public_modules.insert("Core".to_string());
        base.public_include_paths.push(PathBuf::from("/m/Public"));

        let mut extended = base.clone();
        extended.private_modules.insert("UnrealEd".to_string());

        assert!(base.is_subset_of(&extended));
        assert!(!extended.is_subset_of(&base));
    }
}
