//! Merging dependency and linkage results into the final configuration

use modlink_config::ModuleRules;
use modlink_types::{BuildContext, DependencySet, IndexSet, ModuleConfiguration, ThirdPartyLinkage};

/// Pure structural merge; the editor flag is the only condition
pub struct Aggregator<'a> {
    rules: &'a ModuleRules,
}

impl<'a> Aggregator<'a> {
    #[must_use]
    pub fn new(rules: &'a ModuleRules) -> Self {
        Self { rules }
    }

    #[must_use]
    pub fn merge(
        &self,
        deps: DependencySet,
        linkage: &ThirdPartyLinkage,
        ctx: &BuildContext,
    ) -> ModuleConfiguration {
        let mut public_include_paths = deps.public_include_paths;
        if let Some(include) = linkage.sdk_include_path() {
            if !public_include_paths.iter().any(|p| p == include) {
                public_include_paths.push(include.to_path_buf());
            }
        }

        let editor_dependency_modules: IndexSet<String> = if ctx.is_editor_build() {
            self.rules.editor.dependency_modules.iter().cloned().collect()
        } else {
            IndexSet::new()
        };

        ModuleConfiguration {
            module: self.rules.name.clone(),
            platform: ctx.platform().clone(),
            editor_build: ctx.is_editor_build(),
            enforce_iwyu: self.rules.enforce_iwyu,
            pch_usage: self.rules.pch_usage,
            public_include_paths,
            private_include_paths: deps.private_include_paths,
            public_dependency_modules: deps.public_modules,
            private_dependency_modules: deps.private_modules,
            private_include_path_modules: deps.private_include_path_modules,
            editor_dependency_modules,
            sdk_available: linkage.available(),
            static_libraries: linkage.static_libraries().to_vec(),
            delay_loaded_libraries: linkage.delay_loaded_libraries().to_vec(),
            runtime_search_paths: linkage.runtime_search_paths().to_vec(),
            feature_defines: linkage.feature_defines().map(str::to_string).collect(),
        }
    }
}
