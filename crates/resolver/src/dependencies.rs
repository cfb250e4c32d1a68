//! Dependency set construction

use modlink_config::{IncludeGroup, ModuleRules};
use modlink_platform::{PathProber, ProbeResult};
use modlink_types::{BuildContext, DependencySet};
use std::path::PathBuf;
use tracing::debug;

/// Builds the module-name and include-path sets for one module
///
/// Directory probes gate include-path registration only. Module names are
/// always declared; whether those modules exist is the host's concern.
pub struct DependencySetBuilder<'a> {
    rules: &'a ModuleRules,
}

impl<'a> DependencySetBuilder<'a> {
    #[must_use]
    pub fn new(rules: &'a ModuleRules) -> Self {
        Self { rules }
    }

    /// Build the dependency set for `ctx`
    #[must_use]
    pub fn build(&self, ctx: &BuildContext, prober: &PathProber<'_>) -> DependencySet {
        let mut set = DependencySet::new();

        set.public_modules
            .extend(self.rules.public_dependencies.iter().cloned());
        register_groups(
            &self.rules.public_include_groups,
            ctx,
            prober,
            &mut set.public_include_paths,
        );

        set.private_modules
            .extend(self.rules.private_dependencies.iter().cloned());
        register_groups(
            &self.rules.private_include_groups,
            ctx,
            prober,
            &mut set.private_include_paths,
        );

        if ctx.is_editor_build() {
            let editor = &self.rules.editor;
            set.private_include_path_modules
                .extend(editor.private_include_path_modules.iter().cloned());
            set.private_modules
                .extend(editor.private_dependencies.iter().cloned());
        }

        set
    }

    /// Directory gates the include groups would check for `ctx`, public first
    #[must_use]
    pub fn gate_probes(&self, ctx: &BuildContext, prober: &PathProber<'_>) -> Vec<ProbeResult> {
        self.rules
            .public_include_groups
            .iter()
            .chain(&self.rules.private_include_groups)
            .filter(|group| ctx.is_editor_build() || !group.editor_only)
            .map(|group| prober.probe_dir(ctx.module_root(), &[group.when_exists.as_str()]))
            .collect()
    }
}

fn register_groups(
    groups: &[IncludeGroup],
    ctx: &BuildContext,
    prober: &PathProber<'_>,
    out: &mut Vec<PathBuf>,
) {
    let root = ctx.module_root();
    for group in groups {
        if group.editor_only && !ctx.is_editor_build() {
            continue;
        }
        let gate = prober.probe_dir(root, &[group.when_exists.as_str()]);
        if !gate.exists {
            debug!(path = %gate.path.display(), "include directory absent");
            continue;
        }
        for rel in group.paths() {
            let path = PathProber::join(root, &[rel]);
            if !out.contains(&path) {
                out.push(path);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modlink_platform::MemoryFileSystem;
    use modlink_types::{EnvironmentSnapshot, TargetPlatform};
    use std::path::Path;

    fn ctx(editor: bool) -> BuildContext {
        BuildContext::new(
            TargetPlatform::Win64,
            editor,
            "/plugin/Source/Core",
            EnvironmentSnapshot::new(),
        )
    }

    #[test]
    fn test_names_declared_without_directories() {
        let rules = ModuleRules::ndiio();
        let fs = MemoryFileSystem::new();
        let set = DependencySetBuilder::new(&rules).build(&ctx(false), &PathProber::new(&fs));

        assert_eq!(
            set.public_modules.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["Engine", "Core", "CoreUObject", "Projects"]
        );
        assert!(set.private_modules.contains("CinematicCamera"));
        assert!(set.public_include_paths.is_empty());
        assert!(set.private_include_paths.is_empty());
        assert!(set.private_include_path_modules.is_empty());
    }

    #[test]
    fn test_directories_gate_include_paths() {
        let rules = ModuleRules::ndiio();
        let fs = MemoryFileSystem::new().with_dir("/plugin/Source/Core/Public");
        let set = DependencySetBuilder::new(&rules).build(&ctx(false), &PathProber::new(&fs));

        assert_eq!(
            set.public_include_paths,
            vec![Path::new("/plugin/Source/Core/Public").to_path_buf()]
        );
        assert!(set.private_include_paths.is_empty());
    }

    #[test]
    fn test_editor_additions_are_separate_lists() {
        let rules = ModuleRules::ndiio();
        let fs = MemoryFileSystem::new();
        let set = DependencySetBuilder::new(&rules).build(&ctx(true), &PathProber::new(&fs));

        assert!(set.private_modules.contains("UnrealEd"));
        assert!(set.private_modules.contains("AssetTools"));
        assert!(set.private_include_path_modules.contains("TargetPlatform"));
        assert!(!set.private_modules.contains("TargetPlatform"));
    }

    #[test]
    fn test_editor_only_group_skipped_for_runtime() {
        let rules = ModuleRules::ndiio_editor();
        let fs = MemoryFileSystem::new().with_dir("/plugin/Source/Editor/Private");
        let root_ctx = |editor| ctx(editor).for_module_root("/plugin/Source/Editor");

        let runtime = DependencySetBuilder::new(&rules).build(&root_ctx(false), &PathProber::new(&fs));
        assert!(runtime.private_include_paths.is_empty());
        assert!(runtime.private_modules.is_empty());

        let editor = DependencySetBuilder::new(&rules).build(&root_ctx(true), &PathProber::new(&fs));
        assert_eq!(editor.private_include_paths.len(), 3);
        assert_eq!(
            editor.private_include_paths[1],
            Path::new("/plugin/Source/Editor/../Core/Private")
        );
        assert!(editor.private_modules.contains("NDIIO"));
        assert_eq!(
            DependencySetBuilder::new(&rules)
                .gate_probes(&root_ctx(false), &PathProber::new(&fs))
                .len(),
            1
        );
        // AssetTools is listed twice in the rules; the set keeps one
        assert_eq!(
            editor.private_modules.iter().filter(|m| *m == "AssetTools").count(),
            1
        );
    }
}
