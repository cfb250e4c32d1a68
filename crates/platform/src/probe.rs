//! Path probing relative to a root directory

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::trace;

use crate::filesystem::FileSystemProbe;

/// What a probe expects to find
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Directory,
    File,
    Any,
}

/// Outcome of a single existence check
///
/// Never cached: the filesystem may change between passes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeResult {
    pub path: PathBuf,
    pub kind: EntryKind,
    pub exists: bool,
}

/// Joins relative segments onto a root and asks the filesystem about them
#[derive(Clone, Copy)]
pub struct PathProber<'a> {
    fs: &'a dyn FileSystemProbe,
}

impl<'a> PathProber<'a> {
    #[must_use]
    pub fn new(fs: &'a dyn FileSystemProbe) -> Self {
        Self { fs }
    }

    /// Join segments onto `root`
    ///
    /// A segment may itself contain `/`-separated parts (`Libraries/Win64`);
    /// they are pushed one at a time so the result uses the host separator.
    #[must_use]
    pub fn join(root: &Path, segments: &[&str]) -> PathBuf {
        let mut path = root.to_path_buf();
        for part in segments
            .iter()
            .flat_map(|s| s.split('/'))
            .filter(|p| !p.is_empty())
        {
            path.push(part);
        }
        path
    }

    /// Probe `root/segments...` for an entry of the given kind
    #[must_use]
    pub fn probe(&self, root: &Path, segments: &[&str], kind: EntryKind) -> ProbeResult {
        let path = Self::join(root, segments);
        self.probe_path(path, kind)
    }

    /// Probe an already-built path
    #[must_use]
    pub fn probe_path(&self, path: PathBuf, kind: EntryKind) -> ProbeResult {
        let exists = match kind {
            EntryKind::Directory => self.fs.is_dir(&path),
            EntryKind::File => self.fs.is_file(&path),
            EntryKind::Any => self.fs.exists(&path),
        };
        trace!(path = %path.display(), ?kind, exists, "probe");
        ProbeResult { path, kind, exists }
    }

    #[must_use]
    pub fn probe_dir(&self, root: &Path, segments: &[&str]) -> ProbeResult {
        self.probe(root, segments, EntryKind::Directory)
    }

    #[must_use]
    pub fn probe_file(&self, root: &Path, segments: &[&str]) -> ProbeResult {
        self.probe(root, segments, EntryKind::File)
    }

    /// Whether anything exists at `root/segments...`
    ///
    /// A missing intermediate directory and a missing leaf both give `false`.
    #[must_use]
    pub fn exists(&self, root: &Path, segments: &[&str]) -> bool {
        self.probe(root, segments, EntryKind::Any).exists
    }
}

impl std::fmt::Debug for PathProber<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathProber").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryFileSystem;

    #[test]
    fn test_join_splits_nested_segments() {
        let path = PathProber::join(Path::new("/sdk"), &["Libraries/Win64", "", "x.lib"]);
        assert_eq!(path, Path::new("/sdk").join("Libraries").join("Win64").join("x.lib"));
    }

    #[test]
    fn test_probe_kinds() {
        let fs = MemoryFileSystem::new()
            .with_dir("/module/Public")
            .with_file("/module/Public/Module.h");
        let prober = PathProber::new(&fs);

        assert!(prober.probe_dir(Path::new("/module"), &["Public"]).exists);
        assert!(!prober.probe_file(Path::new("/module"), &["Public"]).exists);
        assert!(prober.probe_file(Path::new("/module"), &["Public", "Module.h"]).exists);
        assert!(prober.exists(Path::new("/module"), &["Public/Module.h"]));
    }

    #[test]
    fn test_missing_intermediate_and_leaf_are_both_absent() {
        let fs = MemoryFileSystem::new().with_dir("/module");
        let prober = PathProber::new(&fs);

        let leaf = prober.probe_dir(Path::new("/module"), &["Private"]);
        let deep = prober.probe_dir(Path::new("/module"), &["Missing", "Private"]);
        assert!(!leaf.exists);
        assert!(!deep.exists);
        assert_eq!(deep.path, Path::new("/module/Missing/Private"));
    }
}
