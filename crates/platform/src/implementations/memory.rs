//! In-memory filesystem backend

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::filesystem::FileSystemProbe;

/// A fixed tree of directories and files held in memory
///
/// Adding an entry also adds every ancestor directory, so a tree built from
/// leaves is always connected.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileSystem {
    dirs: BTreeSet<PathBuf>,
    files: BTreeSet<PathBuf>,
}

impl MemoryFileSystem {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directory and its ancestors
    pub fn add_dir(&mut self, path: impl AsRef<Path>) {
        for ancestor in path.as_ref().ancestors() {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            self.dirs.insert(ancestor.to_path_buf());
        }
    }

    /// Add a file and its parent directories
    pub fn add_file(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.files.insert(path.to_path_buf());
    }

    #[must_use]
    pub fn with_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.add_dir(path);
        self
    }

    #[must_use]
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        self.add_file(path);
        self
    }
}

impl FileSystemProbe for MemoryFileSystem {
    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.contains(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.files.contains(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ancestors_are_registered() {
        let fs = MemoryFileSystem::new()
            .with_file("/plugin/ThirdParty/NDI/Libraries/Win64/Processing.NDI.Lib.x64.lib");

        assert!(fs.is_dir(Path::new("/plugin/ThirdParty/NDI/Libraries/Win64")));
        assert!(fs.is_dir(Path::new("/plugin")));
        assert!(fs.is_dir(Path::new("/")));
        assert!(fs.is_file(Path::new(
            "/plugin/ThirdParty/NDI/Libraries/Win64/Processing.NDI.Lib.x64.lib"
        )));
        assert!(!fs.is_dir(Path::new("/plugin/ThirdParty/NDI/Includes")));
    }

    #[test]
    fn test_trailing_separator_is_equivalent() {
        let fs = MemoryFileSystem::new().with_dir("/ndi/runtime/");
        assert!(fs.is_dir(Path::new("/ndi/runtime")));
    }
}
