//! Host filesystem backend

use std::path::Path;

use crate::filesystem::FileSystemProbe;

/// Probes the real filesystem through `std::fs::metadata`
///
/// Symlinks are followed, so a link to a directory counts as a directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostFileSystem;

impl HostFileSystem {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl FileSystemProbe for HostFileSystem {
    fn is_dir(&self, path: &Path) -> bool {
        std::fs::metadata(path).is_ok_and(|m| m.is_dir())
    }

    fn is_file(&self, path: &Path) -> bool {
        std::fs::metadata(path).is_ok_and(|m| m.is_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_host_probe_reports_kinds() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join("Public");
        let file = temp.path().join("Processing.NDI.Lib.x64.lib");
        std::fs::create_dir(&dir).unwrap();
        std::fs::write(&file, b"").unwrap();

        let fs = HostFileSystem::new();
        assert!(fs.is_dir(&dir));
        assert!(!fs.is_file(&dir));
        assert!(fs.is_file(&file));
        assert!(!fs.is_dir(&file));
        assert!(fs.exists(&file));
        assert!(!fs.exists(&temp.path().join("missing").join("leaf")));
    }
}
