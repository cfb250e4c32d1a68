//! Read-only filesystem queries

use std::path::Path;

/// Existence queries a resolution pass may make
///
/// Implementations must never fail: a path that cannot be inspected for any
/// reason is reported as absent.
pub trait FileSystemProbe: Send + Sync {
    /// Check if a path points to a directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Check if a path points to a regular file
    fn is_file(&self, path: &Path) -> bool;

    /// Check if anything exists at a path
    fn exists(&self, path: &Path) -> bool {
        self.is_dir(path) || self.is_file(path)
    }
}

impl<T: FileSystemProbe + ?Sized> FileSystemProbe for &T {
    fn is_dir(&self, path: &Path) -> bool {
        (**self).is_dir(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        (**self).is_file(path)
    }

    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }
}
