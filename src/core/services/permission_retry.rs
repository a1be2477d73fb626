use std::io;
use std::path::Path;

use tracing::warn;

use crate::core::errors::{PgServiceError, Result};

/// Retries a write once after relaxing the target file's permissions.
///
/// The wrapped operation runs at most twice: the original attempt and,
/// if that failed with a permission error, one retry after adding write
/// bits to the file. Any other error propagates untouched.
pub struct PermissionRetryPolicy<'a> {
    path: &'a Path,
}

impl<'a> PermissionRetryPolicy<'a> {
    pub fn new(path: &'a Path) -> Self {
        Self { path }
    }

    /// Run `op`, relaxing permissions with [`relax_permissions`] on failure.
    pub fn run<T>(&self, op: impl FnMut() -> Result<T>) -> Result<T> {
        self.run_with(relax_permissions, op)
    }

    /// Run `op`, calling `relax` once if the first attempt is denied.
    pub fn run_with<T>(
        &self,
        relax: impl FnOnce(&Path) -> io::Result<()>,
        mut op: impl FnMut() -> Result<T>,
    ) -> Result<T> {
        match op() {
            Err(e) if e.is_permission_denied() => {
                warn!(path = %self.path.display(), "write denied, relaxing file permissions");

                if let Err(err) = relax(self.path) {
                    warn!(path = %self.path.display(), error = %err, "could not relax permissions");
                    return Err(self.denied());
                }

                match op() {
                    Err(e) if e.is_permission_denied() => Err(self.denied()),
                    other => other,
                }
            }
            other => other,
        }
    }

    fn denied(&self) -> PgServiceError {
        PgServiceError::PermissionDenied {
            path: self.path.to_path_buf(),
        }
    }
}

/// Add owner, group and other write bits to `path`.
#[cfg(unix)]
pub fn relax_permissions(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = std::fs::metadata(path)?.permissions();
    perms.set_mode(perms.mode() | 0o222);
    std::fs::set_permissions(path, perms)
}

/// Clear the read-only attribute of `path`.
#[cfg(not(unix))]
#[allow(clippy::permissions_set_readonly_false)]
pub fn relax_permissions(path: &Path) -> io::Result<()> {
    let mut perms = std::fs::metadata(path)?.permissions();
    perms.set_readonly(false);
    std::fs::set_permissions(path, perms)
}
