use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use tracing::{debug, info};

use crate::core::errors::{PgServiceError, Result};

/// Environment variable naming the service file directly.
pub const SERVICE_FILE_VAR: &str = "PGSERVICEFILE";

/// Environment variable naming the system configuration directory.
pub const SYSCONF_DIR_VAR: &str = "PGSYSCONFDIR";

/// Locates the service file the same way libpq does.
///
/// Resolution order:
/// 1. An explicit override (`--file` or `service_file` in the config)
/// 2. `$PGSERVICEFILE`
/// 3. `$PGSYSCONFDIR/pg_service.conf`
/// 4. The platform default (`~/.pg_service.conf`, or
///    `%APPDATA%\postgresql\.pg_service.conf` on Windows)
#[derive(Debug, Clone, Default)]
pub struct PathResolver {
    override_path: Option<PathBuf>,
    service_file: Option<PathBuf>,
    sysconf_dir: Option<PathBuf>,
    default_path: Option<PathBuf>,
}

impl PathResolver {
    /// Build a resolver from explicit sources.
    pub fn new(
        service_file: Option<PathBuf>,
        sysconf_dir: Option<PathBuf>,
        default_path: Option<PathBuf>,
    ) -> Self {
        Self {
            override_path: None,
            service_file,
            sysconf_dir,
            default_path,
        }
    }

    /// Build a resolver from the process environment.
    pub fn from_env() -> Self {
        Self::new(
            env_path(SERVICE_FILE_VAR),
            env_path(SYSCONF_DIR_VAR),
            platform_default(),
        )
    }

    /// Use `path` in preference to every other source.
    pub fn with_override(mut self, path: Option<PathBuf>) -> Self {
        self.override_path = path;
        self
    }

    /// Return the configured service file location without touching disk.
    pub fn locate(&self) -> Result<PathBuf> {
        self.override_path
            .clone()
            .or_else(|| self.service_file.clone())
            .or_else(|| self.sysconf_dir.as_ref().map(|d| d.join("pg_service.conf")))
            .or_else(|| self.default_path.clone())
            .ok_or(PgServiceError::PathUnresolved)
    }

    /// Return the service file location, creating an empty file there if
    /// `create_if_missing` is set and nothing exists yet.
    ///
    /// Without `create_if_missing` the path is returned even when the file
    /// is absent; checking existence is up to the caller.
    pub fn resolve(&self, create_if_missing: bool) -> Result<PathBuf> {
        let path = self.locate()?;
        debug!(path = %path.display(), "resolved service file");

        if create_if_missing && !path.exists() {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
                && !parent.exists()
            {
                fs::create_dir_all(parent)?;
            }
            OpenOptions::new().create(true).append(true).open(&path)?;
            info!(path = %path.display(), "created empty service file");
        }

        Ok(path)
    }
}

fn env_path(var: &str) -> Option<PathBuf> {
    std::env::var_os(var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

#[cfg(windows)]
fn platform_default() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("postgresql").join(".pg_service.conf"))
}

#[cfg(not(windows))]
fn platform_default() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".pg_service.conf"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn service_file_variable_wins_over_sysconf_dir() {
        let resolver = PathResolver::new(
            Some(PathBuf::from("/srv/pg/services.conf")),
            Some(PathBuf::from("/etc/postgresql-common")),
            Some(PathBuf::from("/home/u/.pg_service.conf")),
        );

        assert_eq!(resolver.locate().unwrap(), Path::new("/srv/pg/services.conf"));
    }

    #[test]
    fn sysconf_dir_appends_file_name() {
        let resolver = PathResolver::new(
            None,
            Some(PathBuf::from("/etc/postgresql-common")),
            Some(PathBuf::from("/home/u/.pg_service.conf")),
        );

        assert_eq!(
            resolver.locate().unwrap(),
            Path::new("/etc/postgresql-common/pg_service.conf")
        );
    }

    #[test]
    fn falls_back_to_platform_default() {
        let resolver = PathResolver::new(None, None, Some(PathBuf::from("/home/u/.pg_service.conf")));

        assert_eq!(resolver.locate().unwrap(), Path::new("/home/u/.pg_service.conf"));
    }

    #[test]
    fn override_beats_environment() {
        let resolver = PathResolver::new(Some(PathBuf::from("/env.conf")), None, None)
            .with_override(Some(PathBuf::from("/cli.conf")));

        assert_eq!(resolver.locate().unwrap(), Path::new("/cli.conf"));
    }

    #[test]
    fn no_source_is_unresolved() {
        let resolver = PathResolver::default();

        assert!(matches!(resolver.locate(), Err(PgServiceError::PathUnresolved)));
    }

    #[test]
    fn resolve_without_create_leaves_disk_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pg_service.conf");
        let resolver = PathResolver::new(Some(path.clone()), None, None);

        assert_eq!(resolver.resolve(false).unwrap(), path);
        assert!(!path.exists());
    }

    #[test]
    fn resolve_with_create_makes_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("pg_service.conf");
        let resolver = PathResolver::new(Some(path.clone()), None, None);

        resolver.resolve(true).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn resolve_with_create_keeps_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pg_service.conf");
        std::fs::write(&path, "[db]\nhost=h\n").unwrap();
        let resolver = PathResolver::new(Some(path.clone()), None, None);

        resolver.resolve(true).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[db]\nhost=h\n");
    }
}
