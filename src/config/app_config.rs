use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::errors::{PgServiceError, Result};

/// Tool configuration read from `config.toml`.
///
/// Loaded once at startup and passed down explicitly. Every field is
/// optional; a missing file means defaults.
///
/// ```toml
/// service_file = "/srv/postgres/pg_service.conf"
/// sort_services = true
///
/// [new_service]
/// use_template = true
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Service file to edit instead of the libpq lookup.
    pub service_file: Option<PathBuf>,
    /// List services alphabetically unless told otherwise.
    pub sort_services: bool,
    pub new_service: NewServiceSection,
}

/// The `[new_service]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NewServiceSection {
    /// Seed new services with host/port/dbname defaults.
    pub use_template: bool,
}

impl AppConfig {
    /// Load the configuration.
    ///
    /// An explicit path must exist. Without one, the default location
    /// is used when present, otherwise defaults apply.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(PgServiceError::InvalidConfig {
                        detail: format!("config file {} not found", path.display()),
                    });
                }
                Self::load_from(path)
            }
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load_from(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Parse the configuration at `path`.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| PgServiceError::InvalidConfig {
            detail: format!("Failed to parse {}: {e}", path.display()),
        })
    }

    /// `<config dir>/pgsvc/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("pgsvc").join("config.toml"))
    }
}
