use tracing::{debug, info};

use crate::adapters::parsers::ini_parser::{check_settings, render_section};
use crate::core::errors::{PgServiceError, Result};
use crate::core::models::service_settings::ServiceSettings;
use crate::core::models::setting_descriptor::{self, SettingDescriptor};
use crate::core::traits::service_store::ServiceStore;

/// Service-level operations on top of a `ServiceStore` backend.
pub struct ServiceEditor<S: ServiceStore> {
    pub store: S,
}

impl<S: ServiceStore> ServiceEditor<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Create `name` with `settings`.
    ///
    /// Returns false, writing nothing, if the service already exists.
    pub fn create_service(&self, name: &str, settings: &ServiceSettings) -> Result<bool> {
        validate_service_name(name)?;
        check_settings(settings)?;

        if !self.store.create_section(name)? {
            return Ok(false);
        }

        self.store.replace_settings(name, settings)?;
        info!(service = name, settings = settings.len(), "created service");
        Ok(true)
    }

    /// Copy the settings of `source` into `target`.
    ///
    /// Overwrites `target` if it exists, otherwise creates it. Running it
    /// again with an unchanged source leaves the same result.
    pub fn duplicate_service(&self, source: &str, target: &str) -> Result<()> {
        let settings = self.store.service_config(source)?;

        if self.store.service_names(false)?.iter().any(|n| n == target) {
            self.store.replace_settings(target, &settings)?;
            debug!(source, target, "overwrote existing service");
        } else {
            self.create_service(target, &settings)?;
        }

        info!(source, target, "copied service settings");
        Ok(())
    }

    /// Validate then replace the settings of `name`.
    ///
    /// Refuses with `EmptySettingValues` when any value is blank.
    pub fn update_service(&self, name: &str, settings: &ServiceSettings) -> Result<()> {
        let invalid = validate_settings(settings);
        if !invalid.is_empty() {
            return Err(PgServiceError::EmptySettingValues { keys: invalid });
        }

        self.store.replace_settings(name, settings)?;
        info!(service = name, "updated service");
        Ok(())
    }

    /// Rename `name` to `new_name`.
    pub fn rename_service(&self, name: &str, new_name: &str) -> Result<()> {
        validate_service_name(new_name)?;
        self.store.rename_service(name, new_name)?;
        info!(from = name, to = new_name, "renamed service");
        Ok(())
    }

    pub fn remove_service(&self, name: &str) -> Result<()> {
        self.store.remove_service(name)?;
        info!(service = name, "removed service");
        Ok(())
    }

    /// Read `name` and render it as a standalone text block.
    pub fn render_service(&self, name: &str) -> Result<String> {
        let settings = self.store.service_config(name)?;
        render_service_as_text(name, &settings)
    }

    /// Returns the keys whose value is blank. See [`validate_settings`].
    pub fn validate_settings(&self, settings: &ServiceSettings) -> Vec<String> {
        validate_settings(settings)
    }

    /// The well-known settings a user can add to a service.
    pub fn available_setting_descriptors(&self) -> &'static [SettingDescriptor] {
        setting_descriptor::setting_descriptors()
    }
}

/// Render `[name]` followed by `key=value` lines, without touching disk.
///
/// Fails with `InvalidSetting` when a key or value would not read back
/// as the same line.
pub fn render_service_as_text(name: &str, settings: &ServiceSettings) -> Result<String> {
    render_section(name, settings)
}

/// Returns the keys whose value is empty after trimming, in setting order.
///
/// A non-empty result means the settings should be fixed before saving.
pub fn validate_settings(settings: &ServiceSettings) -> Vec<String> {
    settings
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(key, _)| key.to_string())
        .collect()
}

/// Reject names that cannot round-trip through a `[name]` header.
pub fn validate_service_name(name: &str) -> Result<()> {
    let reason = if name.trim().is_empty() {
        "name is empty"
    } else if name.trim() != name {
        "name has leading or trailing whitespace"
    } else if name.contains(['[', ']']) {
        "name contains square brackets"
    } else if name.contains(['\n', '\r']) {
        "name contains a line break"
    } else {
        return Ok(());
    };

    Err(PgServiceError::InvalidServiceName {
        name: name.to_string(),
        reason: reason.to_string(),
    })
}
