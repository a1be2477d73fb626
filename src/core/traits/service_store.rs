use crate::core::errors::Result;
use crate::core::models::service_settings::ServiceSettings;

/// Port for reading and rewriting the services of one service file.
///
/// Every call works on a fresh read of the backing file; nothing is
/// cached between calls.
pub trait ServiceStore {
    /// List service names in file order, or case-insensitively sorted.
    fn service_names(&self, sort_alphabetically: bool) -> Result<Vec<String>>;

    /// Read the settings of one service.
    fn service_config(&self, name: &str) -> Result<ServiceSettings>;

    /// Add an empty service. Returns false, writing nothing, if it exists.
    fn create_section(&self, name: &str) -> Result<bool>;

    /// Replace all settings of an existing service.
    fn replace_settings(&self, name: &str, settings: &ServiceSettings) -> Result<()>;

    /// Delete a service.
    fn remove_service(&self, name: &str) -> Result<()>;

    /// Rename a service, keeping its settings and position.
    fn rename_service(&self, name: &str, new_name: &str) -> Result<()>;
}
