use crate::core::models::service_settings::ServiceSettings;
use crate::core::services::service_editor::validate_settings;

/// Staged edits to one service, compared against the loaded snapshot.
///
/// A session is Clean right after loading, Dirty once the working copy
/// differs from the snapshot, and Clean again after [`mark_saved`] or
/// once edits are reverted by hand. Nothing is written here; the owner
/// saves [`settings`] through the store when it chooses to.
///
/// [`mark_saved`]: EditSession::mark_saved
/// [`settings`]: EditSession::settings
#[derive(Debug, Clone)]
pub struct EditSession {
    service_name: String,
    original: ServiceSettings,
    current: ServiceSettings,
}

impl EditSession {
    pub fn new(service_name: impl Into<String>, loaded: ServiceSettings) -> Self {
        Self {
            service_name: service_name.into(),
            original: loaded.clone(),
            current: loaded,
        }
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// The working copy.
    pub fn settings(&self) -> &ServiceSettings {
        &self.current
    }

    /// Set one value. Returns true if the working copy changed.
    pub fn set(&mut self, key: &str, value: &str) -> bool {
        if self.current.get(key) == Some(value) {
            return false;
        }
        self.current.insert(key, value);
        true
    }

    /// Add settings whose keys are not already present.
    pub fn add_settings(&mut self, settings: &ServiceSettings) {
        for (key, value) in settings.iter() {
            if !self.current.contains_key(key) {
                self.current.insert(key, value);
            }
        }
    }

    /// Remove one setting, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.current.remove(key)
    }

    pub fn is_dirty(&self) -> bool {
        self.current != self.original
    }

    /// Whether `key` is new or holds a different value than when loaded.
    pub fn is_modified(&self, key: &str) -> bool {
        match self.current.get(key) {
            Some(value) => self.original.get(key) != Some(value),
            None => false,
        }
    }

    /// Keys whose current value is blank.
    pub fn invalid_settings(&self) -> Vec<String> {
        validate_settings(&self.current)
    }

    /// Accept the working copy as the new snapshot after a successful write.
    pub fn mark_saved(&mut self) {
        self.original = self.current.clone();
    }

    /// Drop all staged edits.
    pub fn revert(&mut self) {
        self.current = self.original.clone();
    }
}
