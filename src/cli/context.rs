use std::path::PathBuf;

use crate::adapters::stores::ini_file_store::IniFileStore;
use crate::config::app_config::AppConfig;
use crate::core::errors::Result;
use crate::core::services::path_resolver::PathResolver;
use crate::core::services::service_editor::ServiceEditor;

/// Per-invocation state handed to every command.
///
/// Built once in `main` from the parsed flags and the loaded config,
/// and dropped when the command returns.
pub struct Context {
    pub config: AppConfig,
    file_override: Option<PathBuf>,
}

impl Context {
    pub fn new(config: AppConfig, file_override: Option<PathBuf>) -> Self {
        Self {
            config,
            file_override,
        }
    }

    /// Resolver honoring `--file`, then the config, then the environment.
    pub fn resolver(&self) -> PathResolver {
        let explicit = self
            .file_override
            .clone()
            .or_else(|| self.config.service_file.clone());
        PathResolver::from_env().with_override(explicit)
    }

    /// Editor over the resolved service file.
    pub fn editor(&self) -> Result<ServiceEditor<IniFileStore>> {
        let path = self.resolver().resolve(false)?;
        Ok(ServiceEditor::new(IniFileStore::new(path)))
    }
}
