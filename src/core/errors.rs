use std::path::PathBuf;

/// All domain errors for pgsvc.
///
/// Each variant provides enough context to diagnose the issue
/// without needing a debugger.
#[derive(Debug, thiserror::Error)]
pub enum PgServiceError {
    #[error(
        "Service file not found: {path}\n\n  \
         Create one with 'pgsvc path --create' or point PGSERVICEFILE\n  \
         at an existing pg_service.conf."
    )]
    FileNotFound { path: PathBuf },

    #[error(
        "Parse error in {path}: {detail}\n\n  \
         Expected format: [service] headers followed by key=value lines.\n  \
         Comments (# or ;) and blank lines are allowed."
    )]
    FileFormat { path: PathBuf, detail: String },

    #[error(
        "Service '{name}' not found\n\n  \
         Select a valid service. Run 'pgsvc list' to see available services."
    )]
    ServiceNotFound { name: String },

    #[error("Service '{name}' already exists. Choose a different name and try again.")]
    ServiceAlreadyExists { name: String },

    #[error("Invalid service name '{name}': {reason}")]
    InvalidServiceName { name: String, reason: String },

    #[error(
        "Invalid setting '{key}': {reason}\n\n  \
         Keys and values must fit on one key=value line."
    )]
    InvalidSetting { key: String, reason: String },

    #[error(
        "Permission denied while writing {path}\n\n  \
         The file is not writable and relaxing its permissions did not help.\n\n  \
         Solutions:\n    \
         → Check the file owner: ls -l {path}\n    \
         → Point PGSERVICEFILE at a copy you own"
    )]
    PermissionDenied { path: PathBuf },

    #[error(
        "Settings '{}' have empty values. Adjust them and try again.",
        .keys.join("', '")
    )]
    EmptySettingValues { keys: Vec<String> },

    #[error("Invalid setting assignment '{input}': expected key=value")]
    InvalidAssignment { input: String },

    #[error(
        "Cannot determine the service file location\n\n  \
         Set PGSERVICEFILE (or PGSYSCONFDIR) or pass --file <PATH>."
    )]
    PathUnresolved,

    #[error("Invalid configuration: {detail}")]
    InvalidConfig { detail: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PgServiceError {
    /// Returns true for failures the permission retry policy may recover from.
    pub fn is_permission_denied(&self) -> bool {
        match self {
            PgServiceError::PermissionDenied { .. } => true,
            PgServiceError::Io(e) => e.kind() == std::io::ErrorKind::PermissionDenied,
            _ => false,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PgServiceError>;
