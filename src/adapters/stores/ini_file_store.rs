use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::adapters::parsers::ini_parser::{IniParser, check_settings};
use crate::core::errors::{PgServiceError, Result};
use crate::core::models::service_file::ServiceFile;
use crate::core::models::service_settings::ServiceSettings;
use crate::core::services::permission_retry::PermissionRetryPolicy;
use crate::core::traits::parser::ConfigParser;
use crate::core::traits::service_store::ServiceStore;

/// Service store backed by a libpq service file on disk.
///
/// Every mutation reads the whole file, edits it in memory and writes
/// the full result back, normally through a temporary file renamed over
/// the original so readers never see a half-written file.
///
/// Example `pg_service.conf`:
/// ```text
/// [prod]
/// host=db.example.com
/// port=5432
/// dbname=app
/// ```
#[derive(Debug, Clone)]
pub struct IniFileStore {
    path: PathBuf,
}

impl IniFileStore {
    /// Create a store backed by the given file path.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Return the file path this store reads from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the whole file.
    pub fn load(&self) -> Result<ServiceFile> {
        if !self.path.exists() {
            return Err(PgServiceError::FileNotFound {
                path: self.path.clone(),
            });
        }

        let content =
            String::from_utf8(fs::read(&self.path)?).map_err(|_| PgServiceError::FileFormat {
                path: self.path.clone(),
                detail: "not valid UTF-8".to_string(),
            })?;
        let file = IniParser.parse(&content, &self.path)?;
        debug!(
            path = %self.path.display(),
            services = file.sections.len(),
            "loaded service file"
        );
        Ok(file)
    }

    /// Serialize `file` and replace the on-disk content with it.
    ///
    /// A symlinked path is resolved first, so the link stays a link and
    /// the file it points to receives the content.
    pub fn save(&self, file: &ServiceFile) -> Result<()> {
        let content = IniParser.serialize(file);
        let target = self.target()?;
        PermissionRetryPolicy::new(&target).run(|| write_file(&target, &content))?;
        info!(path = %target.display(), "wrote service file");
        Ok(())
    }

    /// Load, apply `edit`, and save.
    fn update(&self, edit: impl FnOnce(&mut ServiceFile) -> Result<()>) -> Result<()> {
        let mut file = self.load()?;
        edit(&mut file)?;
        self.save(&file)
    }

    fn target(&self) -> Result<PathBuf> {
        fs::canonicalize(&self.path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => PgServiceError::FileNotFound {
                path: self.path.clone(),
            },
            _ => e.into(),
        })
    }
}

/// Replace the content of `target`, keeping its mode and owner.
///
/// The file's own permissions decide whether it may be written. The content
/// goes through a temp file renamed over `target` when its directory allows
/// that and the rename keeps the owner; otherwise the file is rewritten in place.
fn write_file(target: &Path, content: &str) -> Result<()> {
    let metadata = fs::metadata(target)?;
    if metadata.permissions().readonly() {
        return Err(PgServiceError::PermissionDenied {
            path: target.to_path_buf(),
        });
    }

    let file = OpenOptions::new().write(true).open(target)?;

    match replace_via_rename(target, content, &metadata) {
        Ok(true) => Ok(()),
        Ok(false) => {
            debug!(path = %target.display(), "rename would change the owner, writing in place");
            write_in_place(file, content)
        }
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
            debug!(path = %target.display(), "directory not writable, writing in place");
            write_in_place(file, content)
        }
        Err(e) => Err(e.into()),
    }
}

/// Returns `Ok(false)` without touching `target` when a renamed temp file
/// would end up with a different owner or group.
fn replace_via_rename(target: &Path, content: &str, metadata: &fs::Metadata) -> io::Result<bool> {
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    if !same_owner(&tmp.as_file().metadata()?, metadata) {
        return Ok(false);
    }

    tmp.write_all(content.as_bytes())?;
    tmp.as_file().sync_all()?;
    fs::set_permissions(tmp.path(), metadata.permissions())?;
    tmp.persist(target).map_err(io::Error::from)?;
    Ok(true)
}

#[cfg(unix)]
fn same_owner(created: &fs::Metadata, existing: &fs::Metadata) -> bool {
    use std::os::unix::fs::MetadataExt;

    created.uid() == existing.uid() && created.gid() == existing.gid()
}

#[cfg(not(unix))]
fn same_owner(_created: &fs::Metadata, _existing: &fs::Metadata) -> bool {
    true
}

fn write_in_place(mut file: fs::File, content: &str) -> Result<()> {
    file.set_len(0)?;
    file.write_all(content.as_bytes())?;
    file.sync_all()?;
    Ok(())
}

fn not_found(name: &str) -> PgServiceError {
    PgServiceError::ServiceNotFound {
        name: name.to_string(),
    }
}

impl ServiceStore for IniFileStore {
    fn service_names(&self, sort_alphabetically: bool) -> Result<Vec<String>> {
        let file = self.load()?;
        let mut names: Vec<String> = file.service_names().into_iter().map(String::from).collect();

        if sort_alphabetically {
            names.sort_by_key(|name| name.to_lowercase());
        }

        Ok(names)
    }

    fn service_config(&self, name: &str) -> Result<ServiceSettings> {
        self.load()?.settings(name).ok_or_else(|| not_found(name))
    }

    fn create_section(&self, name: &str) -> Result<bool> {
        let mut file = self.load()?;
        if !file.add_section(name) {
            debug!(service = name, "service already exists, nothing written");
            return Ok(false);
        }

        self.save(&file)?;
        Ok(true)
    }

    fn replace_settings(&self, name: &str, settings: &ServiceSettings) -> Result<()> {
        check_settings(settings)?;

        self.update(|file| {
            if file.replace_settings(name, settings) {
                Ok(())
            } else {
                Err(not_found(name))
            }
        })
    }

    fn remove_service(&self, name: &str) -> Result<()> {
        self.update(|file| {
            if file.remove_section(name) {
                Ok(())
            } else {
                Err(not_found(name))
            }
        })
    }

    fn rename_service(&self, name: &str, new_name: &str) -> Result<()> {
        self.update(|file| {
            if file.contains(new_name) {
                return Err(PgServiceError::ServiceAlreadyExists {
                    name: new_name.to_string(),
                });
            }
            let section = file.section_mut(name).ok_or_else(|| not_found(name))?;
            section.name = new_name.to_string();
            Ok(())
        })
    }
}
