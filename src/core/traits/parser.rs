use std::path::Path;

use crate::core::errors::Result;
use crate::core::models::service_file::ServiceFile;

/// Port for parsing and serializing service files.
pub trait ConfigParser: Send + Sync {
    /// Parse raw file content into a structured `ServiceFile`.
    ///
    /// `origin` is only used to label errors.
    fn parse(&self, content: &str, origin: &Path) -> Result<ServiceFile>;

    /// Serialize a `ServiceFile` back to its file format.
    fn serialize(&self, file: &ServiceFile) -> String;
}
