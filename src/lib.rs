//! Read, edit and write PostgreSQL connection service files.
//!
//! The library is the surface a front end (the `pgsvc` binary, or a
//! GUI) drives: [`PathResolver`] finds the file, [`IniFileStore`] reads
//! and rewrites it, and [`ServiceEditor`] layers service-level
//! operations on top.
//!
//! [`PathResolver`]: core::services::path_resolver::PathResolver
//! [`IniFileStore`]: adapters::stores::ini_file_store::IniFileStore
//! [`ServiceEditor`]: core::services::service_editor::ServiceEditor

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
