use crate::cli::context::Context;
use crate::cli::output;
use crate::core::errors::{PgServiceError, Result};
use crate::core::traits::service_store::ServiceStore;

/// Execute the `pgsvc check` command.
///
/// Reports settings of a service whose value is blank. Fails when any
/// are found so scripts can gate on it.
pub fn execute(ctx: &Context, name: &str) -> Result<()> {
    let editor = ctx.editor()?;
    let settings = editor.store.service_config(name)?;
    let empty = editor.validate_settings(&settings);

    output::header(&format!("🔍 pgsvc check [{name}]"));

    if empty.is_empty() {
        output::success(&format!("{} settings, all with values", settings.len()));
        return Ok(());
    }

    output::warning(&format!("Settings with empty values ({}):", empty.len()));
    for key in &empty {
        println!("    • {key}");
    }

    Err(PgServiceError::EmptySettingValues { keys: empty })
}
