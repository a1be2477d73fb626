use crate::adapters::stores::ini_file_store::IniFileStore;
use crate::cli::context::Context;
use crate::cli::output;
use crate::core::errors::{PgServiceError, Result};
use crate::core::models::setting_descriptor::{InputKind, setting_descriptor};
use crate::core::services::edit_session::EditSession;
use crate::core::services::service_editor::ServiceEditor;
use crate::core::traits::service_store::ServiceStore;

/// Split a `key=value` argument. The value may itself contain `=`.
pub fn parse_assignment(input: &str) -> Result<(String, String)> {
    let invalid = || PgServiceError::InvalidAssignment {
        input: input.to_string(),
    };

    let (key, value) = input.split_once('=').ok_or_else(invalid)?;
    let key = key.trim();
    if key.is_empty() {
        return Err(invalid());
    }

    Ok((key.to_string(), value.trim().to_string()))
}

/// Warn about keys libpq does not know and values outside a fixed choice.
pub fn warn_unusual(key: &str, value: &str) {
    match setting_descriptor(key) {
        None => output::warning(&format!("'{key}' is not a known libpq setting")),
        Some(descriptor) => {
            if let InputKind::Choice { values } = descriptor.input
                && !value.is_empty()
                && !values.iter().any(|v| *v == value)
            {
                output::warning(&format!(
                    "'{value}' is not a valid {key} (expected one of: {})",
                    values.join(", ")
                ));
            }
        }
    }
}

/// Execute the `pgsvc set` command.
pub fn execute_set(ctx: &Context, name: &str, assignments: &[String]) -> Result<()> {
    let editor = ctx.editor()?;
    let mut session = EditSession::new(name, editor.store.service_config(name)?);

    for assignment in assignments {
        let (key, value) = parse_assignment(assignment)?;
        warn_unusual(&key, &value);
        session.set(&key, &value);
    }

    save(&editor, &mut session)
}

/// Execute the `pgsvc unset` command.
pub fn execute_unset(ctx: &Context, name: &str, keys: &[String]) -> Result<()> {
    let editor = ctx.editor()?;
    let mut session = EditSession::new(name, editor.store.service_config(name)?);

    for key in keys {
        if session.remove(key).is_none() {
            output::warning(&format!("'{key}' is not set in service '{name}'"));
        }
    }

    save(&editor, &mut session)
}

fn save(editor: &ServiceEditor<IniFileStore>, session: &mut EditSession) -> Result<()> {
    if !session.is_dirty() {
        output::warning(&format!(
            "Service '{}' already has these settings, nothing to write",
            session.service_name()
        ));
        return Ok(());
    }

    editor.update_service(session.service_name(), session.settings())?;
    session.mark_saved();
    output::success(&format!("Service '{}' updated", session.service_name()));
    Ok(())
}
