use crate::cli::commands::edit::{parse_assignment, warn_unusual};
use crate::cli::context::Context;
use crate::cli::output;
use crate::core::errors::{PgServiceError, Result};
use crate::core::models::service_settings::ServiceSettings;
use crate::core::models::setting_descriptor::settings_template;

/// Execute the `pgsvc create` command.
///
/// With `--template` (or `use_template` in the config) the service starts
/// from the host/port/dbname defaults; `--set` values are applied on top.
pub fn execute(ctx: &Context, name: &str, assignments: &[String], template: bool) -> Result<()> {
    let editor = ctx.editor()?;

    let mut settings = if template || ctx.config.new_service.use_template {
        settings_template()
    } else {
        ServiceSettings::new()
    };

    for assignment in assignments {
        let (key, value) = parse_assignment(assignment)?;
        warn_unusual(&key, &value);
        settings.insert(key, value);
    }

    if !editor.create_service(name, &settings)? {
        return Err(PgServiceError::ServiceAlreadyExists {
            name: name.to_string(),
        });
    }

    output::success(&format!(
        "Service '{name}' created with {} setting(s)",
        settings.len()
    ));

    let empty = editor.validate_settings(&settings);
    if !empty.is_empty() {
        output::warning(&format!(
            "Settings with empty values: {}",
            empty.join(", ")
        ));
    }

    Ok(())
}
