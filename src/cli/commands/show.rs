use crate::cli::context::Context;
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::traits::service_store::ServiceStore;

/// Execute the `pgsvc show` command.
pub fn execute(ctx: &Context, name: &str, json: bool) -> Result<()> {
    let editor = ctx.editor()?;
    let settings = editor.store.service_config(name)?;

    if json {
        return output::json(&settings);
    }

    output::header(&format!("[{name}]"));
    if settings.is_empty() {
        output::warning("No settings defined");
    }
    for (key, value) in settings.iter() {
        println!("    {key}={value}");
    }

    Ok(())
}
