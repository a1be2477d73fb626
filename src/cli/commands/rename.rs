use crate::cli::context::Context;
use crate::cli::output;
use crate::core::errors::Result;

/// Execute the `pgsvc rename` command.
pub fn execute(ctx: &Context, name: &str, new_name: &str) -> Result<()> {
    let editor = ctx.editor()?;
    editor.rename_service(name, new_name)?;
    output::success(&format!("Service '{name}' renamed to '{new_name}'"));
    Ok(())
}
