use crate::cli::context::Context;
use crate::cli::output;
use crate::core::errors::Result;

/// Execute the `pgsvc remove` command.
pub fn execute(ctx: &Context, name: &str) -> Result<()> {
    let editor = ctx.editor()?;
    editor.remove_service(name)?;
    output::success(&format!("Service '{name}' removed"));
    Ok(())
}
