use crate::cli::context::Context;
use crate::cli::output;
use crate::core::errors::Result;

/// Execute the `pgsvc copy` command.
pub fn execute(ctx: &Context, source: &str, target: &str) -> Result<()> {
    let editor = ctx.editor()?;
    editor.duplicate_service(source, target)?;
    output::success(&format!("Service '{source}' copied to '{target}'"));
    Ok(())
}
