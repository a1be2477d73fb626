use crate::cli::context::Context;
use crate::core::errors::Result;

/// Execute the `pgsvc export` command.
///
/// Prints the service as a bare `[name]` block, ready to paste into
/// another service file.
pub fn execute(ctx: &Context, name: &str) -> Result<()> {
    let editor = ctx.editor()?;
    print!("{}", editor.render_service(name)?);
    Ok(())
}
