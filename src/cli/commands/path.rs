use crate::cli::context::Context;
use crate::cli::output;
use crate::core::errors::Result;

/// Execute the `pgsvc path` command.
///
/// Prints the resolved service file location and whether it exists.
pub fn execute(ctx: &Context, create: bool) -> Result<()> {
    let path = ctx.resolver().resolve(create)?;

    if path.exists() {
        output::success(&format!("Service file: {}", path.display()));
    } else {
        output::warning(&format!("Service file not found: {}", path.display()));
        println!("    Run 'pgsvc path --create' or set PGSERVICEFILE.");
    }

    Ok(())
}
