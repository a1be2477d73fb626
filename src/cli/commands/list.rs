use crate::cli::context::Context;
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::traits::service_store::ServiceStore;

/// Execute the `pgsvc list` command.
pub fn execute(ctx: &Context, sort: bool, json: bool) -> Result<()> {
    let editor = ctx.editor()?;
    let names = editor
        .store
        .service_names(sort || ctx.config.sort_services)?;

    if json {
        return output::json(&names);
    }

    if names.is_empty() {
        output::warning(&format!(
            "No services defined in {}",
            editor.store.path().display()
        ));
        return Ok(());
    }

    output::header(&format!("Services ({})", names.len()));
    for name in &names {
        println!("    • {name}");
    }

    Ok(())
}
