use crate::cli::output;
use crate::core::errors::Result;
use crate::core::models::setting_descriptor::{InputKind, PathMode, setting_descriptors};

/// Execute the `pgsvc settings` command.
///
/// Lists the well-known libpq settings with their defaults.
pub fn execute(json: bool) -> Result<()> {
    let descriptors = setting_descriptors();

    if json {
        return output::json(descriptors);
    }

    output::header("Known settings");
    for d in descriptors {
        let default = if d.default.is_empty() { "-" } else { d.default };
        let hint = match d.input {
            InputKind::Plain => String::new(),
            InputKind::Choice { values } => format!(" [{}]", values.join("|")),
            InputKind::Path {
                mode: PathMode::File,
                ..
            } => " [file]".to_string(),
            InputKind::Path {
                mode: PathMode::Directory,
                ..
            } => " [directory]".to_string(),
        };
        println!("    {:<22} {:<10} {}{hint}", d.key, default, d.description);
    }

    Ok(())
}
