use clap::Parser;
use tracing_subscriber::EnvFilter;

use pgsvc::cli::context::Context;
use pgsvc::cli::{self, Cli, Commands};
use pgsvc::config::app_config::AppConfig;
use pgsvc::core::errors::Result;

fn main() {
    let args = Cli::parse();
    init_logging(args.verbose, args.quiet);

    let result = AppConfig::load(args.config.as_deref())
        .and_then(|config| run(&Context::new(config, args.file.clone()), &args.command));

    if let Err(e) = result {
        cli::output::error(&format!("Error: {e}"));
        std::process::exit(1);
    }
}

/// Log to stderr. `RUST_LOG` wins over the verbosity flags.
fn init_logging(verbose: bool, quiet: bool) {
    let level = match (verbose, quiet) {
        (true, _) => "debug",
        (false, true) => "error",
        (false, false) => "warn",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(ctx: &Context, command: &Commands) -> Result<()> {
    match command {
        Commands::Path { create } => cli::commands::path::execute(ctx, *create),
        Commands::List { sort, json } => cli::commands::list::execute(ctx, *sort, *json),
        Commands::Show { name, json } => cli::commands::show::execute(ctx, name, *json),
        Commands::Create {
            name,
            settings,
            template,
        } => cli::commands::create::execute(ctx, name, settings, *template),
        Commands::Set { name, assignments } => {
            cli::commands::edit::execute_set(ctx, name, assignments)
        }
        Commands::Unset { name, keys } => cli::commands::edit::execute_unset(ctx, name, keys),
        Commands::Copy { source, target } => cli::commands::copy::execute(ctx, source, target),
        Commands::Rename { name, new_name } => {
            cli::commands::rename::execute(ctx, name, new_name)
        }
        Commands::Remove { name } => cli::commands::remove::execute(ctx, name),
        Commands::Export { name } => cli::commands::export::execute(ctx, name),
        Commands::Settings { json } => cli::commands::settings::execute(*json),
        Commands::Check { name } => cli::commands::check::execute(ctx, name),
    }
}
