use std::path::Path;

use clap::Parser;
use cli::{Args, Commands};
use context::Context;
use logging::setup_logging;
use riots_config::config::{config_path, generate_default_config, Config};
use riots_core::{sync::SyncOptions, SiteResult};
use tracing::debug;

mod cli;
mod context;
mod list;
mod logging;
mod sync;
mod utils;

fn load_config(path: &Path) -> SiteResult<Config> {
    let config = Config::load(path)?;
    debug!("Loaded configuration from {}", path.display());
    Ok(config)
}

fn handle_cli() -> SiteResult<()> {
    let args = Args::parse();

    setup_logging(&args);

    if args.no_color {
        utils::disable_color();
    }

    let path = config_path(args.config.as_deref());

    match &args.command {
        Commands::DefConfig => generate_default_config(&path)?,
        Commands::Sync {
            destination,
            cf_distribution_id,
            index,
            upload,
        } => {
            let ctx = Context::new(load_config(&path)?, destination)?;
            let options = SyncOptions {
                index: *index,
                upload: *upload,
            };
            sync::sync(&ctx, cf_distribution_id, &options, args.json)?;
        }
        Commands::Event {
            destination,
            cf_distribution_id,
        } => {
            let ctx = Context::new(load_config(&path)?, destination)?;
            sync::event(&ctx, cf_distribution_id)?;
        }
        Commands::List { destination } => {
            let ctx = Context::new(load_config(&path)?, destination)?;
            list::list_releases(&ctx, args.json)?;
        }
    }

    Ok(())
}

fn main() {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))
    .ok();

    if let Err(err) = handle_cli() {
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(1);
    }
}
