mod cli;
mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::*;

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Configure { host_version, show } => {
            commands::configure::handle(host_version, show)?;
        }

        Commands::Schemas { host_version } => {
            let version = Config::load()?.resolve_host_version(host_version)?;
            commands::layout::schemas(version)?;
        }

        Commands::Layout {
            schema,
            host_version,
            format,
        } => {
            let version = Config::load()?.resolve_host_version(host_version)?;
            commands::layout::show(&schema, version, format)?;
        }

        Commands::Diff { schema, from, to } => {
            commands::layout::diff(&schema, from, to)?;
        }

        Commands::Read {
            dump,
            base,
            schema,
            address,
            host_version,
            raw,
        } => {
            let version = Config::load()?.resolve_host_version(host_version)?;
            commands::dump::read(&dump, &base, &schema, &address, version, raw)?;
        }

        Commands::Walk {
            dump,
            base,
            node,
            address,
            field,
            limit,
            host_version,
        } => {
            let version = Config::load()?.resolve_host_version(host_version)?;
            commands::dump::walk(
                &dump,
                &base,
                &node,
                &address,
                field.as_deref(),
                limit,
                version,
            )?;
        }
    }

    Ok(())
}
