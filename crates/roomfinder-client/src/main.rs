//! roomfinder CLI entry point.

use std::process::ExitCode;

use clap::Parser;

use roomfinder_client::cli::{Cli, Command, ConfigAction};
use roomfinder_client::commands;
use roomfinder_client::config::ClientConfig;
use roomfinder_client::error::{ClientError, ClientResult};
use roomfinder_core::{LogFormat, TracingConfig, init_tracing};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut tracing_config = TracingConfig::for_verbosity(cli.verbose);
    if cli.log_json {
        tracing_config = tracing_config.with_format(LogFormat::Json);
    }
    if let Err(e) = init_tracing(tracing_config) {
        eprintln!("warning: {}", e);
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> ClientResult<()> {
    let config = if let Some(ref path) = cli.config {
        ClientConfig::load_from(path).map_err(ClientError::Config)?
    } else {
        ClientConfig::load().unwrap_or_default()
    };
    let config_path = cli.config.clone().unwrap_or_else(ClientConfig::default_path);

    let json = cli.wants_json(config.display.json);
    let now = chrono::Local::now().naive_local();

    match cli.command {
        None => {
            let query = commands::free::landing_query(&config.query, now)?;
            commands::free::run(&config, query, json, cli.limit, now.date()).await
        }
        Some(Command::Free(args)) => {
            let query = if args.is_empty() {
                commands::free::landing_query(&config.query, now)?
            } else {
                commands::free::build_query(&args, &config.query, now)?
            };
            commands::free::run(&config, query, json, cli.limit, now.date()).await
        }
        Some(Command::Rooms) => commands::rooms::run(&config, json, cli.limit).await,
        Some(Command::Schedule { room }) => {
            commands::schedule::run(&config, &room, json, now).await
        }
        Some(Command::Occupancy) => commands::occupancy::run(&config, json).await,
        Some(Command::Route { from, to, open }) => {
            commands::route::run(&config, &from, &to, open).await
        }
        Some(Command::Config { action }) => match action {
            ConfigAction::Dump => commands::config::dump(&config, &config_path),
            ConfigAction::Validate => commands::config::validate(&config),
            ConfigAction::Path => commands::config::path(&config_path),
        },
    }
}
