mod cli;
mod commands;
mod output;

use clap::Parser;
use cli::{Cli, Commands};
use output::UserOutput;
use service_registry::{Config, Error as RegistryError, LifecycleCommand, Parser as ConfigParser, Registry};

fn main() {
    if let Err(e) = run() {
        let out = output::CliOutput;
        if let Some(registry_error) = e.downcast_ref::<RegistryError>() {
            out.error(&format!("Error: {}", registry_error.with_suggestion()));
        } else {
            out.error(&format!("Error: {:#}", e));
        }
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = load_config(&cli)?;
    config.filter.extend(cli.filter.iter().cloned());

    let mut registry = Registry::from_config(&config)?;
    let out = output::CliOutput;

    match cli.command {
        Commands::List { json } => commands::run_list(&registry, json, &out),
        Commands::Info {
            service_type,
            id,
            json,
        } => commands::run_info(&registry, &service_type, &id, json, &out),
        Commands::Start { service_type, id } => commands::run_lifecycle(
            &mut registry,
            LifecycleCommand::Start,
            &service_type,
            &id,
            &out,
        ),
        Commands::Stop { service_type, id } => commands::run_lifecycle(
            &mut registry,
            LifecycleCommand::Stop,
            &service_type,
            &id,
            &out,
        ),
        Commands::Restart { service_type, id } => commands::run_lifecycle(
            &mut registry,
            LifecycleCommand::Restart,
            &service_type,
            &id,
            &out,
        ),
        Commands::Factories => commands::run_factories(&registry, &out),
    }
}

/// Explicit `--config` must exist; otherwise fall back to defaults when no
/// config file is found.
fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let parser = ConfigParser::new();
    if let Some(path) = &cli.config {
        return Ok(parser.load_config(path)?);
    }
    match parser.find_config_file() {
        Ok(path) => {
            tracing::debug!("Using config file {}", path.display());
            Ok(parser.load_config(&path)?)
        }
        Err(RegistryError::Config(msg)) => {
            tracing::debug!("{}; using defaults", msg);
            Ok(Config::default())
        }
        Err(e) => Err(e.into()),
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}
