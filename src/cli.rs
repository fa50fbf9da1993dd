use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "svcreg")]
#[command(about = "Service Registry - Manage services across pluggable backends")]
pub struct Cli {
    /// Config file path (defaults to service-registry.yaml, searched upwards)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Additional service type to manage (can be repeated)
    #[arg(short, long = "filter", value_name = "TYPE")]
    pub filter: Vec<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List registered services and their current state
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show backend information about a service
    Info {
        /// Service type
        service_type: String,
        /// Service id
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Start a service if it is stopped
    Start {
        /// Service type
        service_type: String,
        /// Service id
        id: String,
    },
    /// Stop a service if it is active
    Stop {
        /// Service type
        service_type: String,
        /// Service id
        id: String,
    },
    /// Restart a service if it is active
    Restart {
        /// Service type
        service_type: String,
        /// Service id
        id: String,
    },
    /// List configured backends and the service types they support
    Factories,
}
