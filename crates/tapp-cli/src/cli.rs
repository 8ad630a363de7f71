use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tapp", about = "Trading App — users and trades over HTTP", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP server
    Serve(ServeArgs),
    /// Print the seed dataset
    Seed(SeedArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Address to listen on, overriding the config file
    #[arg(long)]
    pub bind: Option<SocketAddr>,
    /// JSON seed file, overriding the config file
    #[arg(long, conflicts_with = "no_seed")]
    pub seed_file: Option<PathBuf>,
    /// Start with empty stores
    #[arg(long)]
    pub no_seed: bool,
}

#[derive(Args)]
pub struct SeedArgs {
    /// JSON seed file to print instead of the built-in dataset
    pub path: Option<PathBuf>,
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,
}
