use anyhow::Context;
use colored::Colorize;
use tapp_server::{ServerConfig, TappServer};
use tapp_store::SeedData;
use tapp_types::SchemaOptions;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args),
        Command::Seed(args) => cmd_seed(args),
    }
}

fn resolve_config(args: &ServeArgs) -> anyhow::Result<ServerConfig> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(path) = &args.seed_file {
        config.seed = true;
        config.seed_path = Some(path.clone());
    }
    if args.no_seed {
        config.seed = false;
    }
    Ok(config)
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = resolve_config(&args)?;
    println!("{} Trading app on {}", "▶".green().bold(), config.bind_addr.to_string().bold());
    let server = TappServer::new(config).context("initialising stores")?;
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server.serve())?;
    Ok(())
}

fn cmd_seed(args: SeedArgs) -> anyhow::Result<()> {
    let seed = match &args.path {
        Some(path) => SeedData::load(path, &SchemaOptions::default())
            .with_context(|| format!("reading seed file {}", path.display()))?,
        None => SeedData::builtin()?,
    };

    match args.format {
        OutputFormat::Json => {
            let doc = serde_json::json!({ "users": seed.users, "trades": seed.trades });
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
        OutputFormat::Text => {
            println!("{} ({})", "Users".bold(), seed.users.len());
            for user in &seed.users {
                let degrees: Vec<String> = user
                    .degrees()
                    .iter()
                    .map(|d| format!("{} since {}", d.type_degree, d.created_at.date()))
                    .collect();
                println!(
                    "  {:>3}  {:<6} {:<9} {}",
                    user.id.to_string().yellow(),
                    user.name.bold(),
                    user.role.cyan(),
                    degrees.join(", ").dimmed()
                );
            }
            println!("{} ({})", "Trades".bold(), seed.trades.len());
            for t in &seed.trades {
                let side = if t.side == "sell" { t.side.red() } else { t.side.green() };
                println!(
                    "  {:>3}  user {:<3} {:<4} {:<4} {:>10.2} x {}",
                    t.id.to_string().yellow(),
                    t.user_id,
                    side,
                    t.currency,
                    t.price,
                    t.amount
                );
            }
        }
    }
    Ok(())
}
