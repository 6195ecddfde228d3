use clap::{Parser, Subcommand};
use std::error::Error;
use tokenomics::cache;
use tokenomics::config::{self, get_config_clone};

#[derive(Parser)]
#[command(name = "debug_cache")]
#[command(about = "Inspect and manage the tokenomics cache", long_about = None)]
struct Args {
    /// Identifier to inspect (defaults to tokenomics.token_address)
    #[arg(short, long)]
    identifier: Option<String>,

    /// Config file path
    #[arg(short, long, default_value = config::CONFIG_FILE_PATH)]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print backend info, hit rate and derived keys
    Report,
    /// Print the cached record, if any
    Show,
    /// Delete the cached record (statistics are kept)
    Invalidate,
    /// Flush every key in the cache database
    Clear,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    config::set_config(config::load_config_from_path(&args.config)?);
    let cfg = get_config_clone();
    let identifier = args.identifier.unwrap_or(cfg.tokenomics.token_address.clone());

    let manager = cache::build_cache_manager(&cfg.cache).await;

    match args.command {
        Command::Report => {
            let report = manager.performance_report(&identifier).await;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Show => {
            let key = manager.build_data_key(&identifier);
            match manager.store().get::<serde_json::Value>(&key).await {
                cache::StoreResponse::Value(Some(value)) => {
                    println!("{}", serde_json::to_string_pretty(&value)?)
                }
                cache::StoreResponse::Value(None) => println!("No cached record under {}", key),
                cache::StoreResponse::Unavailable => println!("Cache backend unavailable"),
                cache::StoreResponse::Error(e) => println!("Cache error: {}", e),
            }
        }
        Command::Invalidate => {
            if manager.invalidate(&identifier).await {
                println!("Invalidated {}", manager.build_data_key(&identifier));
            } else {
                println!("Nothing removed (no cached record, or backend unavailable)");
            }
        }
        Command::Clear => {
            if manager.clear_all().await {
                println!("Cache cleared");
            } else {
                println!("Clear failed (backend unavailable?)");
            }
        }
    }

    Ok(())
}
