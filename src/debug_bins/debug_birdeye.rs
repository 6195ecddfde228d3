use clap::Parser;
use std::error::Error;
use tokenomics::apis::BirdeyeClient;
use tokenomics::config::{self, get_config_clone};

#[derive(Parser)]
#[command(name = "debug_birdeye")]
#[command(about = "Debug tool for the Birdeye market data API", long_about = None)]
struct Args {
    /// Token mint address (defaults to tokenomics.token_address)
    #[arg(short, long)]
    mint: Option<String>,

    /// Chain sent in the x-chain header
    #[arg(long)]
    chain: Option<String>,

    /// Config file path
    #[arg(short, long, default_value = config::CONFIG_FILE_PATH)]
    config: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    println!("Birdeye API Debug Tool\n");
    println!("{}", "=".repeat(80));

    config::set_config(config::load_config_from_path(&args.config)?);
    let mut cfg = get_config_clone();
    if let Some(chain) = args.chain {
        cfg.providers.birdeye.chain = chain;
    }
    let mint = args.mint.unwrap_or(cfg.tokenomics.token_address);
    if mint.is_empty() {
        return Err("No mint given and TOKEN_ADDRESS is not configured".into());
    }

    let client = BirdeyeClient::new(&cfg.providers.birdeye)?;

    println!("\n[TEST] Fetching market data for {} on {}\n", mint, cfg.providers.birdeye.chain);
    match client.fetch_token_market(&mint).await {
        Ok(market) => println!("{}", serde_json::to_string_pretty(&market)?),
        Err(e) => println!("Failed to fetch market data: {}", e),
    }

    println!("\n{}", "=".repeat(80));
    let stats = client.get_stats().await;
    println!("\n[API STATS]");
    println!("Total Requests: {}", stats.total_requests);
    println!("Successful: {}", stats.successful_requests);
    println!("Failed: {}", stats.failed_requests);
    println!("Avg Response Time: {:.2}ms", stats.average_response_time_ms);
    if let Some(err) = stats.last_error {
        println!("Last Error: {}", err);
    }

    Ok(())
}
