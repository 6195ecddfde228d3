use clap::Parser;
use std::error::Error;
use tokenomics::apis::MoralisClient;
use tokenomics::config::{self, get_config_clone};

#[derive(Parser)]
#[command(name = "debug_moralis")]
#[command(about = "Debug tool for the Moralis token price API", long_about = None)]
struct Args {
    /// Token mint address (defaults to tokenomics.token_address)
    #[arg(short, long)]
    mint: Option<String>,

    /// Config file path
    #[arg(short, long, default_value = config::CONFIG_FILE_PATH)]
    config: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    println!("Moralis API Debug Tool\n");
    println!("{}", "=".repeat(80));

    config::set_config(config::load_config_from_path(&args.config)?);
    let cfg = get_config_clone();
    let mint = args.mint.unwrap_or(cfg.tokenomics.token_address);
    if mint.is_empty() {
        return Err("No mint given and TOKEN_ADDRESS is not configured".into());
    }

    let client = MoralisClient::new(&cfg.providers.moralis)?;

    println!("\n[TEST] Fetching token details for {}\n", mint);
    match client.fetch_token_details(&mint).await {
        Ok(details) => println!("{}", serde_json::to_string_pretty(&details)?),
        Err(e) => println!("Failed to fetch token details: {}", e),
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
