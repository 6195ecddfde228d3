use std::sync::Arc;

use tokenomics::{
    apis::ApiManager,
    arguments::{get_enabled_debug_modes, is_clear_cache_enabled, is_help_requested, is_once_enabled, print_help},
    cache,
    config,
    logger::{self, LogTag},
    tokenomics::TokenomicsAggregator,
    webserver::{self, AppState},
};

/// Main entry point for the tokenomics service
///
/// Modes:
/// - `--help`: print usage and exit
/// - `--clear-cache`: flush the cache backend and exit
/// - `--once`: aggregate once, print the JSON record and exit
/// - default: serve the HTTP API until Ctrl-C
#[tokio::main]
async fn main() {
    if is_help_requested() {
        print_help();
        std::process::exit(0);
    }

    logger::init();
    logger::info(LogTag::System, "🚀 Tokenomics service starting up...");

    let debug_modes = get_enabled_debug_modes();
    if !debug_modes.is_empty() {
        logger::info(
            LogTag::System,
            &format!("Debug modes enabled: {}", debug_modes.join(", ")),
        );
    }

    if let Err(e) = run().await {
        logger::error(LogTag::System, &e);
        logger::flush();
        std::process::exit(1);
    }

    logger::flush();
}

async fn run() -> Result<(), String> {
    let cfg = config::load_config()?;
    logger::info(
        LogTag::Config,
        &format!(
            "Configuration loaded (cache backend={}, namespace={})",
            cfg.cache.backend, cfg.cache.namespace
        ),
    );

    let cache_manager = cache::build_cache_manager(&cfg.cache).await;

    // =========================================================================
    // SPECIAL MODES (execute and exit)
    // =========================================================================

    if is_clear_cache_enabled() {
        return if cache_manager.clear_all().await {
            logger::info(LogTag::System, "✅ Cache cleared");
            Ok(())
        } else {
            Err("Failed to clear cache".to_string())
        };
    }

    if cfg.tokenomics.token_address.is_empty() {
        logger::warning(
            LogTag::Config,
            "TOKEN_ADDRESS is not set - tokenomics requests will fail",
        );
    }

    let api_manager = Arc::new(ApiManager::from_config(&cfg.providers)?);
    let aggregator = Arc::new(TokenomicsAggregator::new(
        cache_manager,
        api_manager.moralis.clone(),
        api_manager.birdeye.clone(),
        &cfg.tokenomics,
    ));

    if is_once_enabled() {
        let data = aggregator.aggregate().await.map_err(|e| e.to_string())?;
        let json = serde_json::to_string_pretty(&data)
            .map_err(|e| format!("Failed to encode result: {}", e))?;
        println!("{}", json);
        return Ok(());
    }

    // =========================================================================
    // SERVICE MODE
    // =========================================================================

    ctrlc::set_handler(|| {
        logger::info(LogTag::System, "🛑 Ctrl-C received, shutting down...");
        webserver::shutdown();
    })
    .map_err(|e| format!("Failed to install Ctrl-C handler: {}", e))?;

    let state = Arc::new(AppState::new(aggregator, api_manager));
    webserver::start_server(state, &cfg.webserver).await?;

    logger::info(LogTag::System, "👋 Tokenomics service stopped");
    Ok(())
}
