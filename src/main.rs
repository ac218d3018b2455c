//! SportSight dashboard entry point.

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use alloy::primitives::utils::parse_units;
use alloy::primitives::U256;
use clap::{Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusBuilder;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use sportsight::actions::{self, ActionReceipt};
use sportsight::api::{create_router, AppState};
use sportsight::chain::ChainClient;
use sportsight::config::Config;
use sportsight::market::{MarketStatus, Outcome};
use sportsight::metrics;
use sportsight::ui::format::{short_address, token_amount_with_symbol};
use sportsight::ui::render_dashboard;
use sportsight::utils::shutdown_signal;
use sportsight::wallet::address_from_private_key;

/// SportSight prediction-market dashboard.
#[derive(Parser, Debug)]
#[command(name = "sportsight")]
#[command(about = "Terminal dashboard for the SportSight on-chain prediction market")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Watch the markets, re-rendering on new blocks (default).
    Run {
        /// HTTP server port for health/status endpoints.
        #[arg(short, long)]
        port: Option<u16>,

        /// Only render one tab: active, pending or resolved.
        #[arg(long)]
        tab: Option<String>,
    },

    /// Fetch and render the dashboard once.
    Markets {
        /// Only render one tab: active, pending or resolved.
        #[arg(long)]
        tab: Option<String>,
    },

    /// Show the wallet's token balance and share holdings.
    Balance,

    /// Buy shares in an open market.
    Buy {
        /// Market id.
        #[arg(long)]
        market: u64,

        /// Outcome to back: a or b.
        #[arg(long)]
        outcome: String,

        /// Token amount to spend (e.g. 1.5).
        #[arg(long)]
        amount: String,
    },

    /// Claim winnings from a resolved market.
    Claim {
        /// Market id.
        #[arg(long)]
        market: u64,
    },

    /// Claim the token faucet's fixed amount.
    Faucet,

    /// Check configuration validity.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("sportsight=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    // Initialize metrics
    metrics::init_metrics();

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config().await,
        Some(Command::Markets { tab }) => cmd_markets(tab).await,
        Some(Command::Balance) => cmd_balance().await,
        Some(Command::Buy {
            market,
            outcome,
            amount,
        }) => cmd_buy(market, outcome, amount).await,
        Some(Command::Claim { market }) => cmd_claim(market).await,
        Some(Command::Faucet) => cmd_faucet().await,
        Some(Command::Run { port, tab }) => cmd_run(port, tab).await,
        None => cmd_run(None, None).await,
    }
}

/// Load and validate configuration, or bail with context.
fn load_config() -> anyhow::Result<Config> {
    let config = Config::load()?;
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("configuration validation failed: {}", e))?;
    Ok(config)
}

/// Parse an optional tab name.
fn parse_tab(tab: Option<String>) -> anyhow::Result<Option<MarketStatus>> {
    match tab {
        Some(name) => MarketStatus::from_str(&name)
            .map(Some)
            .map_err(|_| anyhow::anyhow!("unknown tab '{}': use active, pending or resolved", name)),
        None => Ok(None),
    }
}

/// Print an action receipt as a short report.
fn print_receipt(receipt: &ActionReceipt) {
    println!("  Action: {}", receipt.action);
    println!("  Tx: {}", receipt.tx_hash);
    println!("  Status: {}", receipt.status);
    if let Some(block) = receipt.block_number {
        println!("  Block: {}", block);
    }
    println!("  Gas used: {}", receipt.gas_used);
}

/// Check configuration validity.
async fn cmd_check_config() -> anyhow::Result<()> {
    println!("======================================================================");
    println!("SPORTSIGHT - CONFIGURATION CHECK");
    println!("======================================================================");

    // Load configuration
    print!("Loading configuration... ");
    let config = match Config::load() {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("configuration load failed"));
        }
    };

    // Validate configuration
    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("configuration validation failed"));
        }
    }

    // Check private key
    print!("Checking wallet... ");
    match &config.sight_private_key {
        Some(key) => match address_from_private_key(key) {
            Ok(address) => {
                println!("OK");
                println!("  Wallet address: {}", address);
            }
            Err(e) => {
                println!("FAILED");
                println!("  Error: {}", e);
                return Err(anyhow::anyhow!("private key invalid"));
            }
        },
        None => {
            println!("NOT SET");
            println!("  Read-only session: buys and claims disabled");
        }
    }

    // Show configuration summary
    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  RPC URL: {}", config.sight_rpc_url);
    println!("  Chain ID: {}", config.sight_chain_id);
    println!("  Market Contract: {}", config.sight_market_address);
    println!("  Token Contract: {}", config.sight_token_address);
    println!(
        "  Token: {} ({} decimals)",
        config.token_symbol, config.token_decimals
    );
    println!("  Poll Interval: {}s", config.sight_poll_interval_secs);
    println!(
        "  Metrics: {}",
        if config.metrics_enabled {
            "Enabled"
        } else {
            "Disabled"
        }
    );
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Fetch and render the dashboard once.
async fn cmd_markets(tab: Option<String>) -> anyhow::Result<()> {
    let config = load_config()?;
    let tab = parse_tab(tab)?;

    let client = ChainClient::new(&config)?;
    let snapshot = client.fetch_snapshot().await?;

    println!(
        "{}",
        render_dashboard(&snapshot, tab, &config.token_symbol, config.token_decimals)
    );

    Ok(())
}

/// Show the wallet's token balance and share holdings.
async fn cmd_balance() -> anyhow::Result<()> {
    println!("======================================================================");
    println!("SPORTSIGHT - BALANCE CHECK");
    println!("======================================================================");

    let config = load_config()?;
    let client = ChainClient::new(&config)?;

    print!("\n1. Wallet... ");
    let wallet = match client.wallet_address() {
        Some(address) => {
            println!("OK");
            println!("   Address: {}", address);
            address
        }
        None => {
            println!("NOT SET");
            println!("   Read-only session: set SIGHT_PRIVATE_KEY for balances");
            return Ok(());
        }
    };

    print!("\n2. Token balance... ");
    match client.token_balance(wallet).await {
        Ok(balance) => {
            println!("OK");
            println!(
                "   Balance: {}",
                token_amount_with_symbol(balance, config.token_decimals, &config.token_symbol)
            );
        }
        Err(e) => {
            println!("FAILED");
            println!("   Error: {}", e);
        }
    }

    print!("\n3. Share holdings... ");
    let snapshot = client.fetch_snapshot().await?;
    println!("OK");
    let mut held = 0usize;
    for view in &snapshot.markets {
        if let Some(shares) = &view.shares {
            if !shares.is_empty() {
                held += 1;
                println!(
                    "   #{} {}: {} {}, {} {}",
                    view.market.id,
                    view.market.question,
                    sportsight::ui::format::token_amount(
                        shares.option_a_shares,
                        config.token_decimals
                    ),
                    view.market.option_a,
                    sportsight::ui::format::token_amount(
                        shares.option_b_shares,
                        config.token_decimals
                    ),
                    view.market.option_b,
                );
            }
        }
    }
    if held == 0 {
        println!("   No shares held");
    }

    println!("\n======================================================================");
    println!("BALANCE CHECK COMPLETED");
    println!("======================================================================");

    Ok(())
}

/// Buy shares in an open market.
async fn cmd_buy(market: u64, outcome: String, amount: String) -> anyhow::Result<()> {
    let config = load_config()?;
    let outcome = Outcome::from_str(&outcome)
        .map_err(|_| anyhow::anyhow!("unknown outcome '{}': use a or b", outcome))?;
    let amount: U256 = parse_units(&amount, config.token_decimals)
        .map_err(|e| anyhow::anyhow!("invalid amount: {}", e))?
        .into();

    let client = ChainClient::new(&config)?;

    println!("Buying shares in market {} ({})...", market, outcome);
    match actions::buy_shares(&client, market, outcome, amount, config.token_decimals).await {
        Ok(receipt) => {
            println!("BUY CONFIRMED");
            print_receipt(&receipt);
            Ok(())
        }
        Err(e) => {
            error!(market, error = %e, "buy failed");
            println!("BUY FAILED");
            println!("  Error: {}", e);
            Err(e.into())
        }
    }
}

/// Claim winnings from a resolved market.
async fn cmd_claim(market: u64) -> anyhow::Result<()> {
    let config = load_config()?;
    let client = ChainClient::new(&config)?;

    println!("Claiming winnings from market {}...", market);
    match actions::claim_winnings(&client, market).await {
        Ok(receipt) => {
            println!("CLAIM CONFIRMED");
            print_receipt(&receipt);
            Ok(())
        }
        Err(e) => {
            error!(market, error = %e, "claim failed");
            println!("CLAIM FAILED");
            println!("  Error: {}", e);
            Err(e.into())
        }
    }
}

/// Claim the token faucet's fixed amount.
async fn cmd_faucet() -> anyhow::Result<()> {
    let config = load_config()?;
    let client = ChainClient::new(&config)?;

    println!("Claiming faucet tokens...");
    match actions::claim_faucet(&client).await {
        Ok(receipt) => {
            println!("FAUCET CLAIM CONFIRMED");
            print_receipt(&receipt);
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "faucet claim failed");
            println!("FAUCET CLAIM FAILED");
            println!("  Error: {}", e);
            Err(e.into())
        }
    }
}

/// Watch the markets, re-rendering on new blocks.
async fn cmd_run(port_override: Option<u16>, tab: Option<String>) -> anyhow::Result<()> {
    info!("Loading configuration...");
    let config = load_config()?;
    let tab = parse_tab(tab)?;
    let port = port_override.unwrap_or(config.port);

    let client = ChainClient::new(&config)?;
    match client.wallet_address() {
        Some(address) => info!(wallet = %short_address(&address), "wallet connected"),
        None => info!("read-only session, buys and claims disabled"),
    }

    // Install the metrics exporter
    if config.metrics_enabled {
        let addr = SocketAddr::from(([0, 0, 0, 0], config.metrics_port));
        if let Err(e) = PrometheusBuilder::new().with_http_listener(addr).install() {
            warn!(error = %e, "metrics exporter failed to start");
        } else {
            info!("metrics exporter listening on {}", addr);
        }
    }

    // Create app state and start the HTTP server
    let app_state = AppState::new(client.wallet_address());

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);

    let router = create_router(app_state.clone());
    let _server_handle = tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    });

    // Initial snapshot
    let mut last_block = 0u64;
    match client.fetch_snapshot().await {
        Ok(snapshot) => {
            last_block = snapshot.block_number;
            app_state.apply_snapshot(&snapshot).await;
            println!(
                "{}",
                render_dashboard(&snapshot, tab, &config.token_symbol, config.token_decimals)
            );
        }
        Err(e) => {
            warn!(error = %e, "initial snapshot failed, retrying on next poll");
        }
    }

    // Watch loop: poll the block number, refetch on change
    info!(
        interval = config.sight_poll_interval_secs,
        "watching for new blocks"
    );
    loop {
        tokio::select! {
            _ = shutdown_signal() => {
                info!("stopping watch loop");
                break;
            }
            _ = tokio::time::sleep(Duration::from_secs(config.sight_poll_interval_secs)) => {
                let block = match client.block_number().await {
                    Ok(block) => block,
                    Err(e) => {
                        warn!(error = %e, "block number poll failed");
                        continue;
                    }
                };

                if block <= last_block {
                    continue;
                }

                match client.fetch_snapshot().await {
                    Ok(snapshot) => {
                        last_block = snapshot.block_number;
                        app_state.apply_snapshot(&snapshot).await;
                        println!(
                            "{}",
                            render_dashboard(
                                &snapshot,
                                tab,
                                &config.token_symbol,
                                config.token_decimals
                            )
                        );
                    }
                    Err(e) => {
                        // Keep the previous snapshot on a failed refresh
                        warn!(error = %e, "refresh failed");
                    }
                }
            }
        }
    }

    Ok(())
}
