//! Integration tests for the SportSight dashboard.
//!
//! The network tests require SIGHT_RPC_URL, SIGHT_MARKET_ADDRESS and
//! SIGHT_TOKEN_ADDRESS pointing at a live deployment.
//! Run with: cargo test --test integration -- --ignored

use alloy::primitives::U256;
use sportsight::chain::{ChainClient, MockChainClient, MockMarketBuilder};
use sportsight::config::Config;
use sportsight::market::{classify, MarketStatus, Outcome};
use sportsight::ui::render_dashboard;

/// Get a test config from environment.
fn test_config() -> Option<Config> {
    dotenvy::dotenv().ok();

    std::env::var("SIGHT_RPC_URL").ok()?;
    std::env::var("SIGHT_MARKET_ADDRESS").ok()?;
    std::env::var("SIGHT_TOKEN_ADDRESS").ok()?;

    let config = Config::load().ok()?;
    config.validate().ok()?;
    Some(config)
}

/// Test that the node answers and the contract has a market count.
#[tokio::test]
#[ignore = "requires SIGHT_RPC_URL"]
async fn test_market_count() {
    let config = match test_config() {
        Some(c) => c,
        None => {
            println!("Skipping: SIGHT_RPC_URL not set");
            return;
        }
    };

    let client = ChainClient::new(&config).unwrap();

    let count = client.market_count().await;
    assert!(count.is_ok(), "failed to read market count: {:?}", count.err());
    println!("Market count: {}", count.unwrap());
}

/// Test that a full snapshot fetch completes against the deployment.
#[tokio::test]
#[ignore = "requires SIGHT_RPC_URL"]
async fn test_fetch_snapshot() {
    let config = match test_config() {
        Some(c) => c,
        None => {
            println!("Skipping: SIGHT_RPC_URL not set");
            return;
        }
    };

    let client = ChainClient::new(&config).unwrap();

    let snapshot = client.fetch_snapshot().await;
    assert!(snapshot.is_ok(), "snapshot failed: {:?}", snapshot.err());

    let snapshot = snapshot.unwrap();
    println!(
        "Block {}: {} markets loaded, {} failed",
        snapshot.block_number,
        snapshot.market_count(),
        snapshot.failures.len()
    );
    println!(
        "{}",
        render_dashboard(&snapshot, None, &config.token_symbol, config.token_decimals)
    );
}

/// Test that the chain id matches the configured one.
#[tokio::test]
#[ignore = "requires SIGHT_RPC_URL"]
async fn test_chain_id_matches_config() {
    let config = match test_config() {
        Some(c) => c,
        None => {
            println!("Skipping: SIGHT_RPC_URL not set");
            return;
        }
    };

    let client = ChainClient::new(&config).unwrap();
    let chain_id = client.chain_id().await.unwrap();
    assert_eq!(
        chain_id, config.sight_chain_id,
        "node chain id does not match SIGHT_CHAIN_ID"
    );
}

/// Classifier properties, end to end over the public API.
#[test]
fn test_classifier_buckets() {
    let t = 1_800_000_000;

    assert_eq!(classify(false, t, t - 1), MarketStatus::Active);
    assert_eq!(classify(false, t, t + 1), MarketStatus::Pending);
    assert_eq!(classify(true, t, t + 1), MarketStatus::Resolved);

    // Exactly one bucket for every input triple
    for resolved in [false, true] {
        for now in [t - 10, t, t + 10] {
            let status = classify(resolved, t, now);
            let hits = MarketStatus::ALL.iter().filter(|s| **s == status).count();
            assert_eq!(hits, 1);
        }
    }
}

/// A resolved market with outcome index 0 displays the option A label.
#[tokio::test]
async fn test_resolved_winner_renders_option_a() {
    let now = time::OffsetDateTime::now_utc().unix_timestamp();

    let client = MockChainClient::new();
    client.set_market(
        MockMarketBuilder::new(0, "Who takes the final?")
            .options("Falcons", "Ravens")
            .ends_at(now - 60)
            .pools(60, 40)
            .resolved(Outcome::OptionA)
            .build(),
    );

    let snapshot = client.fetch_snapshot(None).await.unwrap();
    let out = render_dashboard(&snapshot, Some(MarketStatus::Resolved), "BETC", 18);
    assert!(out.contains("Resolved: Falcons"));
}

/// Snapshot assembly keeps read-only and connected sessions apart.
#[tokio::test]
async fn test_snapshot_sessions() {
    let now = time::OffsetDateTime::now_utc().unix_timestamp();
    let wallet = alloy::primitives::Address::repeat_byte(0x33);

    let client = MockChainClient::new();
    client.set_market(MockMarketBuilder::new(0, "Open?").ends_at(now + 600).build());
    client.set_token_balance(wallet, U256::from(5u64));

    let read_only = client.fetch_snapshot(None).await.unwrap();
    assert_eq!(read_only.token_balance, None);

    let connected = client.fetch_snapshot(Some(wallet)).await.unwrap();
    assert_eq!(connected.token_balance, Some(U256::from(5u64)));
    assert!(connected.markets[0].shares.is_some());
}
