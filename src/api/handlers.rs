//! HTTP API handlers.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use alloy::primitives::Address;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use dashmap::DashMap;
use serde::Serialize;
use time::OffsetDateTime;

use crate::market::{BucketCounts, Market, MarketStatus, Snapshot};
use crate::ui::format::short_address;

/// Refresh statistics shown by the status endpoint.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct RefreshStats {
    /// Snapshot refreshes completed since startup.
    pub refreshes: u64,
    /// Bucket counts from the latest snapshot.
    pub counts: BucketCounts,
    /// Markets that loaded in the latest snapshot.
    pub markets_total: usize,
    /// Markets that failed to load in the latest snapshot.
    pub failures: usize,
}

/// Application state shared with handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Whether the first snapshot has landed.
    pub ready: Arc<AtomicBool>,
    /// Connected wallet, if any.
    pub wallet: Option<Address>,
    /// Latest observed block number.
    pub block_number: Arc<AtomicU64>,
    /// Latest snapshot's markets by id.
    pub markets: Arc<DashMap<u64, Market>>,
    /// Refresh statistics.
    pub stats: Arc<tokio::sync::RwLock<RefreshStats>>,
}

impl AppState {
    /// Create new app state for the given session wallet.
    pub fn new(wallet: Option<Address>) -> Self {
        Self {
            ready: Arc::new(AtomicBool::new(false)),
            wallet,
            block_number: Arc::new(AtomicU64::new(0)),
            markets: Arc::new(DashMap::new()),
            stats: Arc::new(tokio::sync::RwLock::new(RefreshStats::default())),
        }
    }

    /// Set ready state.
    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::SeqCst);
    }

    /// Check if ready.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    /// Fold a fresh snapshot into the shared state.
    pub async fn apply_snapshot(&self, snapshot: &Snapshot) {
        self.block_number
            .store(snapshot.block_number, Ordering::SeqCst);

        self.markets.clear();
        for view in &snapshot.markets {
            self.markets.insert(view.market.id, view.market.clone());
        }

        let mut stats = self.stats.write().await;
        stats.refreshes += 1;
        stats.counts = snapshot.bucket_counts();
        stats.markets_total = snapshot.market_count();
        stats.failures = snapshot.failures.len();

        self.set_ready(true);
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: &'static str,
}

/// Readiness check response.
#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    /// Whether the first snapshot has landed.
    pub ready: bool,
    /// Latest observed block number.
    pub block: u64,
}

/// Status response.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// Service status.
    pub status: &'static str,
    /// Shortened wallet address, if connected.
    pub wallet: Option<String>,
    /// Latest observed block number.
    pub block: u64,
    /// Refresh statistics.
    pub stats: RefreshStats,
}

/// One market in the markets listing.
#[derive(Debug, Serialize)]
pub struct MarketSummary {
    /// Market id.
    pub id: u64,
    /// Question text.
    pub question: String,
    /// Display bucket at response time.
    pub status: MarketStatus,
    /// Outcome A label.
    pub option_a: String,
    /// Outcome B label.
    pub option_b: String,
    /// Expiry timestamp.
    pub end_time: i64,
    /// Resolved flag.
    pub resolved: bool,
}

/// Health check handler - always returns 200.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

/// Readiness check handler - returns 200 once a snapshot landed, 503 before.
pub async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    let is_ready = state.is_ready();

    let response = ReadyResponse {
        ready: is_ready,
        block: state.block_number.load(Ordering::SeqCst),
    };

    if is_ready {
        (StatusCode::OK, Json(response))
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Json(response))
    }
}

/// Status handler - returns session info and refresh statistics.
pub async fn status(State(state): State<AppState>) -> impl IntoResponse {
    let stats = *state.stats.read().await;
    let status = if state.is_ready() { "running" } else { "starting" };

    Json(StatusResponse {
        status,
        wallet: state.wallet.map(|a| short_address(&a)),
        block: state.block_number.load(Ordering::SeqCst),
        stats,
    })
}

/// Markets handler - lists the latest snapshot's markets.
pub async fn markets(State(state): State<AppState>) -> impl IntoResponse {
    let now = OffsetDateTime::now_utc().unix_timestamp();

    let mut summaries: Vec<MarketSummary> = state
        .markets
        .iter()
        .map(|entry| {
            let market = entry.value();
            MarketSummary {
                id: market.id,
                question: market.question.clone(),
                status: market.status_at(now),
                option_a: market.option_a.clone(),
                option_b: market.option_b.clone(),
                end_time: market.end_time,
                resolved: market.resolved,
            }
        })
        .collect();
    summaries.sort_by_key(|s| s.id);

    Json(summaries)
}
