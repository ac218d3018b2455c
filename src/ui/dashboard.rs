//! Tabbed dashboard assembly.

use crate::market::{MarketStatus, Snapshot};

use super::card::{render_card, render_failure};
use super::format::{short_address, token_amount_with_symbol};

/// Render the wallet/session header (the navbar analog).
pub fn render_header(snapshot: &Snapshot, symbol: &str, decimals: u8) -> String {
    let session = match snapshot.wallet {
        Some(address) => {
            let balance = match snapshot.token_balance {
                Some(balance) => token_amount_with_symbol(balance, decimals, symbol),
                None => "balance unavailable".to_string(),
            };
            format!("Wallet: {}   Balance: {}", short_address(&address), balance)
        }
        None => "Read-only session (no wallet connected)".to_string(),
    };

    let counts = snapshot.bucket_counts();
    format!(
        "SportSight\n{}\nBlock: {}   Markets: {} ({} active / {} pending / {} resolved)",
        session,
        snapshot.block_number,
        snapshot.market_count(),
        counts.active,
        counts.pending,
        counts.resolved,
    )
}

/// Render one tab: title plus the cards in its bucket.
pub fn render_tab(snapshot: &Snapshot, status: MarketStatus, decimals: u8) -> String {
    let cards: Vec<String> = snapshot
        .in_bucket(status)
        .map(|view| render_card(view, snapshot.taken_at, decimals))
        .collect();

    let mut out = format!("== {} ==", status.title());
    if cards.is_empty() {
        out.push_str("\nNo markets in this tab.");
    } else {
        for card in cards {
            out.push('\n');
            out.push_str(&card);
        }
    }
    out
}

/// Render the full dashboard: header, one tab or all three, and any
/// markets that failed to load.
pub fn render_dashboard(
    snapshot: &Snapshot,
    tab: Option<MarketStatus>,
    symbol: &str,
    decimals: u8,
) -> String {
    let mut sections = vec![render_header(snapshot, symbol, decimals)];

    match tab {
        Some(status) => sections.push(render_tab(snapshot, status, decimals)),
        None => {
            for status in MarketStatus::ALL {
                sections.push(render_tab(snapshot, status, decimals));
            }
        }
    }

    if !snapshot.failures.is_empty() {
        let mut failed = String::from("== Failed to load ==");
        for failure in &snapshot.failures {
            failed.push('\n');
            failed.push_str(&render_failure(failure));
        }
        sections.push(failed);
    }

    sections.join("\n\n")
}
