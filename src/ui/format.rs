//! Display formatting helpers.

use std::str::FromStr;

use alloy::primitives::utils::format_units;
use alloy::primitives::{Address, U256};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Shorten an address to its `0x1234...abcd` display form.
pub fn short_address(address: &Address) -> String {
    let hex = address.to_string();
    format!("{}...{}", &hex[..6], &hex[hex.len() - 4..])
}

/// Render a raw token amount at the given decimals, trailing zeros trimmed.
pub fn token_amount(value: U256, decimals: u8) -> String {
    let formatted = format_units(value, decimals).unwrap_or_else(|_| value.to_string());
    trim_trailing_zeros(&formatted)
}

/// Render a token amount with its ticker symbol.
pub fn token_amount_with_symbol(value: U256, decimals: u8, symbol: &str) -> String {
    format!("{} {}", token_amount(value, decimals), symbol)
}

/// A token amount as a decimal, for arithmetic in error messages.
///
/// Amounts past Decimal's 28-digit range clamp to its maximum.
pub fn token_amount_decimal(value: U256, decimals: u8) -> Decimal {
    Decimal::from_str(&token_amount(value, decimals)).unwrap_or(Decimal::MAX)
}

fn trim_trailing_zeros(formatted: &str) -> String {
    match formatted.split_once('.') {
        Some((whole, frac)) => {
            let frac = frac.trim_end_matches('0');
            if frac.is_empty() {
                whole.to_string()
            } else {
                format!("{}.{}", whole, frac)
            }
        }
        None => formatted.to_string(),
    }
}

/// Countdown line for a market expiry relative to the observer's clock.
pub fn countdown(end_time: i64, now: i64) -> String {
    let remaining = end_time - now;
    if remaining > 0 {
        format!("Ends in {}", span(remaining))
    } else if remaining == 0 {
        "Ended just now".to_string()
    } else {
        format!("Ended {} ago", span(-remaining))
    }
}

/// Format a positive second count at a granularity fitting its size.
fn span(seconds: i64) -> String {
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3_600;
    let minutes = (seconds % 3_600) / 60;
    let secs = seconds % 60;

    if days > 0 {
        format!("{}d {}h {}m", days, hours, minutes)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}

/// Fixed-width share-split bar for the given option-A percentage.
pub fn progress_bar(pct_a: Decimal, width: usize) -> String {
    let filled = (pct_a * Decimal::from(width as u64) / Decimal::from(100u64))
        .round()
        .to_usize()
        .unwrap_or(0)
        .min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
