//! Market card rendering.

use crate::market::{LoadFailure, MarketStatus, MarketView};

use super::format::{countdown, progress_bar, token_amount};

/// Width of the share-split bar, in cells.
const BAR_WIDTH: usize = 24;

/// Render one market card for the given clock.
///
/// The body varies by display bucket: active markets show the buy prompt,
/// expired-unresolved markets a pending banner, resolved markets the
/// winner and the claim prompt.
pub fn render_card(view: &MarketView, now: i64, decimals: u8) -> String {
    let market = &view.market;
    let (pct_a, pct_b) = market.share_split();

    let mut lines = vec![
        format!("#{} {}", market.id, market.question),
        format!("   {}", countdown(market.end_time, now)),
    ];

    if market.total_shares().is_zero() {
        lines.push(format!(
            "   {} {:>5}% {} {:>5}% {}  (no shares staked yet)",
            market.option_a,
            pct_a,
            progress_bar(pct_a, BAR_WIDTH),
            pct_b,
            market.option_b,
        ));
    } else {
        lines.push(format!(
            "   {} {:>5}% {} {:>5}% {}",
            market.option_a,
            pct_a,
            progress_bar(pct_a, BAR_WIDTH),
            pct_b,
            market.option_b,
        ));
    }

    match market.status_at(now) {
        MarketStatus::Active => {
            lines.push(format!(
                "   Open for buying: {} or {}",
                market.option_a, market.option_b
            ));
        }
        MarketStatus::Pending => {
            lines.push("   Pending resolution".to_string());
        }
        MarketStatus::Resolved => {
            // Classifier guarantees the winner exists in this bucket.
            let winner = market.winning_label().unwrap_or("?");
            lines.push(format!("   Resolved: {} (winnings claimable)", winner));
        }
    }

    if let Some(shares) = &view.shares {
        if !shares.is_empty() {
            lines.push(format!(
                "   Your shares: {} {}, {} {}",
                token_amount(shares.option_a_shares, decimals),
                market.option_a,
                token_amount(shares.option_b_shares, decimals),
                market.option_b,
            ));
        }
    }

    lines.join("\n")
}

/// Placeholder line for a market that failed to load.
pub fn render_failure(failure: &LoadFailure) -> String {
    format!(
        "#{} failed to load: {}",
        failure.market_id, failure.reason
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::MockMarketBuilder;
    use crate::market::{Outcome, SharesBalance};
    use alloy::primitives::U256;

    const NOW: i64 = 1_000_000;

    #[test]
    fn active_card_shows_countdown_and_buy_prompt() {
        let view = MarketView {
            market: MockMarketBuilder::new(3, "Will the home team win?")
                .options("Home", "Away")
                .ends_at(NOW + 7_200)
                .pools(75, 25)
                .build(),
            shares: None,
        };

        let card = render_card(&view, NOW, 0);
        assert!(card.contains("#3 Will the home team win?"));
        assert!(card.contains("Ends in 2h 0m"));
        assert!(card.contains("Open for buying: Home or Away"));
        assert!(card.contains("75%"));
        assert!(card.contains("25%"));
    }

    #[test]
    fn pending_card_shows_banner() {
        let view = MarketView {
            market: MockMarketBuilder::new(0, "Expired?")
                .ends_at(NOW - 60)
                .build(),
            shares: None,
        };

        let card = render_card(&view, NOW, 0);
        assert!(card.contains("Ended 1m 0s ago"));
        assert!(card.contains("Pending resolution"));
    }

    #[test]
    fn resolved_card_names_the_winner() {
        let view = MarketView {
            market: MockMarketBuilder::new(1, "Who wins?")
                .options("Home", "Away")
                .ends_at(NOW - 60)
                .resolved(Outcome::OptionA)
                .build(),
            shares: None,
        };

        let card = render_card(&view, NOW, 0);
        assert!(card.contains("Resolved: Home"));
    }

    #[test]
    fn empty_pool_is_called_out() {
        let view = MarketView {
            market: MockMarketBuilder::new(0, "Fresh?").ends_at(NOW + 60).build(),
            shares: None,
        };

        let card = render_card(&view, NOW, 0);
        assert!(card.contains("no shares staked yet"));
        assert!(card.contains("50%"));
    }

    #[test]
    fn shares_footer_renders_when_held() {
        let view = MarketView {
            market: MockMarketBuilder::new(0, "Held?")
                .options("Yes", "No")
                .ends_at(NOW + 60)
                .pools(1, 1)
                .build(),
            shares: Some(SharesBalance {
                option_a_shares: U256::from(10u64),
                option_b_shares: U256::ZERO,
            }),
        };

        let card = render_card(&view, NOW, 0);
        assert!(card.contains("Your shares: 10 Yes, 0 No"));
    }

    #[test]
    fn empty_shares_footer_is_omitted() {
        let view = MarketView {
            market: MockMarketBuilder::new(0, "Held?").ends_at(NOW + 60).build(),
            shares: Some(SharesBalance::default()),
        };

        let card = render_card(&view, NOW, 0);
        assert!(!card.contains("Your shares"));
    }

    #[test]
    fn failure_placeholder_names_the_market() {
        let line = render_failure(&LoadFailure {
            market_id: 4,
            reason: "rpc error: timeout".to_string(),
        });
        assert!(line.contains("#4"));
        assert!(line.contains("timeout"));
    }
}
