//! Card, money, strategy and catalog formatters for terminal display.
//!
//! Pure functions returning `String`s so commands and tests share one
//! rendering.
//!
//! ## Example
//!
//! ```rust
//! use casino_engine::cards::{Card, Rank};
//! use casino_cli::formatters::{format_hand, format_signed};
//!
//! let hand = [Card::new(Rank::Ace), Card::new(Rank::Six)];
//! assert_eq!(format_hand(&hand), "A 6 (17)");
//! assert_eq!(format_signed(-100), "-$100");
//! ```

use casino_engine::Chips;
use casino_engine::cards::Card;
use casino_engine::catalog::BetDefinition;
use casino_engine::hand::score;
use casino_engine::optimizer::Strategy;

/// Cards separated by spaces, without the score.
pub fn format_cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Cards followed by the hand score in parentheses.
pub fn format_hand(cards: &[Card]) -> String {
    format!("{} ({})", format_cards(cards), score(cards))
}

pub fn format_money(amount: Chips) -> String {
    if amount < 0 {
        format!("-${}", -amount)
    } else {
        format!("${}", amount)
    }
}

/// Money with an explicit sign for gains; zero has none.
pub fn format_signed(amount: Chips) -> String {
    match amount {
        a if a > 0 => format!("+${}", a),
        0 => "$0".to_string(),
        a => format!("-${}", -a),
    }
}

/// Table of catalog entries in the order given.
pub fn format_catalog(entries: &[&BetDefinition]) -> String {
    let mut s = format!(
        "{:<4} {:<24} {:>8} {:>7} {:>6} {:>10} {:>10}\n",
        "#", "BET", "COST", "WIN %", "MULT", "WIN PAYS", "EXP. GAIN"
    );
    s.push_str(&"-".repeat(75));
    s.push('\n');
    for (i, b) in entries.iter().enumerate() {
        s.push_str(&format!(
            "{:<4} {:<24} {:>8} {:>6.1}% {:>5.1}x {:>10} {:>10.2}\n",
            i + 1,
            truncate(&b.name, 24),
            format_money(b.cost),
            b.win_probability * 100.0,
            b.payout_multiplier,
            format_money(b.win_payout()),
            b.expected_gain()
        ));
    }
    s
}

/// Step table plus summary lines for a search result.
pub fn format_strategy(strategy: &Strategy) -> String {
    if strategy.is_empty() {
        return format!(
            "No profitable strategy from {}: no bet is affordable while keeping the reserve.\n",
            format_money(strategy.starting_balance)
        );
    }
    let mut s = format!(
        "{:<4} {:<24} {:>8} {:<6} {:>10} {:>10}\n",
        "TURN", "BET", "COST", "RESULT", "CHANGE", "BALANCE"
    );
    s.push_str(&"-".repeat(67));
    s.push('\n');
    for (i, step) in strategy.path.iter().enumerate() {
        s.push_str(&format!(
            "{:<4} {:<24} {:>8} {:<6} {:>10} {:>10}\n",
            i + 1,
            truncate(&step.bet.name, 24),
            format_money(step.bet.cost),
            step.result.as_str(),
            format_signed(step.delta),
            format_money(step.resulting_balance)
        ));
    }
    s.push_str(&format!(
        "Profit: {} | Final balance: {} | ROI: {:.1}%\n",
        format_signed(strategy.profit),
        format_money(strategy.final_balance()),
        strategy.roi_percent()
    ));
    s
}

fn truncate(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
