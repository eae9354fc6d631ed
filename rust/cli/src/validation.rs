//! Input parsing and validation for interactive commands.
//!
//! Handles turn decisions at the Blackjack table, yes/no prompts at the slot
//! machine, player ids, and the optimizer's numeric limits.

use casino_engine::{Chips, MAX_BALANCE};
use casino_engine::game::TurnAction;

/// Result of parsing one line typed during a Blackjack round.
#[derive(Debug, PartialEq)]
pub enum ParseResult {
    /// Valid turn decision
    Action(TurnAction),
    /// User entered quit command (q or quit)
    Quit,
    /// Invalid input with error message
    Invalid(String),
}

/// Parse user input into a turn decision.
///
/// Accepts (case-insensitive) "h" / "hit", "s" / "stand", and "q" / "quit".
///
/// # Example
///
/// ```rust
/// # use casino_cli::validation::{parse_turn_action, ParseResult};
/// use casino_engine::game::TurnAction;
///
/// assert_eq!(parse_turn_action("H"), ParseResult::Action(TurnAction::Hit));
/// assert_eq!(parse_turn_action("stand"), ParseResult::Action(TurnAction::Stand));
/// assert_eq!(parse_turn_action("q"), ParseResult::Quit);
/// assert!(matches!(parse_turn_action("double"), ParseResult::Invalid(_)));
/// ```
pub fn parse_turn_action(input: &str) -> ParseResult {
    let input = input.trim().to_lowercase();
    match input.as_str() {
        "" => ParseResult::Invalid("Empty input".to_string()),
        "q" | "quit" => ParseResult::Quit,
        "h" | "hit" => ParseResult::Action(TurnAction::Hit),
        "s" | "stand" => ParseResult::Action(TurnAction::Stand),
        other => ParseResult::Invalid(format!(
            "Unrecognized action '{}'. Valid actions: hit (h), stand (s), quit (q)",
            other
        )),
    }
}

/// `Some(true)` for yes, `Some(false)` for no, `None` for anything else.
pub fn parse_yes_no(input: &str) -> Option<bool> {
    match input.trim().to_lowercase().as_str() {
        "y" | "yes" | "s" | "si" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Player ids are stored upper case with surrounding whitespace removed.
///
/// ```rust
/// # use casino_cli::validation::normalize_player_id;
/// assert_eq!(normalize_player_id(" ana7 "), Ok("ANA7".to_string()));
/// assert!(normalize_player_id("  ").is_err());
/// assert!(normalize_player_id("a b").is_err());
/// ```
pub fn normalize_player_id(raw: &str) -> Result<String, String> {
    let id = raw.trim();
    if id.is_empty() {
        return Err("player id must not be empty".to_string());
    }
    if !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
        return Err(format!(
            "player id '{}' may only contain letters, digits, '-' and '_'",
            id
        ));
    }
    Ok(id.to_ascii_uppercase())
}

pub fn validate_player_name(raw: &str) -> Result<String, String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err("player name must not be empty".to_string());
    }
    Ok(name.to_string())
}

/// Number of turns the optimizer may look ahead, `1..=cap`.
pub fn validate_turns(turns: u32, cap: u32) -> Result<u32, String> {
    if turns == 0 || turns > cap {
        return Err(format!("turns must be between 1 and {} (got {})", cap, turns));
    }
    Ok(turns)
}

/// Balances typed on the command line, `0..=MAX_BALANCE`.
pub fn validate_balance(balance: Chips) -> Result<Chips, String> {
    if !(0..=MAX_BALANCE).contains(&balance) {
        return Err(format!(
            "balance must be between 0 and {} (got {})",
            MAX_BALANCE, balance
        ));
    }
    Ok(balance)
}

pub fn validate_reserve(reserve: Chips) -> Result<Chips, String> {
    if reserve < 0 {
        return Err(format!("reserve must be >= 0 (got {})", reserve));
    }
    Ok(reserve)
}
