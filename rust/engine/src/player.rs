use serde::{Deserialize, Serialize};

use crate::errors::CasinoError;
use crate::{Chips, MAX_BALANCE};

/// Most recent activity entries kept per player.
pub const HISTORY_LIMIT: usize = 10;

/// A registered casino player as persisted by the player store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Unique identifier, stored upper case
    pub id: String,
    pub name: String,
    pub initial_balance: Chips,
    pub current_balance: Chips,
    /// Human-readable activity lines, oldest first
    #[serde(default)]
    pub history: Vec<String>,
}

impl Player {
    pub fn new(id: impl Into<String>, name: impl Into<String>, initial_balance: Chips) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            initial_balance,
            current_balance: initial_balance,
            history: Vec::new(),
        }
    }

    /// Appends an activity line, evicting the oldest beyond [`HISTORY_LIMIT`].
    pub fn append_activity(&mut self, text: impl Into<String>) {
        self.history.push(text.into());
        if self.history.len() > HISTORY_LIMIT {
            let excess = self.history.len() - HISTORY_LIMIT;
            self.history.drain(..excess);
        }
    }

    /// Adds a signed change to the current balance and returns the result.
    /// The balance is left as it was when the result would leave the range
    /// accepted by [`validate_balance`].
    pub fn credit(&mut self, delta: Chips) -> Result<Chips, CasinoError> {
        let next = validate_balance(self.current_balance.saturating_add(delta))?;
        self.current_balance = next;
        Ok(next)
    }

    /// Current balance minus the balance the player registered with.
    pub fn net_result(&self) -> Chips {
        self.current_balance - self.initial_balance
    }
}

/// Checks that a balance lies in `0..=MAX_BALANCE`.
///
/// # Examples
///
/// ```
/// use casino_engine::errors::CasinoError;
/// use casino_engine::player::validate_balance;
/// use casino_engine::MAX_BALANCE;
///
/// assert_eq!(validate_balance(0), Ok(0));
/// assert_eq!(validate_balance(MAX_BALANCE), Ok(MAX_BALANCE));
/// assert!(matches!(validate_balance(-1), Err(CasinoError::BalanceOutOfRange { .. })));
/// ```
pub fn validate_balance(amount: Chips) -> Result<Chips, CasinoError> {
    if !(0..=MAX_BALANCE).contains(&amount) {
        return Err(CasinoError::BalanceOutOfRange { amount });
    }
    Ok(amount)
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Player: {} | ID: {} | Balance: ${}",
            self.name, self.id, self.current_balance
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_player_starts_at_initial_balance() {
        let p = Player::new("ANA1", "Ana", 1500);
        assert_eq!(p.current_balance, 1500);
        assert_eq!(p.net_result(), 0);
        assert!(p.history.is_empty());
    }

    #[test]
    fn history_keeps_last_ten_entries() {
        let mut p = Player::new("ANA1", "Ana", 1500);
        for i in 0..15 {
            p.append_activity(format!("entry {}", i));
        }
        assert_eq!(p.history.len(), HISTORY_LIMIT);
        assert_eq!(p.history.first().map(String::as_str), Some("entry 5"));
        assert_eq!(p.history.last().map(String::as_str), Some("entry 14"));
    }

    #[test]
    fn credit_refuses_to_leave_the_balance_range() {
        let mut p = Player::new("ANA1", "Ana", MAX_BALANCE - 10);
        assert_eq!(p.credit(10), Ok(MAX_BALANCE));
        assert_eq!(
            p.credit(1),
            Err(CasinoError::BalanceOutOfRange {
                amount: MAX_BALANCE + 1
            })
        );
        assert_eq!(
            p.credit(Chips::MAX),
            Err(CasinoError::BalanceOutOfRange { amount: Chips::MAX })
        );
        assert_eq!(p.current_balance, MAX_BALANCE);
        assert!(p.credit(-MAX_BALANCE - 1).is_err());
        assert_eq!(p.credit(-MAX_BALANCE), Ok(0));
    }

    #[test]
    fn missing_history_deserializes_as_empty() {
        let json = r#"{"id":"B","name":"Bo","initial_balance":10,"current_balance":20}"#;
        let p: Player = serde_json::from_str(json).unwrap();
        assert!(p.history.is_empty());
        assert_eq!(p.net_result(), 10);
    }
}
