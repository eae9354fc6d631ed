use serde::{Deserialize, Serialize};

/// Where a Blackjack round currently stands.
/// Rounds only move forward through these phases.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum Phase {
    /// Opening cards not dealt yet
    Dealing,
    /// Waiting for the player to hit or stand
    PlayerTurn,
    /// Dealer drawing under the fixed house policy
    DealerTurn,
    /// Both sides done, ready to settle
    Finished,
    /// Payout decided; the round is over
    Settled,
}

/// Terminal result of one side's turn. Set once, never changed.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    /// Two-card 21
    Blackjack,
    /// Went over 21
    Bust,
    /// Stopped drawing at 21 or below
    Stand,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Blackjack => "blackjack",
            Outcome::Bust => "bust",
            Outcome::Stand => "stand",
        }
    }
}

/// The two choices offered to the player on each step of their turn.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum TurnAction {
    /// Draw exactly one card
    Hit,
    /// End the turn
    Stand,
}

/// Score at or above which the dealer must stand.
pub const DEALER_STANDS_ON: u32 = 17;
