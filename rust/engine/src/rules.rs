use serde::{Deserialize, Serialize};

use crate::errors::CasinoError;
use crate::game::Outcome;
use crate::hand::Hand;
use crate::{Chips, MAX_BALANCE};

/// How a finished Blackjack round resolved, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundResult {
    /// Player natural against a dealer without one, pays 3:2
    PlayerBlackjack,
    /// Player went over 21, loses the stake
    PlayerBust,
    /// Dealer went over 21 after the player stood, pays 1:1
    DealerBust,
    /// Both sides hold a natural, stake returned
    BlackjackPush,
    /// Player total beats the dealer, pays 1:1
    PlayerHigher,
    /// Dealer total beats the player, loses the stake
    DealerHigher,
    /// Equal totals, stake returned
    Push,
}

impl RoundResult {
    /// Signed payout ratio applied to the stake as `(numerator, denominator)`.
    pub fn payout_ratio(&self) -> (Chips, Chips) {
        match self {
            RoundResult::PlayerBlackjack => (3, 2),
            RoundResult::DealerBust | RoundResult::PlayerHigher => (1, 1),
            RoundResult::BlackjackPush | RoundResult::Push => (0, 1),
            RoundResult::PlayerBust | RoundResult::DealerHigher => (-1, 1),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RoundResult::PlayerBlackjack => "blackjack",
            RoundResult::PlayerBust => "bust",
            RoundResult::DealerBust => "dealer bust",
            RoundResult::BlackjackPush => "push with blackjack",
            RoundResult::PlayerHigher => "higher score",
            RoundResult::DealerHigher => "dealer higher score",
            RoundResult::Push => "push",
        }
    }
}

/// Computes the signed balance change for a result.
///
/// Winning naturals pay one and a half times the stake, rounded down to a
/// whole chip. Stakes accepted by [`validate_stake`] pay exactly; anything
/// larger saturates at the `Chips` range instead of overflowing.
///
/// # Examples
///
/// ```
/// use casino_engine::rules::{payout, RoundResult};
///
/// assert_eq!(payout(RoundResult::PlayerBlackjack, 100), 150);
/// assert_eq!(payout(RoundResult::PlayerBlackjack, 25), 37);
/// assert_eq!(payout(RoundResult::DealerHigher, 100), -100);
/// assert_eq!(payout(RoundResult::Push, 100), 0);
/// ```
pub fn payout(result: RoundResult, stake: Chips) -> Chips {
    let (num, den) = result.payout_ratio();
    let paid = (i128::from(stake) * i128::from(num)).div_euclid(i128::from(den));
    Chips::try_from(paid).unwrap_or(if paid < 0 { Chips::MIN } else { Chips::MAX })
}

/// Outcome of settling one round: a single signed delta and one log line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub result: RoundResult,
    pub stake: Chips,
    pub delta: Chips,
    pub player_score: u32,
    pub dealer_score: u32,
    pub description: String,
}

/// Decides the payout of a finished round.
///
/// Rules apply in order and the first match wins:
///
/// 1. player blackjack while the dealer hand is not a blackjack
/// 2. player bust
/// 3. dealer bust
/// 4. both hands blackjack
/// 5. player total above dealer total
/// 6. player total below dealer total
/// 7. equal totals
///
/// `dealer_outcome` is `None` when the dealer never played because the
/// player busted.
///
/// # Examples
///
/// ```
/// use casino_engine::cards::{Card, Rank};
/// use casino_engine::game::Outcome;
/// use casino_engine::hand::Hand;
/// use casino_engine::rules::{settle, RoundResult};
///
/// let player = Hand::from(vec![Card::new(Rank::Ace), Card::new(Rank::King)]);
/// let dealer = Hand::from(vec![Card::new(Rank::Ten), Card::new(Rank::Queen)]);
/// let s = settle(&player, &dealer, Outcome::Blackjack, Some(Outcome::Stand), 100);
/// assert_eq!(s.result, RoundResult::PlayerBlackjack);
/// assert_eq!(s.delta, 150);
/// ```
pub fn settle(
    player: &Hand,
    dealer: &Hand,
    player_outcome: Outcome,
    dealer_outcome: Option<Outcome>,
    stake: Chips,
) -> Settlement {
    let player_score = player.score();
    let dealer_score = dealer.score();

    let result = if player_outcome == Outcome::Blackjack && !dealer.is_blackjack() {
        RoundResult::PlayerBlackjack
    } else if player_outcome == Outcome::Bust {
        RoundResult::PlayerBust
    } else if dealer_outcome == Some(Outcome::Bust) {
        RoundResult::DealerBust
    } else if player.is_blackjack() && dealer.is_blackjack() {
        RoundResult::BlackjackPush
    } else if player_score > dealer_score {
        RoundResult::PlayerHigher
    } else if player_score < dealer_score {
        RoundResult::DealerHigher
    } else {
        RoundResult::Push
    };

    let delta = payout(result, stake);
    let verdict = match delta {
        d if d > 0 => format!("won ${}", d),
        d if d < 0 => format!("lost ${}", -d),
        _ => "push".to_string(),
    };
    let description = format!(
        "Blackjack: bet ${} | {} ({}) | {} vs {}",
        stake,
        verdict,
        result.as_str(),
        player_score,
        dealer_score
    );

    Settlement {
        result,
        stake,
        delta,
        player_score,
        dealer_score,
        description,
    }
}

/// Validates a stake against the player's balance.
///
/// # Errors
///
/// - [`CasinoError::InvalidBetAmount`] when the stake is zero, negative or
///   above [`MAX_BALANCE`]
/// - [`CasinoError::InsufficientFunds`] when the stake exceeds the balance
///
/// # Examples
///
/// ```
/// use casino_engine::rules::validate_stake;
/// use casino_engine::errors::CasinoError;
///
/// assert!(validate_stake(100, 500).is_ok());
/// assert!(matches!(validate_stake(0, 500), Err(CasinoError::InvalidBetAmount { .. })));
/// assert!(matches!(validate_stake(600, 500), Err(CasinoError::InsufficientFunds { .. })));
/// ```
pub fn validate_stake(stake: Chips, balance: Chips) -> Result<Chips, CasinoError> {
    if stake <= 0 || stake > MAX_BALANCE {
        return Err(CasinoError::InvalidBetAmount { amount: stake });
    }
    if stake > balance {
        return Err(CasinoError::InsufficientFunds {
            needed: stake,
            available: balance,
        });
    }
    Ok(stake)
}
