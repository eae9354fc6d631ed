use tracing::debug;

use crate::cards::Card;
use crate::deck::Shoe;
use crate::errors::CasinoError;
use crate::game::{Outcome, Phase, TurnAction, DEALER_STANDS_ON};
use crate::hand::{Hand, BLACKJACK};
use crate::rules::{settle, validate_stake, Settlement};
use crate::{Chips, MAX_BALANCE};

/// Drives one Blackjack round from the opening deal to settlement.
///
/// The engine owns its shoe and both hands. It moves through
/// [`Phase::Dealing`], [`Phase::PlayerTurn`], [`Phase::DealerTurn`],
/// [`Phase::Finished`] and [`Phase::Settled`] and never moves backwards.
///
/// # Examples
///
/// ```
/// use casino_engine::cards::{Card, Rank};
/// use casino_engine::deck::Shoe;
/// use casino_engine::engine::Engine;
/// use casino_engine::game::{Phase, TurnAction};
///
/// // player 10, dealer 9, player 8, dealer 8, then the player's hit card
/// let order = [Rank::Ten, Rank::Nine, Rank::Eight, Rank::Eight, Rank::Two]
///     .into_iter()
///     .map(Card::new)
///     .collect();
/// let mut engine = Engine::new(Shoe::stacked(order, 7));
/// engine.start(100).unwrap();
/// assert_eq!(engine.phase(), Phase::PlayerTurn);
///
/// engine.act(TurnAction::Hit).unwrap();
/// assert_eq!(engine.player().score(), 20);
///
/// engine.act(TurnAction::Stand).unwrap();
/// let settlement = engine.settle().unwrap();
/// assert_eq!(settlement.delta, 100);
/// ```
#[derive(Debug)]
pub struct Engine {
    /// The shoe cards are dealt from
    shoe: Shoe,
    /// Player's cards
    player: Hand,
    /// Dealer's cards; the first one stays hidden during the player turn
    dealer: Hand,
    /// Amount wagered on this round
    stake: Chips,
    phase: Phase,
    player_outcome: Option<Outcome>,
    dealer_outcome: Option<Outcome>,
}

impl Engine {
    pub fn new(shoe: Shoe) -> Self {
        Self {
            shoe,
            player: Hand::new(),
            dealer: Hand::new(),
            stake: 0,
            phase: Phase::Dealing,
            player_outcome: None,
            dealer_outcome: None,
        }
    }

    /// Deals the opening cards and resolves an immediate player blackjack.
    pub fn start(&mut self, stake: Chips) -> Result<Phase, CasinoError> {
        if self.phase != Phase::Dealing {
            return Err(CasinoError::HandAlreadyComplete);
        }
        if stake <= 0 || stake > MAX_BALANCE {
            return Err(CasinoError::InvalidBetAmount { amount: stake });
        }
        self.stake = stake;

        // player, dealer, player, dealer
        for _ in 0..2 {
            let c = self.shoe.deal_card();
            self.player.push(c);
            let c = self.shoe.deal_card();
            self.dealer.push(c);
        }

        if self.player.is_blackjack() {
            self.player_outcome = Some(Outcome::Blackjack);
            self.dealer_outcome = Some(if self.dealer.is_blackjack() {
                Outcome::Blackjack
            } else {
                Outcome::Stand
            });
            self.phase = Phase::Finished;
        } else {
            self.phase = Phase::PlayerTurn;
        }
        debug!(
            player = self.player.score(),
            dealer_up = self.dealer_upcard().map(|c| c.value()),
            phase = ?self.phase,
            "opening deal"
        );
        Ok(self.phase)
    }

    /// Applies one player decision. Standing runs the dealer turn to completion.
    pub fn act(&mut self, action: TurnAction) -> Result<Phase, CasinoError> {
        match self.phase {
            Phase::Dealing => return Err(CasinoError::NoHandInProgress),
            Phase::PlayerTurn => {}
            _ => return Err(CasinoError::HandAlreadyComplete),
        }

        match action {
            TurnAction::Hit => {
                let c = self.shoe.deal_card();
                self.player.push(c);
                if self.player.score() > BLACKJACK {
                    self.player_outcome = Some(Outcome::Bust);
                    self.phase = Phase::Finished;
                }
            }
            TurnAction::Stand => {
                self.player_outcome = Some(Outcome::Stand);
                self.phase = Phase::DealerTurn;
                self.play_dealer();
            }
        }
        Ok(self.phase)
    }

    /// Fixed house policy: draw below 17, stand on 17 or more.
    fn play_dealer(&mut self) {
        while self.dealer.score() < DEALER_STANDS_ON {
            let c = self.shoe.deal_card();
            self.dealer.push(c);
        }
        self.dealer_outcome = Some(if self.dealer.score() > BLACKJACK {
            Outcome::Bust
        } else {
            Outcome::Stand
        });
        self.phase = Phase::Finished;
    }

    /// Decides the payout once both sides are done. Can only succeed once.
    pub fn settle(&mut self) -> Result<Settlement, CasinoError> {
        match self.phase {
            Phase::Dealing | Phase::PlayerTurn | Phase::DealerTurn => {
                return Err(CasinoError::NoHandInProgress)
            }
            Phase::Settled => return Err(CasinoError::HandAlreadyComplete),
            Phase::Finished => {}
        }
        let player_outcome = self
            .player_outcome
            .ok_or(CasinoError::NoHandInProgress)?;
        let s = settle(
            &self.player,
            &self.dealer,
            player_outcome,
            self.dealer_outcome,
            self.stake,
        );
        self.phase = Phase::Settled;
        Ok(s)
    }

    /// Checks the stake against a balance before starting.
    pub fn start_with_balance(&mut self, stake: Chips, balance: Chips) -> Result<Phase, CasinoError> {
        validate_stake(stake, balance)?;
        self.start(stake)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn player(&self) -> &Hand {
        &self.player
    }

    pub fn dealer(&self) -> &Hand {
        &self.dealer
    }

    /// The dealer's face-up card (the second one dealt).
    pub fn dealer_upcard(&self) -> Option<&Card> {
        self.dealer.cards().get(1)
    }

    pub fn stake(&self) -> Chips {
        self.stake
    }

    pub fn player_outcome(&self) -> Option<Outcome> {
        self.player_outcome
    }

    pub fn dealer_outcome(&self) -> Option<Outcome> {
        self.dealer_outcome
    }

    pub fn is_round_over(&self) -> bool {
        matches!(self.phase, Phase::Finished | Phase::Settled)
    }
}
