use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// Highest total a hand can hold without busting.
pub const BLACKJACK: u32 = 21;

/// Scores a Blackjack hand.
///
/// Every ace starts at 11. While the total is over 21 and an ace is still
/// counted high, one ace is demoted to 1. The sum is a single fold over the
/// cards followed by a loop bounded by the number of aces, so arbitrarily long
/// hands cost no stack.
///
/// # Examples
///
/// ```
/// use casino_engine::cards::{Card, Rank};
/// use casino_engine::hand::score;
///
/// let two_aces = [Card::new(Rank::Ace), Card::new(Rank::Ace)];
/// assert_eq!(score(&two_aces), 12);
///
/// let soft_seventeen = [Card::new(Rank::Ace), Card::new(Rank::Six)];
/// assert_eq!(score(&soft_seventeen), 17);
/// ```
pub fn score(cards: &[Card]) -> u32 {
    score_detail(cards).0
}

/// Returns the total together with the number of aces still counted as 11.
fn score_detail(cards: &[Card]) -> (u32, u32) {
    let (mut total, mut high_aces) = cards.iter().fold((0u32, 0u32), |(sum, aces), c| {
        (sum + c.value(), aces + u32::from(c.is_ace()))
    });
    while total > BLACKJACK && high_aces > 0 {
        total -= 10;
        high_aces -= 1;
    }
    (total, high_aces)
}

/// A natural: exactly two cards totalling 21.
pub fn is_blackjack(cards: &[Card]) -> bool {
    cards.len() == 2 && score(cards) == BLACKJACK
}

pub fn is_bust(cards: &[Card]) -> bool {
    score(cards) > BLACKJACK
}

/// True when an ace is still being counted as 11.
pub fn is_soft(cards: &[Card]) -> bool {
    score_detail(cards).1 > 0
}

/// Cards held by the player or the dealer during one round.
/// A hand only ever grows by appending a dealt card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn score(&self) -> u32 {
        score(&self.cards)
    }

    pub fn is_blackjack(&self) -> bool {
        is_blackjack(&self.cards)
    }

    pub fn is_bust(&self) -> bool {
        is_bust(&self.cards)
    }

    pub fn is_soft(&self) -> bool {
        is_soft(&self.cards)
    }

    pub fn last(&self) -> Option<&Card> {
        self.cards.last()
    }
}

impl From<Vec<Card>> for Hand {
    fn from(cards: Vec<Card>) -> Self {
        Self { cards }
    }
}
