use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::debug;

use crate::cards::{full_deck, Card};

/// The working collection of cards a Blackjack round deals from.
///
/// Cards are dealt from the end of the sequence. When a deal finds the shoe
/// empty it is rebuilt from `decks` full decks and reshuffled, so the size is
/// always a multiple of 52 right after a refill.
#[derive(Debug)]
pub struct Shoe {
    cards: Vec<Card>,
    decks: usize,
    rng: ChaCha20Rng,
}

impl Shoe {
    /// Builds a freshly shuffled single-deck shoe.
    pub fn new_with_seed(seed: u64) -> Self {
        Self::with_decks(1, seed)
    }

    pub fn with_decks(decks: usize, seed: u64) -> Self {
        let decks = decks.max(1);
        let mut shoe = Self {
            cards: Vec::new(),
            decks,
            rng: ChaCha20Rng::seed_from_u64(seed),
        };
        shoe.refill();
        shoe
    }

    /// Builds a shoe that deals `order` front to back, then falls back to
    /// seeded refills once exhausted. Used to replay fixed decks.
    pub fn stacked(order: Vec<Card>, seed: u64) -> Self {
        let mut cards = order;
        cards.reverse();
        Self {
            cards,
            decks: 1,
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    pub fn shuffle(&mut self) {
        self.cards.shuffle(&mut self.rng);
    }

    fn refill(&mut self) {
        self.cards.clear();
        for _ in 0..self.decks {
            self.cards.extend(full_deck());
        }
        self.shuffle();
        debug!(cards = self.cards.len(), "shoe refilled");
    }

    pub fn deal_card(&mut self) -> Card {
        loop {
            if let Some(c) = self.cards.pop() {
                return c;
            }
            self.refill();
        }
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn decks(&self) -> usize {
        self.decks
    }
}
