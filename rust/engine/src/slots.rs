use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::errors::CasinoError;
use crate::Chips;

/// Default price of a single spin.
pub const SPIN_COST: Chips = 100;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    Cherry,
    Lemon,
    Seven,
    Bar,
    Bell,
}

impl Symbol {
    pub const ALL: [Symbol; 5] = [
        Symbol::Cherry,
        Symbol::Lemon,
        Symbol::Seven,
        Symbol::Bar,
        Symbol::Bell,
    ];

    pub fn glyph(&self) -> &'static str {
        match self {
            Symbol::Cherry => "🍒",
            Symbol::Lemon => "🍋",
            Symbol::Seven => "7️⃣",
            Symbol::Bar => "BAR",
            Symbol::Bell => "🔔",
        }
    }
}

pub type Reels = [Symbol; 3];

/// `None` matches any symbol in that position.
type Pattern = [Option<Symbol>; 3];

const PAYTABLE: [(Pattern, Chips); 14] = {
    use Symbol::*;
    [
        ([Some(Seven), Some(Seven), Some(Seven)], 50_000),
        ([Some(Bar), Some(Bar), Some(Bar)], 25_000),
        ([Some(Cherry), Some(Cherry), Some(Cherry)], 20_000),
        ([Some(Bell), Some(Bell), Some(Bell)], 15_000),
        ([Some(Lemon), Some(Lemon), Some(Lemon)], 10_000),
        ([Some(Seven), None, Some(Seven)], 15_000),
        ([Some(Bar), Some(Bar), None], 10_000),
        ([Some(Bell), Some(Bell), None], 7_000),
        ([Some(Cherry), None, Some(Cherry)], 6_000),
        ([Some(Cherry), Some(Cherry), None], 5_000),
        ([None, Some(Cherry), Some(Cherry)], 5_000),
        ([None, Some(Seven), None], 3_000),
        ([None, Some(Bar), None], 2_000),
        ([Some(Cherry), None, None], 2_000),
    ]
};

/// Prize for a spin: the first paytable row that matches wins, 0 otherwise.
pub fn prize(reels: &Reels) -> Chips {
    PAYTABLE
        .iter()
        .find(|(pattern, _)| {
            pattern
                .iter()
                .zip(reels.iter())
                .all(|(p, s)| p.is_none_or(|want| want == *s))
        })
        .map(|(_, prize)| *prize)
        .unwrap_or(0)
}

pub fn format_reels(reels: &Reels) -> String {
    reels
        .iter()
        .map(Symbol::glyph)
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Result of one paid spin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spin {
    pub reels: Reels,
    pub cost: Chips,
    pub prize: Chips,
    pub balance_after: Chips,
}

impl Spin {
    pub fn net(&self) -> Chips {
        self.prize - self.cost
    }

    /// Activity log line for this spin.
    pub fn describe(&self) -> String {
        if self.prize > 0 {
            format!("Slots: won ${} with {}", self.prize, format_reels(&self.reels))
        } else {
            format!("Slots: lost ${} with {}", self.cost, format_reels(&self.reels))
        }
    }
}

#[derive(Debug)]
pub struct SlotMachine {
    rng: ChaCha20Rng,
    cost: Chips,
}

impl SlotMachine {
    pub fn new_with_seed(seed: u64) -> Self {
        Self::with_cost(seed, SPIN_COST)
    }

    pub fn with_cost(seed: u64, cost: Chips) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
            cost,
        }
    }

    pub fn cost(&self) -> Chips {
        self.cost
    }

    pub fn can_play(&self, balance: Chips) -> bool {
        balance >= self.cost
    }

    pub fn draw(&mut self) -> Reels {
        let mut pick = || Symbol::ALL[self.rng.random_range(0..Symbol::ALL.len())];
        [pick(), pick(), pick()]
    }

    /// Charges the spin cost, draws the reels, and pays the prize.
    pub fn spin(&mut self, balance: Chips) -> Result<Spin, CasinoError> {
        if !self.can_play(balance) {
            return Err(CasinoError::InsufficientFunds {
                needed: self.cost,
                available: balance,
            });
        }
        let reels = self.draw();
        let won = prize(&reels);
        Ok(Spin {
            reels,
            cost: self.cost,
            prize: won,
            balance_after: balance - self.cost + won,
        })
    }
}
