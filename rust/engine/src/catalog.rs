use serde::{Deserialize, Serialize};

use crate::errors::CasinoError;
use crate::Chips;

/// One named wager the strategy search may place.
///
/// `win_probability` is informational: it drives display ordering and the
/// expected-gain column but never which branches the search explores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BetDefinition {
    pub name: String,
    /// Amount put at risk, lost in full on a losing outcome
    pub cost: Chips,
    pub win_probability: f64,
    /// Winnings per unit of cost on a winning outcome
    pub payout_multiplier: f64,
}

impl BetDefinition {
    pub fn new(
        name: impl Into<String>,
        cost: Chips,
        win_probability: f64,
        payout_multiplier: f64,
    ) -> Self {
        Self {
            name: name.into(),
            cost,
            win_probability,
            payout_multiplier,
        }
    }

    /// Balance increase on a win, rounded down to a whole chip.
    pub fn win_payout(&self) -> Chips {
        (self.cost as f64 * self.payout_multiplier).floor() as Chips
    }

    /// `p * cost * multiplier - (1 - p) * cost`
    pub fn expected_gain(&self) -> f64 {
        let cost = self.cost as f64;
        self.win_probability * cost * self.payout_multiplier - (1.0 - self.win_probability) * cost
    }

    pub fn validate(&self) -> Result<(), CasinoError> {
        if self.name.trim().is_empty() {
            return Err(CasinoError::InvalidCatalog("bet name must not be empty".into()));
        }
        if self.cost <= 0 {
            return Err(CasinoError::InvalidCatalog(format!(
                "{}: cost must be > 0",
                self.name
            )));
        }
        if !(self.win_probability > 0.0 && self.win_probability <= 1.0) {
            return Err(CasinoError::InvalidCatalog(format!(
                "{}: win probability must be in (0, 1]",
                self.name
            )));
        }
        if !self.payout_multiplier.is_finite() || self.payout_multiplier < 0.0 {
            return Err(CasinoError::InvalidCatalog(format!(
                "{}: payout multiplier must be >= 0",
                self.name
            )));
        }
        Ok(())
    }
}

pub fn validate_catalog(catalog: &[BetDefinition]) -> Result<(), CasinoError> {
    catalog.iter().try_for_each(BetDefinition::validate)
}

/// The house table of wagers, from low-risk Blackjack stakes to slot jackpots.
pub fn default_catalog() -> Vec<BetDefinition> {
    vec![
        BetDefinition::new("Blackjack Conservative", 100, 0.48, 1.0),
        BetDefinition::new("Blackjack Moderate", 500, 0.45, 1.0),
        BetDefinition::new("Blackjack Aggressive", 1000, 0.42, 1.0),
        BetDefinition::new("Blackjack Premium", 2000, 0.40, 1.0),
        BetDefinition::new("Slots Basic", 100, 0.25, 2.0),
        BetDefinition::new("Slots Medium", 500, 0.20, 3.0),
        BetDefinition::new("Slots Premium", 1000, 0.15, 5.0),
        BetDefinition::new("Slots Jackpot", 2000, 0.10, 10.0),
        BetDefinition::new("Mixed Strategy 1", 300, 0.35, 1.5),
        BetDefinition::new("Mixed Strategy 2", 750, 0.30, 2.5),
    ]
}

/// Catalog entries ordered for display, best expected gain first.
/// Entries with equal expected gain keep their catalog order.
pub fn by_expected_gain(catalog: &[BetDefinition]) -> Vec<&BetDefinition> {
    let mut sorted: Vec<&BetDefinition> = catalog.iter().collect();
    sorted.sort_by(|a, b| b.expected_gain().total_cmp(&a.expected_gain()));
    sorted
}
