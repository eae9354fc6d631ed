//! Branch-and-bound search for the best-case betting sequence.
//!
//! Every turn the search may place any affordable bet from the catalog and
//! follows both hypothetical outcomes: the bet wins (balance grows by the
//! bet's payout) or loses (balance shrinks by its cost). Outcomes are not
//! weighted by probability, so the returned path is the most profitable
//! feasible sequence, not the one with the best expected value.
//!
//! The tree is walked depth first with the win branch of a bet explored in
//! full before its lose branch. The first path to reach a given profit is
//! kept, later paths must beat it strictly.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog::{default_catalog, BetDefinition};
use crate::{Chips, MAX_BALANCE};

/// Balance the search must keep after paying for any bet.
pub const DEFAULT_MINIMUM_RESERVE: Chips = 100;

/// Hypothetical result of one bet on a strategy path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BetResult {
    Win,
    Lose,
}

impl BetResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            BetResult::Win => "WIN",
            BetResult::Lose => "LOSE",
        }
    }
}

/// One step of a strategy path. Immutable once part of a result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BetOutcome {
    pub bet: BetDefinition,
    pub result: BetResult,
    /// Signed balance change of this step
    pub delta: Chips,
    pub resulting_balance: Chips,
}

/// Limits for one search invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    pub max_turns: u32,
    pub minimum_reserve: Chips,
    /// Skip states whose optimistic bound cannot beat the best profit so far
    pub prune: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_turns: 6,
            minimum_reserve: DEFAULT_MINIMUM_RESERVE,
            prune: true,
        }
    }
}

/// Counters describing how much of the tree a search visited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// States entered
    pub nodes: u64,
    /// Completed paths compared against the best
    pub terminals: u64,
    /// States cut by the bound plus lose branches cut by the reserve
    pub pruned: u64,
    /// Times the best path was replaced
    pub improvements: u64,
}

/// Best path found by a search. An empty path with zero profit means no
/// sequence of bets could end ahead of the starting balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strategy {
    pub starting_balance: Chips,
    pub path: Vec<BetOutcome>,
    pub profit: Chips,
    pub stats: SearchStats,
}

impl Strategy {
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    pub fn final_balance(&self) -> Chips {
        self.path
            .last()
            .map(|s| s.resulting_balance)
            .unwrap_or(self.starting_balance)
    }

    /// Return on the starting balance in percent; zero when it is not positive.
    pub fn roi_percent(&self) -> f64 {
        if self.starting_balance <= 0 {
            return 0.0;
        }
        self.profit as f64 / self.starting_balance as f64 * 100.0
    }
}

/// Path entry kept on the search stack; resolved to a [`BetOutcome`] at the end.
#[derive(Debug, Clone, Copy)]
struct Step {
    bet: usize,
    result: BetResult,
    delta: Chips,
    balance: Chips,
}

/// Best profit seen during one invocation. Lives only as long as the search.
#[derive(Debug, Default)]
struct Best {
    path: Vec<Step>,
    profit: Chips,
}

/// Strategy search over a fixed catalog.
///
/// # Examples
///
/// ```
/// use casino_engine::catalog::BetDefinition;
/// use casino_engine::optimizer::{Optimizer, SearchOptions};
///
/// let catalog = vec![BetDefinition::new("even money", 100, 0.5, 1.0)];
/// let options = SearchOptions { max_turns: 2, minimum_reserve: 100, prune: true };
/// let strategy = Optimizer::new(&catalog, options).search(1000);
///
/// assert_eq!(strategy.profit, 200);
/// assert_eq!(strategy.final_balance(), 1200);
/// ```
#[derive(Debug, Clone)]
pub struct Optimizer<'a> {
    catalog: &'a [BetDefinition],
    options: SearchOptions,
}

impl<'a> Optimizer<'a> {
    pub fn new(catalog: &'a [BetDefinition], options: SearchOptions) -> Self {
        Self { catalog, options }
    }

    pub fn options(&self) -> SearchOptions {
        self.options
    }

    /// Runs a full search from `starting_balance`. Each call starts from an
    /// empty best result, so independent runs never influence each other.
    pub fn search(&self, starting_balance: Chips) -> Strategy {
        let mut search = Search {
            catalog: self.catalog,
            options: self.options,
            path: Vec::with_capacity(self.options.max_turns as usize),
            best: Best::default(),
            stats: SearchStats::default(),
        };
        search.explore(starting_balance, 0, 0);

        let Search { best, stats, .. } = search;
        let path: Vec<BetOutcome> = best
            .path
            .iter()
            .map(|s| BetOutcome {
                bet: self.catalog[s.bet].clone(),
                result: s.result,
                delta: s.delta,
                resulting_balance: s.balance,
            })
            .collect();

        info!(
            starting_balance,
            max_turns = self.options.max_turns,
            minimum_reserve = self.options.minimum_reserve,
            profit = best.profit,
            steps = path.len(),
            nodes = stats.nodes,
            pruned = stats.pruned,
            "strategy search finished"
        );

        Strategy {
            starting_balance,
            path,
            profit: best.profit,
            stats,
        }
    }
}

struct Search<'a> {
    catalog: &'a [BetDefinition],
    options: SearchOptions,
    path: Vec<Step>,
    best: Best,
    stats: SearchStats,
}

impl Search<'_> {
    fn affordable(&self, balance: Chips, bet: &BetDefinition) -> bool {
        balance >= bet.cost && balance - bet.cost >= self.options.minimum_reserve
    }

    fn explore(&mut self, balance: Chips, turn: u32, profit: Chips) {
        self.stats.nodes += 1;

        if turn >= self.options.max_turns {
            self.record(profit);
            return;
        }
        if !self.catalog.iter().any(|b| self.affordable(balance, b)) {
            self.record(profit);
            return;
        }

        if self.options.prune {
            let bound = profit.saturating_add(self.optimistic_gain(balance, turn));
            if bound <= self.best.profit {
                self.stats.pruned += 1;
                return;
            }
        }

        let catalog = self.catalog;
        for (idx, bet) in catalog.iter().enumerate() {
            if !self.affordable(balance, bet) {
                continue;
            }

            let gain = bet.win_payout();
            // a win past the balance cap is not a reachable state
            match balance.checked_add(gain).filter(|won| *won <= MAX_BALANCE) {
                Some(won) => {
                    self.path.push(Step {
                        bet: idx,
                        result: BetResult::Win,
                        delta: gain,
                        balance: won,
                    });
                    self.explore(won, turn + 1, profit.saturating_add(gain));
                    self.path.pop();
                }
                None => self.stats.pruned += 1,
            }

            let lost = balance - bet.cost;
            if lost < self.options.minimum_reserve {
                self.stats.pruned += 1;
                continue;
            }
            self.path.push(Step {
                bet: idx,
                result: BetResult::Lose,
                delta: -bet.cost,
                balance: lost,
            });
            self.explore(lost, turn + 1, profit - bet.cost);
            self.path.pop();
        }
    }

    /// Upper bound on the profit still reachable from this state: every
    /// remaining turn plays the biggest affordable payout and wins, with
    /// affordability re-evaluated against the growing balance.
    fn optimistic_gain(&self, balance: Chips, turn: u32) -> Chips {
        let mut temp = balance;
        let mut gain: Chips = 0;
        for _ in turn..self.options.max_turns {
            let best = self
                .catalog
                .iter()
                .filter(|b| self.affordable(temp, b))
                .map(BetDefinition::win_payout)
                .max();
            match best {
                Some(p) => {
                    gain = gain.saturating_add(p);
                    temp = temp.saturating_add(p);
                }
                None => break,
            }
        }
        gain
    }

    fn record(&mut self, profit: Chips) {
        self.stats.terminals += 1;
        if profit > self.best.profit {
            self.best.path.clone_from(&self.path);
            self.best.profit = profit;
            self.stats.improvements += 1;
            debug!(profit, depth = self.path.len(), "new best strategy");
        }
    }
}

/// Searches `catalog` for the most profitable best-case path.
///
/// A bet is affordable when the balance covers its cost and still holds
/// `minimum_reserve` afterwards. Returns an empty path and zero profit when
/// nothing is affordable from the start.
pub fn find_best_strategy(
    starting_balance: Chips,
    max_turns: u32,
    catalog: &[BetDefinition],
    minimum_reserve: Chips,
) -> Strategy {
    let options = SearchOptions {
        max_turns,
        minimum_reserve,
        prune: true,
    };
    Optimizer::new(catalog, options).search(starting_balance)
}

/// [`find_best_strategy`] over the house [`default_catalog`].
pub fn optimize(starting_balance: Chips, max_turns: u32, minimum_reserve: Chips) -> Strategy {
    let catalog = default_catalog();
    find_best_strategy(starting_balance, max_turns, &catalog, minimum_reserve)
}

/// Result of replaying a strategy path against a balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Simulation {
    pub starting_balance: Chips,
    /// Sum of the deltas actually applied
    pub applied_delta: Chips,
    pub final_balance: Chips,
    pub steps_applied: usize,
    /// Index of the first step the balance could not cover, if any
    pub halted_at: Option<usize>,
}

impl Simulation {
    pub fn completed(&self) -> bool {
        self.halted_at.is_none()
    }
}

/// Applies a path's deltas in order, starting from `starting_balance`.
///
/// This replays the theoretical outcomes recorded in the path; it involves
/// no randomness. Replay stops at the first step whose cost exceeds the
/// running balance, or whose delta would overflow it.
///
/// # Examples
///
/// ```
/// use casino_engine::catalog::BetDefinition;
/// use casino_engine::optimizer::{find_best_strategy, simulate};
///
/// let catalog = vec![BetDefinition::new("even money", 100, 0.5, 1.0)];
/// let strategy = find_best_strategy(1000, 3, &catalog, 100);
/// let sim = simulate(&strategy.path, 500);
/// assert_eq!(sim.applied_delta, 300);
/// assert_eq!(sim.final_balance, 800);
/// ```
pub fn simulate(path: &[BetOutcome], starting_balance: Chips) -> Simulation {
    let mut balance = starting_balance;
    let mut applied: Chips = 0;
    let mut steps_applied = 0;
    let mut halted_at = None;

    for (i, step) in path.iter().enumerate() {
        let next = balance
            .checked_add(step.delta)
            .zip(applied.checked_add(step.delta))
            .filter(|_| balance >= step.bet.cost);
        let Some((next, total)) = next else {
            halted_at = Some(i);
            break;
        };
        balance = next;
        applied = total;
        steps_applied += 1;
    }

    info!(
        starting_balance,
        applied_delta = applied,
        steps_applied,
        halted = halted_at.is_some(),
        "strategy simulated"
    );

    Simulation {
        starting_balance,
        applied_delta: applied,
        final_balance: balance,
        steps_applied,
        halted_at,
    }
}
