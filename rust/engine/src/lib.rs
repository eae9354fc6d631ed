//! # casino-engine: Casino Simulator Core
//!
//! Game logic for a text-console casino: a single-deck Blackjack table with a
//! fixed dealer policy, a three-reel slot machine, and a betting-strategy
//! optimizer that finds the best-case sequence of wagers by branch-and-bound
//! search. Player records live behind the [`store::PlayerStore`] trait.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card ranks and Blackjack values
//! - [`deck`] - Seeded shoe that refills and reshuffles when empty
//! - [`hand`] - Hand scoring with soft-ace demotion
//! - [`engine`] - Blackjack turn engine (deal, player turn, dealer turn)
//! - [`game`] - Round phases, outcomes and turn actions
//! - [`rules`] - Settlement precedence and payouts
//! - [`catalog`] - Bet definitions used by the optimizer
//! - [`optimizer`] - Strategy search and path simulation
//! - [`session`] - Binding rounds to players and applying balance changes
//! - [`player`] / [`store`] - Player records and persistence
//! - [`slots`] - Slot machine paytable and spins
//! - [`logger`] - JSONL round records
//! - [`errors`] - Error types
//!
//! ## Quick Start
//!
//! ```rust
//! use casino_engine::cards::{Card, Rank};
//! use casino_engine::hand::{is_blackjack, score};
//!
//! let hand = [Card::new(Rank::Ace), Card::new(Rank::King)];
//! assert_eq!(score(&hand), 21);
//! assert!(is_blackjack(&hand));
//! ```
//!
//! ## Strategy Search
//!
//! ```rust
//! use casino_engine::optimizer::optimize;
//!
//! // nothing in the house catalog is affordable with 50 and a reserve of 100
//! let strategy = optimize(50, 4, 100);
//! assert!(strategy.is_empty());
//! assert_eq!(strategy.profit, 0);
//! ```

pub mod cards;
pub mod catalog;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod game;
pub mod hand;
pub mod logger;
pub mod optimizer;
pub mod player;
pub mod rules;
pub mod session;
pub mod slots;
pub mod store;

/// Whole currency units. Signed so deltas and balances share one type.
pub type Chips = i64;

/// Largest balance a player may hold. Stakes are capped at the same value,
/// which keeps a 3:2 payout and every balance update inside `i64`.
pub const MAX_BALANCE: Chips = 1_000_000_000_000_000;
