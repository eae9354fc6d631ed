use thiserror::Error;

use crate::{Chips, MAX_BALANCE};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CasinoError {
    #[error("Player not found: {id}")]
    PlayerNotFound { id: String },
    #[error("A player with id {id} already exists")]
    DuplicatePlayer { id: String },
    #[error("Insufficient funds: needed {needed}, available {available}")]
    InsufficientFunds { needed: Chips, available: Chips },
    #[error("Invalid bet amount: {amount}, must be between 1 and {max}", max = MAX_BALANCE)]
    InvalidBetAmount { amount: Chips },
    #[error("Balance out of range: {amount}, must be between 0 and {max}", max = MAX_BALANCE)]
    BalanceOutOfRange { amount: Chips },
    #[error("Invalid bet catalog: {0}")]
    InvalidCatalog(String),
    #[error("No hand in progress")]
    NoHandInProgress,
    #[error("Hand already complete")]
    HandAlreadyComplete,
    #[error("Player store error: {0}")]
    Store(String),
}

impl From<std::io::Error> for CasinoError {
    fn from(e: std::io::Error) -> Self {
        CasinoError::Store(e.to_string())
    }
}

impl From<serde_json::Error> for CasinoError {
    fn from(e: serde_json::Error) -> Self {
        CasinoError::Store(e.to_string())
    }
}
