// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Engine errors.
use thiserror::Error;

use showdown_eval::{CardsError, EvalError, ParseCardError};

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the engine, all of them are validation errors of the
/// caller input except for [Error::Cancelled].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The same card appears more than once across hands and board.
    #[error(transparent)]
    InvalidCardSet(#[from] CardsError),
    /// A card string could not be parsed.
    #[error(transparent)]
    ParseCard(#[from] ParseCardError),
    /// Fewer than five cards to evaluate.
    #[error("insufficient cards: need at least 5 cards, got {0}")]
    InsufficientCards(usize),
    /// More than seven cards to evaluate.
    #[error("too many cards: at most 7 cards, got {0}")]
    TooManyCards(usize),
    /// Fewer than two hands for an equity estimate.
    #[error("insufficient players: need at least 2 hands, got {0}")]
    InsufficientPlayers(usize),
    /// More hands than a table can seat.
    #[error("too many players: at most 10 hands, got {0}")]
    TooManyPlayers(usize),
    /// A board that is not a preflop, flop, turn or river board.
    #[error("invalid board: a board has 0, 3, 4 or 5 cards, got {0}")]
    InvalidBoard(usize),
    /// A hole hand that doesn't have exactly two cards.
    #[error("invalid hole cards: a hand has 2 cards, got {0}")]
    InvalidHoleCards(usize),
    /// The estimate was cancelled by the caller.
    #[error("equity estimate cancelled")]
    Cancelled,
}

impl From<EvalError> for Error {
    fn from(err: EvalError) -> Self {
        match err {
            EvalError::InsufficientCards(n) => Error::InsufficientCards(n),
            EvalError::TooManyCards(n) => Error::TooManyCards(n),
            EvalError::InvalidCardSet(e) => Error::InvalidCardSet(e),
        }
    }
}
