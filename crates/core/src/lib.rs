// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Showdown Poker engine.
//!
//! Hole cards and board types, an equity estimator for 2 to 10 players, and
//! betting metrics such as pot odds and minimum defense frequency.
//!
//! ```
//! # use showdown_core::*;
//! let hole: HoleCards = "AhKh".parse().unwrap();
//! let board: Board = "Qh Jh 2c Th".parse().unwrap();
//! assert_eq!(hand_strength(&hole, &board).unwrap().description(), "Royal Flush");
//!
//! assert_eq!(pot_odds(100.0, 100.0), 50.0);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]

mod error;
pub use error::{Error, Result};

pub mod equity;
pub use equity::{
    CancelToken, EquityOptions, EquityResult, MAX_PLAYERS, Method, Mode, PlayerEquity, estimate,
};

pub mod metrics;
pub use metrics::{
    effective_stack, evaluate, hand_category_label, hand_strength, minimum_defense_frequency,
    pot_odds,
};

pub mod poker;
pub use poker::{Board, HoleCards, Street};

// Reexport eval types.
pub use showdown_eval::{Card, Deck, HandRank, HandValue, Rank, Suit, parse_cards};
