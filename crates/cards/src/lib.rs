// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Showdown Poker cards types.
//!
//! This crate define types to create and parse cards:
//!
//! ```
//! # use showdown_cards::{Card, Rank, Suit};
//! let ah = Card::new(Rank::Ace, Suit::Hearts);
//! assert_eq!("Ah".parse::<Card>(), Ok(ah));
//! ```
//!
//! and a [Deck] type for shuffling, sampling, and enumerating the cards that
//! are left once some cards are known.
//!
//! For example to iterate through all the 2-cards subsets of the cards left after
//! two hole cards have been dealt:
//!
//! ```
//! # use showdown_cards::{Card, Deck, Rank, Suit};
//! let hole = [Card::new(Rank::Ace, Suit::Hearts), Card::new(Rank::King, Suit::Hearts)];
//! let deck = Deck::remaining(&hole).unwrap();
//!
//! let mut counter = 0;
//! for pair in deck.combinations(2) {
//!     assert_eq!(pair.len(), 2);
//!     counter += 1;
//! }
//! assert_eq!(counter, 1_225);
//! ```
//!
//! The subsets sequence can be split in contiguous chunks with
//! [Deck::combinations_chunks] to enumerate it from parallel tasks.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod cards;
pub use cards::{Card, ParseCardError, Rank, Suit, parse_cards};

mod deck;
pub use deck::{CardSet, CardsError, Combinations, Deck, MAX_K, check_distinct, nck};
