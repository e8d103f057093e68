// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker hand evaluator.
//!
//! The evaluator takes the best five cards out of a 5, 6 or 7 cards hand by
//! classifying every 5-cards subset and keeping the highest value.
//!
//! It provides a [HandValue::eval] method that computes a hand value without
//! extracting the best hand, useful for computing odds and other stats, a
//! checked [HandValue::try_eval] for validating untrusted input, and a
//! [HandValue::eval_with_best_hand] that also returns the five best cards,
//! useful for UIs to show a winning hand.
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::{Card, CardsError, Rank, check_distinct};

mod five;

/// Error returned when evaluating an invalid hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EvalError {
    /// Fewer than five cards.
    #[error("insufficient cards: need at least 5 cards, got {0}")]
    InsufficientCards(usize),
    /// More than seven cards.
    #[error("too many cards: at most 7 cards, got {0}")]
    TooManyCards(usize),
    /// The hand contains the same card twice.
    #[error(transparent)]
    InvalidCardSet(#[from] CardsError),
}

/// The hand rank category, from the lowest to the highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HandRank {
    /// No pairs, no draws.
    HighCard = 0,
    /// Two cards of the same rank.
    OnePair,
    /// Two different pairs.
    TwoPair,
    /// Three cards of the same rank.
    ThreeOfAKind,
    /// Five cards in sequence.
    Straight,
    /// Five cards of the same suit.
    Flush,
    /// Three of a kind and a pair.
    FullHouse,
    /// Four cards of the same rank.
    FourOfAKind,
    /// A straight of the same suit, the ace high one is a royal flush.
    StraightFlush,
}

impl HandRank {
    /// Returns all the hand ranks from the lowest to the highest.
    pub fn ranks() -> impl DoubleEndedIterator<Item = HandRank> {
        use HandRank::*;
        [
            HighCard,
            OnePair,
            TwoPair,
            ThreeOfAKind,
            Straight,
            Flush,
            FullHouse,
            FourOfAKind,
            StraightFlush,
        ]
        .into_iter()
    }

    /// The category name shown to users.
    pub fn label(&self) -> &'static str {
        match self {
            HandRank::HighCard => "High Card",
            HandRank::OnePair => "Pair",
            HandRank::TwoPair => "Two Pair",
            HandRank::ThreeOfAKind => "Three of a Kind",
            HandRank::Straight => "Straight",
            HandRank::Flush => "Flush",
            HandRank::FullHouse => "Full House",
            HandRank::FourOfAKind => "Four of a Kind",
            HandRank::StraightFlush => "Straight Flush",
        }
    }

    fn from_bits(bits: u32) -> HandRank {
        match bits {
            0 => HandRank::HighCard,
            1 => HandRank::OnePair,
            2 => HandRank::TwoPair,
            3 => HandRank::ThreeOfAKind,
            4 => HandRank::Straight,
            5 => HandRank::Flush,
            6 => HandRank::FullHouse,
            7 => HandRank::FourOfAKind,
            8 => HandRank::StraightFlush,
            _ => unreachable!("Invalid hand rank {bits}"),
        }
    }
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The value of a poker hand.
///
/// Values are totally ordered, a higher value wins and two hands tie only if
/// they have the same value. A value packs the hand rank and up to five
/// tiebreaker ranks:
///
/// ```text
///   +--------+--------+--------+--------+
///   |xxxxxxxx|hhhh1111|22223333|44445555|
///   +--------+--------+--------+--------+
///   h = hand rank (high card=0,..,straight flush=8)
///   1..5 = tiebreaker rank value (deuce=2,..,ace=14), 0 if unused
/// ```
///
/// tiebreakers are ordered by rank count and then by rank, so that a two pair
/// hand has the high pair, the low pair, and the kicker.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandValue(u32);

impl HandValue {
    const RANK_SHIFT: u32 = 20;

    /// Evaluates a 5, 6, or 7 cards hand.
    ///
    /// Panics if the number of cards is not 5 <= n <= 7, use [HandValue::try_eval]
    /// for input that has not been validated.
    pub fn eval(cards: &[Card]) -> HandValue {
        assert!(
            (5..=7).contains(&cards.len()),
            "Invalid hand size {}",
            cards.len()
        );

        let mut best = HandValue(0);
        for_each_five(cards, |hand| {
            best = best.max(five::eval(hand));
        });

        best
    }

    /// Checks and evaluates a hand.
    ///
    /// Fails if there are fewer than 5 or more than 7 cards or if a card appears
    /// more than once.
    pub fn try_eval(cards: &[Card]) -> Result<HandValue, EvalError> {
        match cards.len() {
            n if n < 5 => return Err(EvalError::InsufficientCards(n)),
            n if n > 7 => return Err(EvalError::TooManyCards(n)),
            _ => {}
        }

        check_distinct(cards)?;
        Ok(Self::eval(cards))
    }

    /// Evaluates a 5, 6, or 7 cards hand and returns the five cards that make
    /// the best hand, ordered by importance.
    ///
    /// Panics if the number of cards is not 5 <= n <= 7.
    pub fn eval_with_best_hand(cards: &[Card]) -> (HandValue, [Card; 5]) {
        assert!(
            (5..=7).contains(&cards.len()),
            "Invalid hand size {}",
            cards.len()
        );

        let mut best = (HandValue(0), [Card::default(); 5]);
        for_each_five(cards, |hand| {
            let value = five::eval(hand);
            if value > best.0 {
                best = (value, *hand);
            }
        });

        let (value, mut hand) = best;
        order_best_hand(value, &mut hand);
        (value, hand)
    }

    /// The hand rank.
    pub fn rank(&self) -> HandRank {
        HandRank::from_bits(self.0 >> Self::RANK_SHIFT)
    }

    /// The ranks used to break ties between hands with the same hand rank,
    /// most significant first.
    pub fn tiebreakers(&self) -> impl Iterator<Item = Rank> + '_ {
        (0..5)
            .rev()
            .map(|pos| ((self.0 >> (pos * 4)) & 0xf) as u8)
            .take_while(|&v| v != 0)
            .filter_map(|v| Rank::from_index(v - 2))
    }

    /// A description of the hand, the hand rank label or "Royal Flush".
    pub fn description(&self) -> &'static str {
        match (self.rank(), self.tiebreakers().next()) {
            (HandRank::StraightFlush, Some(Rank::Ace)) => "Royal Flush",
            (rank, _) => rank.label(),
        }
    }

    /// The packed value.
    pub fn value(&self) -> u32 {
        self.0
    }

    fn new(rank: HandRank, tiebreakers: &[u8]) -> HandValue {
        debug_assert!(tiebreakers.len() <= 5);

        let mut value = (rank as u32) << Self::RANK_SHIFT;
        for (pos, &rank_idx) in tiebreakers.iter().enumerate() {
            value |= (rank_idx as u32 + 2) << ((4 - pos) * 4);
        }

        HandValue(value)
    }
}

impl fmt::Display for HandValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())?;

        let mut sep = " (";
        for rank in self.tiebreakers() {
            write!(f, "{sep}{rank}")?;
            sep = ", ";
        }

        f.write_str(")")
    }
}

impl fmt::Debug for HandValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandValue")
            .field("rank", &self.rank())
            .field("tiebreakers", &self.tiebreakers().collect::<Vec<_>>())
            .finish()
    }
}

/// Calls the `f` closure for each 5-cards subset of cards.
fn for_each_five<F>(cards: &[Card], mut f: F)
where
    F: FnMut(&[Card; 5]),
{
    let n = cards.len();
    let mut h = [Card::default(); 5];

    for c1 in 0..n {
        h[0] = cards[c1];
        for c2 in (c1 + 1)..n {
            h[1] = cards[c2];
            for c3 in (c2 + 1)..n {
                h[2] = cards[c3];
                for c4 in (c3 + 1)..n {
                    h[3] = cards[c4];
                    for c5 in (c4 + 1)..n {
                        h[4] = cards[c5];
                        f(&h);
                    }
                }
            }
        }
    }
}

/// Sorts the cards by rank count and rank, the wheel ace goes last.
fn order_best_hand(value: HandValue, hand: &mut [Card; 5]) {
    let mut counts = [0u8; 13];
    for c in hand.iter() {
        counts[c.rank_bits() as usize] += 1;
    }

    hand.sort_by(|a, b| {
        let ka = (counts[a.rank_bits() as usize], a.rank());
        let kb = (counts[b.rank_bits() as usize], b.rank());
        kb.cmp(&ka)
    });

    let is_straight = matches!(value.rank(), HandRank::Straight | HandRank::StraightFlush);
    if is_straight && value.tiebreakers().next() == Some(Rank::Five) {
        hand.rotate_left(1);
    }
}
