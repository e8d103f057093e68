// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Betting metrics and hand evaluation helpers.
use showdown_eval::{Card, HandValue};

use crate::{Board, HoleCards, Result};

/// The percent of the final pot a caller has to put in.
///
/// Facing a bet of 50 into a pot of 100 the caller pays 50 to win 200, the pot
/// odds are 33.3%. Returns 0 if the bet or the pot are not positive.
pub fn pot_odds(bet: f64, pot: f64) -> f64 {
    if !valid_amounts(bet, pot) {
        return 0.0;
    }

    bet / (pot + bet) * 100.0
}

/// The percent of hands that must continue for a bet to not be automatically
/// profitable as a bluff.
///
/// Returns 0 if the bet or the pot are not positive.
pub fn minimum_defense_frequency(bet: f64, pot: f64) -> f64 {
    if !valid_amounts(bet, pot) {
        return 0.0;
    }

    (1.0 - bet / (pot + bet)) * 100.0
}

fn valid_amounts(bet: f64, pot: f64) -> bool {
    bet.is_finite() && pot.is_finite() && bet > 0.0 && pot > 0.0
}

/// The category name of a hand value, a royal flush is a "Straight Flush".
pub fn hand_category_label(value: &HandValue) -> &'static str {
    value.rank().label()
}

/// Evaluates 5 to 7 distinct cards.
pub fn evaluate(cards: &[Card]) -> Result<HandValue> {
    Ok(HandValue::try_eval(cards)?)
}

/// The value of the best hand a player can make with the board.
///
/// Fails before the flop as there are only the hole cards.
pub fn hand_strength(hole: &HoleCards, board: &Board) -> Result<HandValue> {
    let mut cards = hole.cards().to_vec();
    cards.extend_from_slice(board.cards());
    evaluate(&cards)
}

/// The smallest of the players stacks, 0 if there are no stacks.
pub fn effective_stack(stacks: &[f64]) -> f64 {
    stacks
        .iter()
        .copied()
        .filter(|s| s.is_finite())
        .reduce(f64::min)
        .unwrap_or(0.0)
        .max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use showdown_eval::{CardsError, HandRank, parse_cards};

    fn approx(l: f64, r: f64) -> bool {
        (l - r).abs() < 1e-9
    }

    #[test]
    fn pot_odds_and_mdf() {
        assert!(approx(pot_odds(50.0, 100.0), 100.0 / 3.0));
        assert!(approx(minimum_defense_frequency(50.0, 100.0), 200.0 / 3.0));

        assert!(approx(pot_odds(100.0, 100.0), 50.0));
        assert!(approx(minimum_defense_frequency(100.0, 100.0), 50.0));

        // The two add up to 100 for any valid bet.
        for (bet, pot) in [(1.0, 3.0), (7.5, 2.0), (250.0, 1000.0)] {
            assert!(approx(pot_odds(bet, pot) + minimum_defense_frequency(bet, pot), 100.0));
        }
    }

    #[test]
    fn invalid_amounts() {
        assert_eq!(pot_odds(0.0, 100.0), 0.0);
        assert_eq!(pot_odds(50.0, 0.0), 0.0);
        assert_eq!(pot_odds(-10.0, 100.0), 0.0);
        assert_eq!(pot_odds(f64::NAN, 100.0), 0.0);
        assert_eq!(minimum_defense_frequency(0.0, 100.0), 0.0);
        assert_eq!(minimum_defense_frequency(50.0, -1.0), 0.0);
        assert_eq!(minimum_defense_frequency(50.0, f64::INFINITY), 0.0);
    }

    #[test]
    fn category_labels() {
        let royal = evaluate(&parse_cards("Ah Kh Qh Jh Th").unwrap()).unwrap();
        assert_eq!(hand_category_label(&royal), "Straight Flush");
        assert_eq!(royal.description(), "Royal Flush");

        let two_pair = evaluate(&parse_cards("Ah Ad 7c 7s 2d 3h").unwrap()).unwrap();
        assert_eq!(two_pair.rank(), HandRank::TwoPair);
        assert_eq!(hand_category_label(&two_pair), "Two Pair");
    }

    #[test]
    fn evaluate_errors() {
        let cards = parse_cards("Ah Ad 7c 7s 2d 3h 4h 5h").unwrap();
        assert_eq!(evaluate(&cards[..4]), Err(Error::InsufficientCards(4)));
        assert_eq!(evaluate(&cards), Err(Error::TooManyCards(8)));

        let dup = parse_cards("Ah Ad 7c 7s Ah").unwrap();
        assert_eq!(
            evaluate(&dup),
            Err(Error::InvalidCardSet(CardsError::DuplicateCard(dup[0])))
        );
    }

    #[test]
    fn strength_on_each_street() {
        let hole: HoleCards = "AhKh".parse().unwrap();

        let board = Board::default();
        assert_eq!(hand_strength(&hole, &board), Err(Error::InsufficientCards(2)));

        let board: Board = "Qh Jh 2c".parse().unwrap();
        assert_eq!(hand_strength(&hole, &board).unwrap().rank(), HandRank::HighCard);

        let board: Board = "Qh Jh 2c Th".parse().unwrap();
        let value = hand_strength(&hole, &board).unwrap();
        assert_eq!(value.rank(), HandRank::StraightFlush);
        assert_eq!(value.description(), "Royal Flush");
    }

    #[test]
    fn effective_stacks() {
        assert_eq!(effective_stack(&[]), 0.0);
        assert_eq!(effective_stack(&[120.0]), 120.0);
        assert_eq!(effective_stack(&[300.0, 85.5, 1_000.0]), 85.5);
    }
}
