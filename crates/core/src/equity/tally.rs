// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Showdown evaluation and per task counters.
use showdown_eval::{Card, HandValue};

use crate::{Board, HoleCards};

/// Evaluates all players hands on a completed board.
pub(super) struct Showdown<'a> {
    hands: &'a [HoleCards],
    // Two hole cards followed by the five board cards.
    cards: [Card; 7],
    board_len: usize,
    values: Vec<HandValue>,
}

impl<'a> Showdown<'a> {
    pub fn new(hands: &'a [HoleCards], board: &Board) -> Self {
        let mut cards = [Card::default(); 7];
        cards[2..2 + board.len()].copy_from_slice(board.cards());

        Self {
            hands,
            cards,
            board_len: board.len(),
            values: Vec::with_capacity(hands.len()),
        }
    }

    /// Completes the board with the given cards and evaluates every hand.
    pub fn eval(&mut self, completion: &[Card]) -> &[HandValue] {
        debug_assert_eq!(self.board_len + completion.len(), Board::SIZE);
        self.cards[2 + self.board_len..].copy_from_slice(completion);

        self.values.clear();
        for hand in self.hands {
            self.cards[..2].copy_from_slice(&hand.cards());
            self.values.push(HandValue::eval(&self.cards));
        }

        &self.values
    }
}

/// Win and tie credit accumulated over a number of showdowns.
#[derive(Debug, Clone)]
pub(super) struct Tally {
    pub wins: Vec<u64>,
    pub ties: Vec<f64>,
    // Sum of the squared pot share, used for the standard error.
    shares_sq: Vec<f64>,
    pub trials: u64,
}

impl Tally {
    pub fn new(players: usize) -> Self {
        Self {
            wins: vec![0; players],
            ties: vec![0.0; players],
            shares_sq: vec![0.0; players],
            trials: 0,
        }
    }

    /// Credits 1 to a single winner or 1/k to each of k tied winners.
    pub fn add(&mut self, values: &[HandValue]) {
        let Some(&best) = values.iter().max() else {
            return;
        };

        let winners = values.iter().filter(|&&v| v == best).count();
        let share = 1.0 / winners as f64;

        for (idx, &v) in values.iter().enumerate() {
            if v == best {
                if winners == 1 {
                    self.wins[idx] += 1;
                } else {
                    self.ties[idx] += share;
                }

                self.shares_sq[idx] += share * share;
            }
        }

        self.trials += 1;
    }

    /// Adds another tally counters to this one.
    pub fn merge(&mut self, other: &Tally) {
        for (l, r) in self.wins.iter_mut().zip(&other.wins) {
            *l += r;
        }

        for (l, r) in self.ties.iter_mut().zip(&other.ties) {
            *l += r;
        }

        for (l, r) in self.shares_sq.iter_mut().zip(&other.shares_sq) {
            *l += r;
        }

        self.trials += other.trials;
    }

    /// The largest standard error of the players mean pot share.
    pub fn max_std_error(&self) -> f64 {
        if self.trials < 2 {
            return f64::INFINITY;
        }

        let n = self.trials as f64;
        (0..self.wins.len())
            .map(|idx| {
                let mean = (self.wins[idx] as f64 + self.ties[idx]) / n;
                let var = (self.shares_sq[idx] / n - mean * mean).max(0.0);
                (var / (n - 1.0)).sqrt()
            })
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use showdown_eval::parse_cards;

    fn value(s: &str) -> HandValue {
        HandValue::eval(&parse_cards(s).unwrap())
    }

    #[test]
    fn tally_credit() {
        let pair = value("Ah Ad 7c 5s 2d");
        let high = value("Ah Kd 7c 5s 2d");

        let mut tally = Tally::new(3);
        tally.add(&[pair, high, high]);
        tally.add(&[high, pair, pair]);
        tally.add(&[high, high, high]);

        assert_eq!(tally.trials, 3);
        assert_eq!(tally.wins, vec![1, 0, 0]);
        assert!((tally.ties[0] - 1.0 / 3.0).abs() < 1e-12);
        assert!((tally.ties[1] - (0.5 + 1.0 / 3.0)).abs() < 1e-12);

        // Every showdown gives out exactly one pot.
        let total = tally.wins.iter().sum::<u64>() as f64 + tally.ties.iter().sum::<f64>();
        assert!((total - 3.0).abs() < 1e-12);

        let mut merged = Tally::new(3);
        merged.merge(&tally);
        merged.merge(&tally);
        assert_eq!(merged.trials, 6);
        assert_eq!(merged.wins, vec![2, 0, 0]);
    }

    #[test]
    fn std_error() {
        let win = value("Ah Ad 7c 5s 2d");
        let lose = value("Ah Kd 7c 5s 2d");

        let mut tally = Tally::new(2);
        assert!(tally.max_std_error().is_infinite());

        // Always the same winner, no variance.
        for _ in 0..100 {
            tally.add(&[win, lose]);
        }
        assert_eq!(tally.max_std_error(), 0.0);

        // Half and half, the standard error is about 0.5 / sqrt(n).
        for _ in 0..100 {
            tally.add(&[lose, win]);
        }
        let se = tally.max_std_error();
        assert!((se - 0.5 / 199f64.sqrt()).abs() < 1e-3, "{se}");
    }

    #[test]
    fn showdown_values() {
        let hands: [HoleCards; 2] = ["AhAd".parse().unwrap(), "KsKc".parse().unwrap()];
        let board: Board = "2c 7d 9h".parse().unwrap();

        let mut showdown = Showdown::new(&hands, &board);
        let values = showdown.eval(&parse_cards("Kd 3s").unwrap()).to_vec();
        assert_eq!(values[0], value("Ah Ad 2c 7d 9h Kd 3s"));
        assert_eq!(values[1], value("Ks Kc 2c 7d 9h Kd 3s"));
        assert!(values[1] > values[0]);
    }
}
