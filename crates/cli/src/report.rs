// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Commands output.
use serde::Serialize;
use std::io::{self, Write};

use showdown_core::{
    Board, Card, EquityResult, HandValue, HoleCards, Method, Street, hand_category_label,
    hand_strength, minimum_defense_frequency, pot_odds,
};

use crate::units::{Amount, DisplayUnit};

/// A hand evaluation.
#[derive(Debug, Serialize)]
pub struct HandReport {
    description: &'static str,
    category: &'static str,
    tiebreakers: Vec<String>,
    best_hand: Vec<String>,
    value: u32,
}

impl HandReport {
    /// Creates a report for the best five cards of a hand.
    pub fn new(value: HandValue, best: &[Card]) -> Self {
        Self {
            description: value.description(),
            category: hand_category_label(&value),
            tiebreakers: value.tiebreakers().map(|r| r.to_string()).collect(),
            best_hand: best.iter().map(Card::to_string).collect(),
            value: value.value(),
        }
    }

    /// Writes the report as text.
    pub fn write_text(&self, w: &mut impl Write) -> io::Result<()> {
        writeln!(w, "{}", self.description)?;
        writeln!(w, "Category:    {}", self.category)?;
        writeln!(w, "Tiebreakers: {}", self.tiebreakers.join(" "))?;
        writeln!(w, "Best hand:   {}", self.best_hand.join(" "))
    }
}

/// A player line in an equity report.
#[derive(Debug, Serialize)]
struct PlayerReport {
    hand: String,
    win_percent: f64,
    tie_percent: f64,
    equity_percent: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    made_hand: Option<&'static str>,
}

/// An equity estimate.
#[derive(Debug, Serialize)]
pub struct EquityReport {
    board: String,
    street: Street,
    players: Vec<PlayerReport>,
    trials: u64,
    method: Method,
}

impl EquityReport {
    /// Creates a report for the estimate of the given hands.
    pub fn new(hands: &[HoleCards], board: &Board, result: &EquityResult) -> Self {
        let players = hands
            .iter()
            .zip(&result.players)
            .map(|(hand, equity)| PlayerReport {
                hand: hand.to_string(),
                win_percent: equity.win_percent,
                tie_percent: equity.tie_percent,
                equity_percent: equity.equity(),
                made_hand: hand_strength(hand, board).ok().map(|v| v.description()),
            })
            .collect();

        Self {
            board: board.to_string(),
            street: board.street(),
            players,
            trials: result.trials,
            method: result.method,
        }
    }

    /// Writes the report as text.
    pub fn write_text(&self, w: &mut impl Write) -> io::Result<()> {
        if self.board.is_empty() {
            writeln!(w, "{}", self.street)?;
        } else {
            writeln!(w, "{}: {}", self.street, self.board)?;
        }

        writeln!(w, "{:<6} {:>7} {:>7} {:>7}  Hand", "Player", "Win%", "Tie%", "Equity%")?;
        for p in &self.players {
            writeln!(
                w,
                "{:<6} {:>7.2} {:>7.2} {:>7.2}  {}",
                p.hand,
                p.win_percent,
                p.tie_percent,
                p.equity_percent,
                p.made_hand.unwrap_or("N/A")
            )?;
        }

        match self.method {
            Method::Exact => writeln!(w, "Exact, {} boards", self.trials),
            Method::MonteCarlo {
                converged,
                std_error,
            } => writeln!(
                w,
                "Approximate, {} samples, std error {:.2}%{}",
                self.trials,
                std_error * 100.0,
                if converged { "" } else { " (not converged)" }
            ),
        }
    }
}

/// Pot odds for a bet.
#[derive(Debug, Serialize)]
pub struct OddsReport {
    #[serde(skip)]
    bet: Amount,
    #[serde(skip)]
    pot: Amount,
    pot_odds: f64,
    minimum_defense_frequency: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    effective_stack: Option<f64>,
}

impl OddsReport {
    /// Creates a report for a bet into a pot, amounts are in dollars.
    pub fn new(
        bet: f64,
        pot: f64,
        effective_stack: Option<f64>,
        unit: DisplayUnit,
        big_blind: f64,
    ) -> Self {
        Self {
            bet: Amount::new(bet, unit, big_blind),
            pot: Amount::new(pot, unit, big_blind),
            pot_odds: pot_odds(bet, pot),
            minimum_defense_frequency: minimum_defense_frequency(bet, pot),
            effective_stack,
        }
    }

    /// Writes the report as text.
    pub fn write_text(&self, w: &mut impl Write) -> io::Result<()> {
        writeln!(w, "Bet {} into {}", self.bet, self.pot)?;
        writeln!(w, "Pot odds:                  {:.1}%", self.pot_odds)?;
        writeln!(
            w,
            "Minimum defense frequency: {:.1}%",
            self.minimum_defense_frequency
        )?;

        if let Some(stack) = self.effective_stack {
            let stack = Amount::new(stack, self.bet.unit(), self.bet.big_blind());
            writeln!(w, "Effective stack:           {stack}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use showdown_core::{EquityOptions, estimate};

    fn text(write: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        write(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn hand_report() {
        let cards = showdown_core::parse_cards("Ah Kh Qh Jh Th 2c 3d").unwrap();
        let (value, best) = HandValue::eval_with_best_hand(&cards);
        let report = HandReport::new(value, &best);

        let out = text(|w| report.write_text(w));
        assert!(out.starts_with("Royal Flush\n"));
        assert!(out.contains("Category:    Straight Flush"));
        assert!(out.contains("Best hand:   AH KH QH JH TH"));
    }

    #[test]
    fn equity_report() {
        let hands: [HoleCards; 2] = ["AhKh".parse().unwrap(), "7c7d".parse().unwrap()];
        let board: Board = "Jh Th 2c".parse().unwrap();
        let result = estimate(&hands, &board, &EquityOptions::default()).unwrap();

        let report = EquityReport::new(&hands, &board, &result);
        let out = text(|w| report.write_text(w));
        assert!(out.starts_with("Flop: JH TH 2C\n"));
        assert!(out.contains("High Card"));
        assert!(out.contains("Pair"));
        assert!(out.ends_with("Exact, 990 boards\n"));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["trials"], 990);
        assert_eq!(json["method"], "Exact");
        assert_eq!(json["players"][1]["made_hand"], "Pair");
    }

    #[test]
    fn odds_report() {
        let report = OddsReport::new(50.0, 100.0, Some(400.0), DisplayUnit::BigBlinds, 2.0);
        let out = text(|w| report.write_text(w));
        assert!(out.contains("Bet 25 bb into 50 bb"));
        assert!(out.contains("Pot odds:                  33.3%"));
        assert!(out.contains("Minimum defense frequency: 66.7%"));
        assert!(out.contains("Effective stack:           200 bb"));

        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("bet").is_none());
        assert_eq!(json["effective_stack"], 400.0);
    }
}
