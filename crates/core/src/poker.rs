// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Types used to describe a hand.
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use showdown_eval::{Card, CardsError, check_distinct, parse_cards};

use crate::{Error, Result};

/// A player two hole cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct HoleCards([Card; 2]);

impl HoleCards {
    /// Creates hole cards, fails if the two cards are the same card.
    pub fn new(c1: Card, c2: Card) -> Result<Self> {
        if c1 == c2 {
            return Err(CardsError::DuplicateCard(c1).into());
        }

        Ok(Self([c1, c2]))
    }

    /// The two cards.
    pub fn cards(&self) -> [Card; 2] {
        self.0
    }
}

impl FromStr for HoleCards {
    type Err = Error;

    /// Parses hole cards like `AhKh` or `Ah Kh`.
    fn from_str(s: &str) -> Result<Self> {
        match parse_cards(s)?.as_slice() {
            &[c1, c2] => Self::new(c1, c2),
            cards => Err(Error::InvalidHoleCards(cards.len())),
        }
    }
}

impl fmt::Display for HoleCards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.0[0], self.0[1])
    }
}

/// The betting round, given by the number of community cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Street {
    /// No community cards.
    Preflop,
    /// Three community cards.
    Flop,
    /// Four community cards.
    Turn,
    /// Five community cards.
    River,
}

impl Street {
    /// The street for a board with `len` cards.
    pub fn from_board_len(len: usize) -> Result<Street> {
        match len {
            0 => Ok(Street::Preflop),
            3 => Ok(Street::Flop),
            4 => Ok(Street::Turn),
            5 => Ok(Street::River),
            n => Err(Error::InvalidBoard(n)),
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let street = match self {
            Street::Preflop => "Preflop",
            Street::Flop => "Flop",
            Street::Turn => "Turn",
            Street::River => "River",
        };

        f.write_str(street)
    }
}

/// The community cards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Board {
    cards: Vec<Card>,
}

impl Board {
    /// The number of cards on a complete board.
    pub const SIZE: usize = 5;

    /// Creates a board, fails if the board doesn't have 0, 3, 4, or 5 cards or
    /// if a card appears twice.
    pub fn new(cards: &[Card]) -> Result<Self> {
        Street::from_board_len(cards.len())?;
        check_distinct(cards)?;

        Ok(Self {
            cards: cards.to_vec(),
        })
    }

    /// Deals more cards to the board.
    ///
    /// The board only grows to the next streets, the board is not changed if the
    /// new cards would make an invalid board.
    pub fn deal(&mut self, cards: &[Card]) -> Result<Street> {
        if cards.is_empty() {
            return Err(Error::InvalidBoard(self.cards.len()));
        }

        let mut next = self.cards.clone();
        next.extend_from_slice(cards);

        *self = Self::new(&next)?;
        Ok(self.street())
    }

    /// The board street.
    pub fn street(&self) -> Street {
        match self.cards.len() {
            0 => Street::Preflop,
            3 => Street::Flop,
            4 => Street::Turn,
            _ => Street::River,
        }
    }

    /// The board cards.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// The number of cards on the board.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Checks if the board has no cards.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The number of cards still to come.
    pub fn cards_to_come(&self) -> usize {
        Self::SIZE - self.cards.len()
    }
}

impl FromStr for Board {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(&parse_cards(s)?)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, c) in self.cards.iter().enumerate() {
            if idx > 0 {
                f.write_str(" ")?;
            }

            write!(f, "{c}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use showdown_eval::{Rank, Suit};

    #[test]
    fn hole_cards() {
        let hand = "AhKh".parse::<HoleCards>().unwrap();
        assert_eq!(
            hand.cards(),
            [
                Card::new(Rank::Ace, Suit::Hearts),
                Card::new(Rank::King, Suit::Hearts)
            ]
        );
        assert_eq!(hand.to_string(), "AHKH");

        let ah = Card::new(Rank::Ace, Suit::Hearts);
        assert_eq!(
            HoleCards::new(ah, ah),
            Err(Error::InvalidCardSet(CardsError::DuplicateCard(ah)))
        );
        assert_eq!("Ah".parse::<HoleCards>(), Err(Error::InvalidHoleCards(1)));
        assert_eq!("AhKhQh".parse::<HoleCards>(), Err(Error::InvalidHoleCards(3)));
        assert!(matches!("AhKx".parse::<HoleCards>(), Err(Error::ParseCard(_))));
    }

    #[test]
    fn board_streets() {
        let mut board = Board::default();
        assert_eq!(board.street(), Street::Preflop);
        assert_eq!(board.cards_to_come(), 5);

        let flop = parse_cards("Jh Th 2c").unwrap();
        assert_eq!(board.deal(&flop), Ok(Street::Flop));
        assert_eq!(board.deal(&parse_cards("3d").unwrap()), Ok(Street::Turn));
        assert_eq!(board.deal(&parse_cards("4d").unwrap()), Ok(Street::River));
        assert_eq!(board.len(), 5);
        assert_eq!(board.cards_to_come(), 0);
        assert_eq!(board.to_string(), "JH TH 2C 3D 4D");

        // A river board can't grow.
        assert_eq!(
            board.deal(&parse_cards("5d").unwrap()),
            Err(Error::InvalidBoard(6))
        );
        assert_eq!(board.len(), 5);
    }

    #[test]
    fn invalid_boards() {
        assert_eq!("Ah Kh".parse::<Board>(), Err(Error::InvalidBoard(2)));
        assert_eq!(
            "Ah Kh Ah".parse::<Board>(),
            Err(Error::InvalidCardSet(CardsError::DuplicateCard(Card::new(
                Rank::Ace,
                Suit::Hearts
            ))))
        );

        let mut board = Board::default();
        assert_eq!(board.deal(&[]), Err(Error::InvalidBoard(0)));
        assert_eq!(
            board.deal(&parse_cards("Ah Kh").unwrap()),
            Err(Error::InvalidBoard(2))
        );

        // Dealing a card that is already on the board.
        let mut board = "Ah Kh Qh".parse::<Board>().unwrap();
        assert!(board.deal(&parse_cards("Kh").unwrap()).is_err());
        assert_eq!(board.street(), Street::Flop);
    }
}
